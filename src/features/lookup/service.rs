use std::sync::Arc;

use anyhow::Context as _;
use tera::Tera;

use crate::config::DictionaryConfig;
use crate::data::models::{FlashcardRecord, LookupError, MetaRow, RawEntry, SemanticEntry};
use crate::data::repositories::{open_pool, DictionaryStore};
use crate::features::anki::CardFormatter;
use crate::features::parser::EntryParser;
use crate::features::profiles::{self, DictionaryProfile};
use crate::features::redirect::RedirectResolver;
use crate::utils;

/// What `/search` answers with.
#[derive(Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Concatenated entry bodies, links already rewritten
    Html(String),
    /// No entry matched; the attachment stored under the key
    Attachment { key: String, data: Vec<u8> },
}

/// Everything one request needs, shared read-only by all requests.
pub struct DictionaryService {
    config: DictionaryConfig,
    store: DictionaryStore,
    profile: Arc<dyn DictionaryProfile>,
    templates: Arc<Tera>,
}

impl DictionaryService {
    pub fn new(
        config: DictionaryConfig,
        store: DictionaryStore,
        profile: Arc<dyn DictionaryProfile>,
        templates: Arc<Tera>,
    ) -> Self {
        Self {
            config,
            store,
            profile,
            templates,
        }
    }

    /// Opens the databases named in `config` and wires up its profile.
    pub fn open(config: DictionaryConfig) -> anyhow::Result<Self> {
        let entries = open_pool(&config.mdx_path, config.pool_size)
            .with_context(|| format!("Failed to open entry database {:?}", config.mdx_path))?;
        let attachments = match &config.mdd_path {
            Some(path) => Some(
                open_pool(path, config.pool_size)
                    .with_context(|| format!("Failed to open attachment database {:?}", path))?,
            ),
            None => None,
        };
        let store = DictionaryStore::new(
            config.name.clone(),
            entries,
            attachments,
            config.mdd_case_insensitive,
        );

        let templates = Arc::new(utils::build_templates().context("Failed to compile templates")?);
        let profile = profiles::select(config.profile, Arc::clone(&templates));
        Ok(Self::new(config, store, profile, templates))
    }

    pub fn config(&self) -> &DictionaryConfig {
        &self.config
    }

    pub fn templates(&self) -> &Tera {
        &self.templates
    }

    pub fn resolve(&self, key: &str, recursive: bool) -> Result<Vec<RawEntry>, LookupError> {
        RedirectResolver::new(&self.store, self.profile.as_ref()).resolve(key, recursive)
    }

    /// Entry HTML for `key`, or the attachment stored under it when no entry
    /// matches.
    pub fn search(&self, key: &str, recursive: bool) -> Result<SearchOutcome, LookupError> {
        let entries = self.resolve(key, recursive)?;
        log::debug!("Search {:?} (recursive: {}) matched {} entries", key, recursive, entries.len());

        if entries.is_empty() {
            let data = self.lookup_attachment(key)?;
            return Ok(SearchOutcome::Attachment {
                key: key.to_string(),
                data,
            });
        }

        let html: String = entries.into_iter().map(|entry| entry.html).collect();
        Ok(SearchOutcome::Html(self.profile.rewrite_result(html)))
    }

    pub fn lookup_attachment(&self, key: &str) -> Result<Vec<u8>, LookupError> {
        self.store.lookup_attachment(&self.profile.attachment_key(key))
    }

    /// Structured form of every entry `key` resolves to, redirects followed.
    pub fn search_api(&self, key: &str) -> Result<Vec<SemanticEntry>, LookupError> {
        let parser = self.parser()?;
        let entries = self.resolve(key, true)?;
        if entries.is_empty() {
            return Err(LookupError::WordNotFound(key.to_string()));
        }
        Ok(entries.iter().map(|entry| parser.parse(&entry.html)).collect())
    }

    pub fn search_cards(&self, key: &str) -> Result<Vec<FlashcardRecord>, LookupError> {
        let formatter = self.formatter()?;
        let entries = self.search_api(key)?;
        Ok(entries.iter().map(|entry| formatter.format(entry)).collect())
    }

    pub fn search_card_tables(&self, key: &str) -> Result<Vec<String>, LookupError> {
        let formatter = self.formatter()?;
        let cards = self.search_cards(key)?;
        Ok(cards.iter().map(|card| formatter.render_table(card)).collect())
    }

    /// Card for a client-edited entry. Word forms are derived again from
    /// `wordsWithSymbol` so the client only has to send those.
    pub fn convert(&self, mut entry: SemanticEntry) -> Result<FlashcardRecord, LookupError> {
        let formatter = self.formatter()?;
        entry.refresh_words();
        Ok(formatter.format(&entry))
    }

    pub fn metadata(&self) -> Result<Vec<MetaRow>, LookupError> {
        self.store.list_metadata()
    }

    fn parser(&self) -> Result<&dyn EntryParser, LookupError> {
        self.profile
            .entry_parser()
            .ok_or(LookupError::Unsupported("entry parser"))
    }

    fn formatter(&self) -> Result<&CardFormatter, LookupError> {
        self.profile
            .card_formatter()
            .ok_or(LookupError::Unsupported("card formatter"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfileKind;
    use crate::test_support::{DictionaryFixture, AI_SURU_ENTRY};

    fn rhsjcd_fixture() -> DictionaryFixture {
        DictionaryFixture::new(
            &[
                ("愛する", AI_SURU_ENTRY),
                ("あいする", "@@@LINK=愛する"),
                ("アイスル", "@@@LINK=あいする"),
            ],
            None,
        )
    }

    #[test]
    fn test_search_joins_entry_bodies() {
        let fixture = DictionaryFixture::new(&[("cat", "<p>a</p>"), ("cat", "<p>b</p>")], None);
        let service = fixture.service(ProfileKind::Mdict);

        assert_eq!(
            service.search("cat", false).unwrap(),
            SearchOutcome::Html("<p>a</p><p>b</p>".into())
        );
    }

    #[test]
    fn test_search_rewrites_links() {
        let fixture = DictionaryFixture::new(&[("cat", r#"<a href="entry://dog">dog</a>"#)], None);
        let service = fixture.service(ProfileKind::Mdict);

        assert_eq!(
            service.search("cat", true).unwrap(),
            SearchOutcome::Html(r#"<a href="./dog">dog</a>"#.into())
        );
    }

    #[test]
    fn test_search_falls_back_to_attachment() {
        let fixture = DictionaryFixture::new(&[("cat", "x")], Some(&[("\\snd\\cat.mp3", &b"ID3"[..])]));
        let service = fixture.service(ProfileKind::Mdict);

        assert_eq!(
            service.search("snd/cat.mp3", false).unwrap(),
            SearchOutcome::Attachment {
                key: "snd/cat.mp3".into(),
                data: b"ID3".to_vec(),
            }
        );
    }

    #[test]
    fn test_search_miss_without_attachment_store() {
        let fixture = DictionaryFixture::new(&[("cat", "x")], None);
        let service = fixture.service(ProfileKind::Mdict);

        assert!(matches!(
            service.search("dog", false),
            Err(LookupError::AttachmentStoreNotConfigured)
        ));
    }

    #[test]
    fn test_resolve_follows_redirect_to_non_ascii_case_variant() {
        let fixture = DictionaryFixture::new(&[("Élan", "@@@LINK=élan"), ("élan", "<p>dash</p>")], None);
        let service = fixture.service(ProfileKind::Mdict);

        assert_eq!(
            service.resolve("Élan", true).unwrap(),
            vec![RawEntry::new("élan", "<p>dash</p>")]
        );
    }

    #[test]
    fn test_search_api_follows_redirects() {
        let fixture = rhsjcd_fixture();
        let service = fixture.service(ProfileKind::Rhsjcd);

        let entries = service.search_api("アイスル").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kana.as_deref(), Some("あいする"));
    }

    #[test]
    fn test_search_api_miss() {
        let fixture = rhsjcd_fixture();
        let service = fixture.service(ProfileKind::Rhsjcd);

        assert!(matches!(
            service.search_api("にくむ"),
            Err(LookupError::WordNotFound(_))
        ));
    }

    #[test]
    fn test_search_api_needs_parser() {
        let fixture = rhsjcd_fixture();
        let service = fixture.service(ProfileKind::Mdict);

        assert!(matches!(
            service.search_api("愛する"),
            Err(LookupError::Unsupported("entry parser"))
        ));
    }

    #[test]
    fn test_search_cards_and_tables() {
        let fixture = rhsjcd_fixture();
        let service = fixture.service(ProfileKind::Rhsjcd);

        let cards = service.search_cards("あいする").unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].word.as_deref(), Some("愛する"));

        let tables = service.search_card_tables("あいする").unwrap();
        assert_eq!(tables.len(), 1);
        assert!(tables[0].contains("<table"));
    }

    #[test]
    fn test_convert_recomputes_words() {
        let fixture = rhsjcd_fixture();
        let service = fixture.service(ProfileKind::Rhsjcd);

        let entry = SemanticEntry {
            words_with_symbol: vec!["△愛×想".into()],
            word: Some("stale".into()),
            ..SemanticEntry::default()
        };
        let card = service.convert(entry).unwrap();
        assert_eq!(card.word.as_deref(), Some("愛想"));
        assert_eq!(card.word_with_symbol.as_deref(), Some("△愛×想"));

        let plain = fixture.service(ProfileKind::Mdict);
        assert!(matches!(
            plain.convert(SemanticEntry::default()),
            Err(LookupError::Unsupported("card formatter"))
        ));
    }
}
