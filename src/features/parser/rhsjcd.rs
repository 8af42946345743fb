// Parser for 日汉双解词典 entries.
//
// The class and tag names below are the ones the dictionary's compiler emits;
// they are the contract this parser is written against.

use std::mem;

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::EntryParser;
use crate::data::models::{DefinitionGroup, DefinitionItem, Example, SemanticEntry};

lazy_static! {
    static ref HEAD_SEL: Selector = Selector::parse(".head").unwrap();
    static ref KAN_SEL: Selector = Selector::parse("kan").unwrap();
    static ref ENTRY_CHILD_SEL: Selector = Selector::parse(".rhsjcd-entry > *").unwrap();
    static ref TYPE_SEL: Selector = Selector::parse("type").unwrap();
    static ref X_SEL: Selector = Selector::parse("x").unwrap();
    static ref NUM_SEL: Selector = Selector::parse("num").unwrap();
    static ref DFJP_SEL: Selector = Selector::parse("dfjp").unwrap();
    static ref DFZH_SEL: Selector = Selector::parse("dfzh").unwrap();
    static ref EXJP_SEL: Selector = Selector::parse("exjp").unwrap();
    static ref EXZH_SEL: Selector = Selector::parse("exzh").unwrap();

    static ref HEAD_RE: Regex = Regex::new(r"(\**)〚(.+)〛").unwrap();
    static ref KAN_RUN_RE: Regex = Regex::new(r"^(?:〔.*〕)*").unwrap();
    // Latin script and IPA, except `×` which the dictionary uses as a marker
    static ref LATIN_RE: Regex = Regex::new(r"[\x00-\x{D6}\x{D8}-\x{36F}]").unwrap();
    static ref TUNE_RE: Regex = Regex::new(r"[⓪①-⑳]+").unwrap();
}

const SPELL_SEPARATOR: char = '・';
const SENTENCE_END: char = '。';

#[derive(Debug, Clone, Copy, Default)]
pub struct RhsjcdParser;

impl EntryParser for RhsjcdParser {
    fn parse(&self, html: &str) -> SemanticEntry {
        let document = Html::parse_fragment(html);

        let (priority, spell) = parse_head(&document);
        let kana = spell.as_ref().map(|s| s.replace(SPELL_SEPARATOR, ""));
        let (words_with_symbol, origins) = parse_kan(&document);
        let full_text: String = document.root_element().text().collect();
        let tune = TUNE_RE.find(&full_text).map(|m| m.as_str().to_string());

        let mut walk = DefinitionWalk::new();
        for element in document.select(&ENTRY_CHILD_SEL) {
            if let Some(kind) = NodeKind::of(element) {
                walk.visit(kind, element);
            }
        }

        let mut entry = SemanticEntry {
            priority,
            spell,
            kana,
            tune,
            words_with_symbol,
            origin: (!origins.is_empty()).then(|| origins.join("・")),
            defs: walk.finish(),
            ..SemanticEntry::default()
        };
        entry.refresh_words();
        entry
    }
}

/// `**〚あい・する〛` gives priority 2 and spell `あい・する`.
fn parse_head(document: &Html) -> (Option<u32>, Option<String>) {
    let Some(head) = document.select(&HEAD_SEL).next().map(text_of) else {
        return (None, None);
    };
    match HEAD_RE.captures(&head) {
        Some(captures) => (
            Some(captures[1].chars().count() as u32),
            Some(captures[2].to_string()),
        ),
        None => (None, None),
    }
}

/// Splits the leading `〔…〕` run of the `kan` blocks into headword variants
/// and origin annotations.
fn parse_kan(document: &Html) -> (Vec<String>, Vec<String>) {
    let kan: String = document.select(&KAN_SEL).map(text_of).collect();
    let run = KAN_RUN_RE.find(&kan).map(|m| m.as_str()).unwrap_or_default();

    let mut words = Vec::new();
    let mut origins = Vec::new();
    for token in run
        .split(['〔', '〕', SPELL_SEPARATOR])
        .map(str::trim)
        .filter(|token| !token.is_empty())
    {
        if LATIN_RE.is_match(token) {
            origins.push(token.to_string());
        } else {
            words.push(token.to_string());
        }
    }
    (words, origins)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    GroupHeading,
    Tags,
    Note,
    Definition,
    Example,
    Antonyms,
    Synonyms,
}

impl NodeKind {
    fn of(element: ElementRef) -> Option<Self> {
        element.value().classes().find_map(|class| match class {
            "defn" => Some(Self::GroupHeading),
            "tags" => Some(Self::Tags),
            "note" => Some(Self::Note),
            "def2" => Some(Self::Definition),
            "exam" => Some(Self::Example),
            "anti" => Some(Self::Antonyms),
            "syns" => Some(Self::Synonyms),
            _ => None,
        })
    }
}

/// Single pass over the entry's children. One group is open from the start,
/// so definitions that precede any heading still have a home.
struct DefinitionWalk {
    closed: Vec<DefinitionGroup>,
    current: DefinitionGroup,
}

impl DefinitionWalk {
    fn new() -> Self {
        Self {
            closed: Vec::new(),
            current: DefinitionGroup::default(),
        }
    }

    fn visit(&mut self, kind: NodeKind, element: ElementRef) {
        match kind {
            NodeKind::GroupHeading => {
                self.open_group();
                self.set_type(element);
            }
            NodeKind::Tags => self.set_type(element),
            NodeKind::Note => self.current.note = child_text(element, &X_SEL),
            NodeKind::Definition => self.current.items.push(DefinitionItem {
                index: child_text(element, &NUM_SEL).map(|n| n.replace(['(', ')'], "")),
                primary: child_text(element, &DFJP_SEL),
                secondary: child_text(element, &DFZH_SEL),
                ..DefinitionItem::default()
            }),
            NodeKind::Example => {
                let example = Example {
                    primary: child_text(element, &EXJP_SEL).map(close_sentence),
                    secondary: child_text(element, &EXZH_SEL),
                };
                self.current_item().examples.push(example);
            }
            NodeKind::Antonyms => {
                self.current_item().antonyms = split_terms(child_text(element, &X_SEL));
            }
            NodeKind::Synonyms => {
                self.current_item().synonyms = split_terms(child_text(element, &X_SEL));
            }
        }
    }

    fn open_group(&mut self) {
        let previous = mem::take(&mut self.current);
        self.closed.push(previous);
    }

    fn set_type(&mut self, element: ElementRef) {
        let kind = child_text(element, &TYPE_SEL).map(|t| t.replace(['〈', '〉'], ""));
        self.current.type_list = kind
            .as_deref()
            .map(|t| {
                t.split(SPELL_SEPARATOR)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        self.current.kind = kind;
    }

    /// Last item of the open group, created if the group has none yet.
    fn current_item(&mut self) -> &mut DefinitionItem {
        if self.current.items.is_empty() {
            self.current.items.push(DefinitionItem::default());
        }
        let last = self.current.items.len() - 1;
        &mut self.current.items[last]
    }

    fn finish(mut self) -> Vec<DefinitionGroup> {
        self.open_group();
        let mut groups = self.closed;
        if groups.first().is_some_and(DefinitionGroup::is_empty) {
            groups.remove(0);
        }
        groups
    }
}

fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn child_text(element: ElementRef, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(text_of)
        .filter(|text| !text.is_empty())
}

// The dictionary drops the full stop from example sentences.
fn close_sentence(mut text: String) -> String {
    if !text.ends_with(SENTENCE_END) {
        text.push(SENTENCE_END);
    }
    text
}

fn split_terms(text: Option<String>) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for term in text
        .as_deref()
        .unwrap_or_default()
        .split(SENTENCE_END)
        .map(str::trim)
        .filter(|term| !term.is_empty())
    {
        if !terms.iter().any(|seen| seen == term) {
            terms.push(term.to_string());
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::AI_SURU_ENTRY;

    fn parse(html: &str) -> SemanticEntry {
        RhsjcdParser.parse(html)
    }

    #[test]
    fn test_headword_markers() {
        let entry = parse(r#"<div class="rhsjcd-entry"><div class="head">**〚ABC・DEF〛</div></div>"#);

        assert_eq!(entry.priority, Some(2));
        assert_eq!(entry.spell.as_deref(), Some("ABC・DEF"));
        assert_eq!(entry.kana.as_deref(), Some("ABCDEF"));
        assert_eq!(entry.words, vec!["ABCDEF"]);
        assert_eq!(entry.word.as_deref(), Some("ABCDEF"));
    }

    #[test]
    fn test_full_entry() {
        let entry = parse(AI_SURU_ENTRY);

        assert_eq!(entry.priority, Some(2));
        assert_eq!(entry.spell.as_deref(), Some("あい・する"));
        assert_eq!(entry.kana.as_deref(), Some("あいする"));
        assert_eq!(entry.tune.as_deref(), Some("③"));
        assert_eq!(entry.words_with_symbol, vec!["愛する"]);
        assert_eq!(entry.origin, None);

        assert_eq!(entry.defs.len(), 1);
        let group = &entry.defs[0];
        assert_eq!(group.kind.as_deref(), Some("他サ"));
        assert_eq!(group.type_list, vec!["他サ"]);
        assert_eq!(group.note.as_deref(), Some("文語形は「愛す」"));
        assert_eq!(group.items.len(), 2);

        let first = &group.items[0];
        assert_eq!(first.index.as_deref(), Some("1"));
        assert_eq!(first.primary.as_deref(), Some("かわいがる。大切にする。"));
        assert_eq!(first.secondary.as_deref(), Some("爱；疼爱"));
        assert_eq!(
            first.examples,
            vec![Example {
                primary: Some("子を愛する。".into()),
                secondary: Some("爱孩子".into()),
            }]
        );
        assert_eq!(first.synonyms, vec!["いつくしむ", "かわいがる"]);

        let second = &group.items[1];
        assert_eq!(second.index.as_deref(), Some("2"));
        assert_eq!(second.antonyms, vec!["憎む"]);
        assert!(second.examples.is_empty());
    }

    #[test]
    fn test_origin_and_symbol_variants() {
        let entry = parse(
            r#"<div class="rhsjcd-entry"><div class="head">〚あい・そ〛<kan>〔△愛×想・愛相〕〔英 eye・sore〕</kan></div></div>"#,
        );

        assert_eq!(entry.priority, Some(0));
        assert_eq!(entry.words_with_symbol, vec!["△愛×想", "愛相"]);
        assert_eq!(entry.words, vec!["愛想", "愛相"]);
        assert_eq!(entry.word_with_symbol.as_deref(), Some("△愛×想・愛相"));
        assert_eq!(entry.word.as_deref(), Some("愛想・愛相"));
        assert_eq!(entry.origin.as_deref(), Some("英 eye・sore"));
    }

    #[test]
    fn test_loanword_falls_back_to_kana() {
        let entry = parse(
            r#"<div class="rhsjcd-entry"><div class="head">〚ソファー〛<kan>〔英 sofa〕</kan>①</div></div>"#,
        );

        assert_eq!(entry.origin.as_deref(), Some("英 sofa"));
        assert_eq!(entry.words_with_symbol, vec!["ソファー"]);
        assert_eq!(entry.tune.as_deref(), Some("①"));
    }

    #[test]
    fn test_kan_without_leading_bracket_is_ignored() {
        let entry = parse(r#"<div class="head">〚あい〛<kan>愛〔哀〕</kan></div>"#);
        assert_eq!(entry.words_with_symbol, vec!["あい"]);
    }

    #[test]
    fn test_terms_split_on_full_stop() {
        let entry = parse(
            r#"<div class="rhsjcd-entry"><div class="def2"><dfjp>x</dfjp></div><div class="syns"><x>foo。bar。</x></div><div class="anti"><x>baz。baz。</x></div></div>"#,
        );

        let item = &entry.defs[0].items[0];
        assert_eq!(item.synonyms, vec!["foo", "bar"]);
        assert_eq!(item.antonyms, vec!["baz"]);
    }

    #[test]
    fn test_leading_group_kept_when_used() {
        let entry = parse(
            r#"<div class="rhsjcd-entry"><div class="def2"><num>(1)</num><dfjp>一</dfjp></div><div class="defn"><type>〈名・自サ〉</type></div><div class="def2"><dfjp>二</dfjp></div></div>"#,
        );

        assert_eq!(entry.defs.len(), 2);
        assert_eq!(entry.defs[0].kind, None);
        assert_eq!(entry.defs[0].items[0].primary.as_deref(), Some("一"));
        assert_eq!(entry.defs[1].type_list, vec!["名", "自サ"]);
        assert_eq!(entry.defs[1].items[0].index, None);
    }

    #[test]
    fn test_leading_empty_group_dropped() {
        let entry = parse(
            r#"<div class="rhsjcd-entry"><div class="defn"><type>〈名〉</type></div><div class="defn"></div></div>"#,
        );

        assert_eq!(entry.defs.len(), 2);
        assert_eq!(entry.defs[0].kind.as_deref(), Some("名"));
        // only the placeholder group is dropped, later empty groups stay
        assert!(entry.defs[1].is_empty());
    }

    #[test]
    fn test_tags_retype_current_group() {
        let entry = parse(
            r#"<div class="rhsjcd-entry"><div class="defn"><type>〈名〉</type></div><div class="tags"><type>〈形動〉</type></div></div>"#,
        );

        assert_eq!(entry.defs.len(), 1);
        assert_eq!(entry.defs[0].kind.as_deref(), Some("形動"));
    }

    #[test]
    fn test_example_before_definition_creates_item() {
        let entry = parse(
            r#"<div class="rhsjcd-entry"><div class="defn"><type>〈名〉</type></div><div class="exam"><exjp>例文。</exjp></div></div>"#,
        );

        let items = &entry.defs[0].items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].primary, None);
        assert_eq!(items[0].examples[0].primary.as_deref(), Some("例文。"));
        assert_eq!(items[0].examples[0].secondary, None);
    }

    #[test]
    fn test_malformed_input_degrades() {
        for html in ["", "plain text", "<div class=\"head\">no brackets</div>", "<div class=\"rhsjcd-entry\"><div class=\"exam\">"] {
            let entry = parse(html);
            assert_eq!(entry.priority, None);
            assert_eq!(entry.spell, None);
            assert!(entry.words.is_empty());
            assert!(entry.defs.first().is_none_or(|group| !group.is_empty()));
        }
    }
}
