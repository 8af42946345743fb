use std::path::{Path, PathBuf};

use diesel::prelude::*;
use diesel::sql_types::{Binary, Text};
use tempfile::TempDir;

use crate::config::{DictionaryConfig, ProfileKind};
use crate::data::repositories::{open_pool, DictionaryStore};
use crate::features::lookup::DictionaryService;

pub const FIXTURE_NAME: &str = "Test dictionary";
pub const FIXTURE_CSS_NAME: &str = "fixture.css";
pub const FIXTURE_CSS: &str = ".head { font-weight: bold; }\n";

/// 愛する as the dictionary renders it: two senses, an example, a synonym
/// list, an antonym and a usage note.
pub const AI_SURU_ENTRY: &str = concat!(
    r#"<div class="rhsjcd-entry">"#,
    r#"<div class="head">**〚あい・する〛<kan>〔愛する〕</kan>③</div>"#,
    r#"<div class="defn"><type>〈他サ〉</type></div>"#,
    r#"<div class="def2"><num>(1)</num><dfjp>かわいがる。大切にする。</dfjp><dfzh>爱；疼爱</dfzh></div>"#,
    r#"<div class="exam"><exjp>子を愛する</exjp><exzh>爱孩子</exzh></div>"#,
    r#"<div class="syns"><x>いつくしむ。かわいがる。</x></div>"#,
    r#"<div class="def2"><num>(2)</num><dfjp>恋しく思う。</dfjp><dfzh>爱恋</dfzh></div>"#,
    r#"<div class="anti"><x>憎む。</x></div>"#,
    r#"<div class="note"><x>文語形は「愛す」</x></div>"#,
    r#"</div>"#,
);

/// Entry and attachment databases in a temporary directory, laid out the
/// way the exporter writes them.
pub struct DictionaryFixture {
    _dir: TempDir,
    mdx_path: PathBuf,
    mdd_path: Option<PathBuf>,
    css_path: PathBuf,
}

impl DictionaryFixture {
    pub fn new(entries: &[(&str, &str)], attachments: Option<&[(&str, &[u8])]>) -> Self {
        let dir = tempfile::tempdir().unwrap();

        let mdx_path = dir.path().join("fixture.mdx.db");
        let mut conn = connect(&mdx_path);
        execute(&mut conn, "CREATE TABLE mdx (entry TEXT NOT NULL, paraphrase TEXT NOT NULL)");
        execute(&mut conn, "CREATE INDEX mdx_entry_nocase ON mdx (entry COLLATE NOCASE)");
        execute(&mut conn, "CREATE TABLE meta (key TEXT NOT NULL, value TEXT NOT NULL)");
        for (key, html) in entries {
            diesel::sql_query("INSERT INTO mdx (entry, paraphrase) VALUES (?, ?)")
                .bind::<Text, _>(*key)
                .bind::<Text, _>(*html)
                .execute(&mut conn)
                .unwrap();
        }
        diesel::sql_query("INSERT INTO meta (key, value) VALUES (?, ?)")
            .bind::<Text, _>("Title")
            .bind::<Text, _>("Fixture")
            .execute(&mut conn)
            .unwrap();

        let mdd_path = attachments.map(|attachments| {
            let path = dir.path().join("fixture.mdd.db");
            let mut conn = connect(&path);
            execute(&mut conn, "CREATE TABLE mdd (entry TEXT NOT NULL, file BLOB NOT NULL)");
            for (key, data) in attachments {
                diesel::sql_query("INSERT INTO mdd (entry, file) VALUES (?, ?)")
                    .bind::<Text, _>(*key)
                    .bind::<Binary, _>(*data)
                    .execute(&mut conn)
                    .unwrap();
            }
            path
        });

        let css_path = dir.path().join(FIXTURE_CSS_NAME);
        std::fs::write(&css_path, FIXTURE_CSS).unwrap();

        Self {
            _dir: dir,
            mdx_path,
            mdd_path,
            css_path,
        }
    }

    pub fn store(&self) -> DictionaryStore {
        self.build_store(false)
    }

    pub fn store_with_nocase_attachments(&self) -> DictionaryStore {
        self.build_store(true)
    }

    fn build_store(&self, attachment_nocase: bool) -> DictionaryStore {
        DictionaryStore::new(
            FIXTURE_NAME,
            open_pool(&self.mdx_path, 2).unwrap(),
            self.mdd_path.as_deref().map(|path| open_pool(path, 2).unwrap()),
            attachment_nocase,
        )
    }

    pub fn config(&self, profile: ProfileKind) -> DictionaryConfig {
        DictionaryConfig {
            name: FIXTURE_NAME.into(),
            mdx_path: self.mdx_path.clone(),
            mdd_path: self.mdd_path.clone(),
            mdd_case_insensitive: false,
            css_path: Some(self.css_path.clone()),
            css_name: Some(FIXTURE_CSS_NAME.into()),
            profile,
            host: "127.0.0.1".into(),
            port: 0,
            pool_size: 2,
            log_level: "debug".into(),
        }
    }

    pub fn service(&self, profile: ProfileKind) -> DictionaryService {
        DictionaryService::open(self.config(profile)).unwrap()
    }
}

fn connect(path: &Path) -> SqliteConnection {
    SqliteConnection::establish(&path.to_string_lossy()).unwrap()
}

fn execute(conn: &mut SqliteConnection, statement: &str) {
    diesel::sql_query(statement).execute(conn).unwrap();
}
