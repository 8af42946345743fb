use diesel::{Queryable, QueryableByName, Selectable};
use serde::Serialize;

use crate::schema::{mdd, mdx};

/// One row of the entry store: a headword and its HTML body
#[derive(Debug, Clone, PartialEq, Eq, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = mdx)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RawEntry {
    #[diesel(column_name = entry)]
    pub key: String,       // Headword as stored in the index
    #[diesel(column_name = paraphrase)]
    pub html: String,      // Entry body, possibly a redirect marker
}

impl RawEntry {
    pub fn new(key: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            html: html.into(),
        }
    }

    /// Stand-in for a redirect that was not followed: a link the caller can
    /// open to look the target up itself.
    pub fn redirect_stub(key: impl Into<String>, target: &str) -> Self {
        let target = tera::escape_html(target);
        Self::new(key, format!("<a href=\"./{target}\">{target}</a><br/>"))
    }
}

/// Key/value pair from the `meta` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Queryable)]
pub struct MetaRow {
    pub key: String,
    pub value: String,
}

impl MetaRow {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Binary resource from the attachment store
#[derive(Debug, Clone, QueryableByName)]
#[diesel(table_name = mdd)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Attachment {
    #[diesel(column_name = file)]
    pub data: Vec<u8>,
}
