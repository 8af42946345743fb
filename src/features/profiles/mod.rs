//! Per-dictionary hooks.
//!
//! Every dictionary family marks redirects, links and media differently, and
//! only some have a markup schema we know how to parse. A profile bundles the
//! hooks for one family; capabilities it lacks keep the default (absent)
//! implementation.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tera::Tera;

use crate::config::ProfileKind;
use crate::features::anki::CardFormatter;
use crate::features::parser::EntryParser;

pub mod mdict;
pub mod rhsjcd;

pub use mdict::MdictProfile;
pub use rhsjcd::RhsjcdProfile;

lazy_static! {
    static ref LINK_MARKER_RE: Regex = Regex::new(r"^@@@LINK=(.*)").unwrap();
}

pub trait DictionaryProfile: Send + Sync {
    /// Key this entry redirects to, if it is an alias entry.
    fn redirect_target(&self, _html: &str) -> Option<String> {
        None
    }

    /// Rewrites links inside a rendered search result.
    fn rewrite_result(&self, html: String) -> String {
        html
    }

    /// Maps a request key onto the attachment store's key layout.
    fn attachment_key(&self, key: &str) -> String {
        key.to_string()
    }

    fn entry_parser(&self) -> Option<&dyn EntryParser> {
        None
    }

    fn card_formatter(&self) -> Option<&CardFormatter> {
        None
    }
}

pub fn select(kind: ProfileKind, templates: Arc<Tera>) -> Arc<dyn DictionaryProfile> {
    match kind {
        ProfileKind::Mdict => Arc::new(MdictProfile),
        ProfileKind::Rhsjcd => Arc::new(RhsjcdProfile::new(templates)),
    }
}

/// Target of an MDict `@@@LINK=` alias body.
pub fn link_marker_target(html: &str) -> Option<String> {
    let captures = LINK_MARKER_RE.captures(html)?;
    let target = captures[1].trim_matches(|c: char| c.is_whitespace() || c == '\0');
    (!target.is_empty()).then(|| target.to_string())
}
