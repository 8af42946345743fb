pub mod rhsjcd;

pub use rhsjcd::RhsjcdParser;

use crate::data::models::SemanticEntry;

/// Turns one entry's HTML into a [`SemanticEntry`].
///
/// Parsing is best effort: markup that is missing or malformed leaves the
/// corresponding fields empty instead of failing.
pub trait EntryParser: Send + Sync {
    fn parse(&self, html: &str) -> SemanticEntry;
}
