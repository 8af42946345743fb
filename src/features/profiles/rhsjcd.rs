use std::sync::Arc;

use tera::Tera;

use super::{link_marker_target, DictionaryProfile};
use crate::features::anki::CardFormatter;
use crate::features::parser::{EntryParser, RhsjcdParser};

/// 日汉双解词典: the only schema with a structured parser and Anki cards.
pub struct RhsjcdProfile {
    parser: RhsjcdParser,
    formatter: CardFormatter,
}

impl RhsjcdProfile {
    pub fn new(templates: Arc<Tera>) -> Self {
        Self {
            parser: RhsjcdParser,
            formatter: CardFormatter::new(templates),
        }
    }
}

impl DictionaryProfile for RhsjcdProfile {
    fn redirect_target(&self, html: &str) -> Option<String> {
        link_marker_target(html)
    }

    fn entry_parser(&self) -> Option<&dyn EntryParser> {
        Some(&self.parser)
    }

    fn card_formatter(&self) -> Option<&CardFormatter> {
        Some(&self.formatter)
    }
}
