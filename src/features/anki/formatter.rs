use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tera::{Context, Tera};
use uuid::Uuid;

use crate::data::models::{DefinitionGroup, Example, FlashcardRecord, SemanticEntry};
use crate::utils::{self, CARD_TABLE_TEMPLATE, DESCRIPTION_TEMPLATE, EXAM_DEF_TEMPLATE};

#[derive(Debug, Clone, Copy)]
enum Languages {
    Primary,
    Secondary,
    Both,
}

impl Languages {
    fn flags(self) -> (bool, bool) {
        match self {
            Languages::Primary => (true, false),
            Languages::Secondary => (false, true),
            Languages::Both => (true, true),
        }
    }
}

#[derive(Serialize)]
struct TextPair<'a> {
    primary: Option<&'a str>,
    secondary: Option<&'a str>,
}

impl<'a> From<&'a Example> for TextPair<'a> {
    fn from(example: &'a Example) -> Self {
        Self {
            primary: example.primary.as_deref(),
            secondary: example.secondary.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct DescriptionGroup<'a> {
    kind: Option<&'a str>,
    note: Option<&'a str>,
    items: Vec<DescriptionItem<'a>>,
}

#[derive(Serialize)]
struct DescriptionItem<'a> {
    index: Option<&'a str>,
    primary: Option<&'a str>,
    secondary: Option<&'a str>,
    exam: String,
}

/// Renders [`SemanticEntry`] values into Anki-ready [`FlashcardRecord`]s.
pub struct CardFormatter {
    templates: Arc<Tera>,
}

impl CardFormatter {
    pub fn new(templates: Arc<Tera>) -> Self {
        Self { templates }
    }

    /// Every call stamps the card with a new uuid and the current time.
    pub fn format(&self, entry: &SemanticEntry) -> FlashcardRecord {
        let uuid = Uuid::new_v4().to_string();
        let date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.format_stamped(entry, uuid, date)
    }

    fn format_stamped(&self, entry: &SemanticEntry, uuid: String, date: String) -> FlashcardRecord {
        let kind = entry
            .defs
            .iter()
            .map(|group| group.kind.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join("・");

        let examples: Vec<TextPair> = entry
            .defs
            .iter()
            .flat_map(|group| &group.items)
            .flat_map(|item| &item.examples)
            .map(TextPair::from)
            .collect();

        FlashcardRecord {
            uuid,
            date,
            priority: entry.priority.map(|p| p.to_string()),
            word: entry.word.clone(),
            word_with_symbol: entry.word_with_symbol.clone(),
            kana: entry.kana.clone(),
            spell: entry.spell.clone(),
            tune: entry.tune.clone(),
            origin: entry.origin.clone(),
            kind,
            description: self.join_groups(entry, |group| self.render_description(group)),
            description_primary: self.join_groups(entry, |group| {
                self.render_pairs(&definition_pairs(group), "desc", Languages::Primary)
            }),
            description_secondary: self.join_groups(entry, |group| {
                self.render_pairs(&definition_pairs(group), "desc", Languages::Secondary)
            }),
            exam_primary: self.render_pairs(&examples, "exam", Languages::Primary),
            exam_secondary: self.render_pairs(&examples, "exam", Languages::Secondary),
            exam_full: self.render_pairs(&examples, "exam", Languages::Both),
        }
    }

    /// One `<table>` fragment for pasting into a spreadsheet or Anki's importer.
    pub fn render_table(&self, record: &FlashcardRecord) -> String {
        let mut context = Context::new();
        context.insert("cells", &record.table_cells());
        utils::render_fragment(&self.templates, CARD_TABLE_TEMPLATE, &context)
    }

    fn join_groups(&self, entry: &SemanticEntry, render: impl Fn(&DefinitionGroup) -> String) -> String {
        entry.defs.iter().map(render).collect::<Vec<_>>().join("\n")
    }

    fn render_description(&self, group: &DefinitionGroup) -> String {
        let items = group
            .items
            .iter()
            .map(|item| {
                let examples: Vec<TextPair> = item.examples.iter().map(TextPair::from).collect();
                DescriptionItem {
                    index: item.index.as_deref(),
                    primary: item.primary.as_deref(),
                    secondary: item.secondary.as_deref(),
                    exam: self.render_pairs(&examples, "exam", Languages::Both),
                }
            })
            .collect();

        let mut context = Context::new();
        context.insert(
            "group",
            &DescriptionGroup {
                kind: group.kind.as_deref(),
                note: group.note.as_deref(),
                items,
            },
        );
        utils::render_fragment(&self.templates, DESCRIPTION_TEMPLATE, &context)
    }

    fn render_pairs(&self, items: &[TextPair], kind: &str, languages: Languages) -> String {
        let (show_primary, show_secondary) = languages.flags();
        let mut context = Context::new();
        context.insert("items", items);
        context.insert("kind", kind);
        context.insert("show_primary", &show_primary);
        context.insert("show_secondary", &show_secondary);
        utils::render_fragment(&self.templates, EXAM_DEF_TEMPLATE, &context)
    }
}

fn definition_pairs(group: &DefinitionGroup) -> Vec<TextPair<'_>> {
    group
        .items
        .iter()
        .map(|item| TextPair {
            primary: item.primary.as_deref(),
            secondary: item.secondary.as_deref(),
        })
        .collect()
}
