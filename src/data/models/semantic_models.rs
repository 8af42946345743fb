use serde::{Deserialize, Serialize};

// Rare/irregular-reading marks printed on headword variants
const DECORATIVE_SYMBOLS: [char; 2] = ['△', '×'];

/// Normalized form of one dictionary entry.
///
/// The JSON layout is shared with existing API clients, which is why the
/// bilingual fields serialise as `jp`/`zh` rather than by their Rust names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SemanticEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,            // Count of leading `*` markers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spell: Option<String>,            // Headword as printed, with separators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kana: Option<String>,             // Spell without separators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tune: Option<String>,             // Pitch-accent markers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    pub words: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_with_symbol: Option<String>,
    pub words_with_symbol: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,           // Loanword origin, e.g. `英 love`
    pub defs: Vec<DefinitionGroup>,
}

impl SemanticEntry {
    /// Recomputes `words`, `word` and `word_with_symbol` from
    /// `words_with_symbol`, falling back to the kana reading when the entry
    /// has no written variants.
    pub fn refresh_words(&mut self) {
        if self.words_with_symbol.is_empty() {
            if let Some(kana) = &self.kana {
                self.words_with_symbol.push(kana.clone());
            }
        }
        self.words = self
            .words_with_symbol
            .iter()
            .map(|word| word.replace(DECORATIVE_SYMBOLS, ""))
            .collect();
        self.word_with_symbol = join_forms(&self.words_with_symbol);
        self.word = join_forms(&self.words);
    }
}

fn join_forms(forms: &[String]) -> Option<String> {
    (!forms.is_empty()).then(|| forms.join("・"))
}

/// Definitions sharing one part-of-speech heading
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DefinitionGroup {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_list: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "def", alias = "items", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<DefinitionItem>,
}

impl DefinitionGroup {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.type_list.is_empty() && self.note.is_none() && self.items.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(rename = "jp", alias = "primary", skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(rename = "zh", alias = "secondary", skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(rename = "exam", alias = "examples", skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
    #[serde(rename = "anti", alias = "antonyms", skip_serializing_if = "Vec::is_empty")]
    pub antonyms: Vec<String>,
    #[serde(rename = "syns", alias = "synonyms", skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
}

/// An example sentence with its translation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Example {
    #[serde(rename = "jp", alias = "primary", skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(rename = "zh", alias = "secondary", skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}
