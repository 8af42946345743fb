use serde::{Deserialize, Serialize};

/// Flat, template-rendered record ready for import into Anki
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardRecord {
    pub uuid: String,                     // Fresh v4 id per formatting call
    pub date: String,                     // RFC 3339 timestamp of the call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_with_symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kana: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spell: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tune: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,                     // Group types joined with `・`
    pub description: String,              // Both languages, examples inline
    #[serde(rename = "descriptionJp")]
    pub description_primary: String,
    #[serde(rename = "descriptionZh")]
    pub description_secondary: String,
    #[serde(rename = "examJp")]
    pub exam_primary: String,
    #[serde(rename = "examZh")]
    pub exam_secondary: String,
    pub exam_full: String,
}

/// One cell of the HTML table rendering of a card
#[derive(Debug, Clone, Serialize)]
pub struct TableCell {
    pub name: &'static str,
    pub value: String,
    pub markup: bool,       // Already-rendered HTML, inserted unescaped
}

impl FlashcardRecord {
    /// Cells in the column order of the Anki note type.
    pub fn table_cells(&self) -> Vec<TableCell> {
        let text = |name, value: &Option<String>| TableCell {
            name,
            value: value.clone().unwrap_or_default(),
            markup: false,
        };
        let markup = |name, value: &String| TableCell {
            name,
            value: value.clone(),
            markup: true,
        };

        vec![
            TableCell { name: "uuid", value: self.uuid.clone(), markup: false },
            TableCell { name: "date", value: self.date.clone(), markup: false },
            text("priority", &self.priority),
            text("word", &self.word),
            text("wordWithSymbol", &self.word_with_symbol),
            text("kana", &self.kana),
            text("spell", &self.spell),
            text("tune", &self.tune),
            text("origin", &self.origin),
            TableCell { name: "type", value: self.kind.clone(), markup: false },
            markup("description", &self.description),
            markup("descriptionZh", &self.description_secondary),
            markup("descriptionJp", &self.description_primary),
            markup("examJp", &self.exam_primary),
            markup("examZh", &self.exam_secondary),
            markup("examFull", &self.exam_full),
        ]
    }
}
