pub mod card_models;
pub mod entry_models;
pub mod error_models;
pub mod semantic_models;

pub use card_models::FlashcardRecord;
pub use entry_models::{Attachment, MetaRow, RawEntry};
pub use error_models::LookupError;
pub use semantic_models::{DefinitionGroup, DefinitionItem, Example, SemanticEntry};
