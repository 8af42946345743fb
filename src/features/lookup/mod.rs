pub mod error_responses;
pub mod service;

pub use service::{DictionaryService, SearchOutcome};
