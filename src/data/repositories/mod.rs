pub mod dictionary;

pub use dictionary::{open_pool, DictionaryStore};
