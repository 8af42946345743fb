pub mod resolver;

pub use resolver::{EntrySource, RedirectResolver};
