mod anki;

pub use anki::*;
