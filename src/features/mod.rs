pub mod anki;
pub mod lookup;
pub mod parser;
pub mod profiles;
pub mod redirect;
