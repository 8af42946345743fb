pub mod formatter;

pub use formatter::CardFormatter;
