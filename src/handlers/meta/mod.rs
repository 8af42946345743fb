mod meta;

pub use meta::*;
