pub mod types;
pub mod word_class;

pub use types::*;
pub use word_class::{Gender, WordClass};
