pub mod dictionary;
pub mod loader;

pub use dictionary::SqliteCorpus;
pub use loader::BokmaalLoader;
