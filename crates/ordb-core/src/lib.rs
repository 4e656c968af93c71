pub mod corpus;
pub mod error;
pub mod examples;
pub mod highlight;
pub mod matcher;
pub mod memory;
pub mod preprocess;
pub mod query;
pub mod rank;
pub mod search;
pub mod variants;

pub use corpus::{Corpus, CorpusMetadata, CorpusStatistics, Predicate, Retrieval, Scope};
pub use error::{CorpusError, SearchError};
pub use memory::MemoryCorpus;
pub use query::{ParsedQuery, SearchMode};
pub use search::{ModeOverride, SearchOptions, SearchOutcome, Searcher};
