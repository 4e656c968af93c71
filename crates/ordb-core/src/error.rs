use ordb_types::EntryId;

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("Corpus backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Malformed record {id}: {reason}")]
    MalformedRecord { id: EntryId, reason: String },

    #[error("Entry not found: {0}")]
    NotFound(EntryId),

    #[error("Invalid corpus data: {0}")]
    InvalidData(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Threshold must be between 0.0 and 1.0, got {0}")]
    InvalidThreshold(f64),

    #[error("Empty search query")]
    EmptyQuery,

    #[error(transparent)]
    Corpus(#[from] CorpusError),
}
