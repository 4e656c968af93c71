use std::path::Path;

use ordb_core::{Corpus, CorpusError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::dictionary::SqliteCorpus;

pub struct BokmaalLoader;

impl BokmaalLoader {
    /// Open the dictionary database read-only
    pub async fn open(path: &Path) -> Result<SqliteCorpus, CorpusError> {
        if !path.is_file() {
            return Err(CorpusError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Dictionary database not found: {}", path.display()),
            )));
        }

        tracing::info!("Opening dictionary database: {}", path.display());

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| CorpusError::Backend(Box::new(e)))?;

        let corpus = SqliteCorpus::new(pool, path);
        let metadata = corpus.metadata().await?;
        tracing::info!("Loaded {} dictionary entries from {}", metadata.entry_count, metadata.name);

        Ok(corpus)
    }
}
