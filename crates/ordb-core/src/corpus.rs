use ordb_types::{Entry, EntryId, ExampleHit, RelatedExpression, Senses, WordClass};

use crate::error::CorpusError;

/// Read-only record retrieval over a dictionary store.
///
/// Text comparisons are case-insensitive. Implementations may return a
/// superset of the matching entries; the matcher re-checks the precise
/// predicate on entry fields.
#[async_trait::async_trait]
pub trait Corpus: Send + Sync {
    /// Entries selected by a predicate over a field scope
    async fn fetch_entries(&self, retrieval: &Retrieval) -> Result<Vec<Entry>, CorpusError>;

    /// Definitions and examples of one entry
    async fn fetch_senses(&self, id: EntryId) -> Result<Senses, CorpusError>;

    /// Every example with a non-empty quote containing `needle`,
    /// ordered by owning lemma then storage order
    async fn fetch_examples(&self, needle: &str) -> Result<Vec<ExampleHit>, CorpusError>;

    /// Expressions explicitly cross-linked to `lemma`
    async fn related_expressions(&self, lemma: &str) -> Result<Vec<RelatedExpression>, CorpusError>;

    /// Store metadata
    async fn metadata(&self) -> Result<CorpusMetadata, CorpusError>;

    /// Record counts over the whole store
    async fn statistics(&self) -> Result<CorpusStatistics, CorpusError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Exact(String),
    Substring(String),
    /// Full scan
    Any,
}

impl Predicate {
    /// Case-insensitive test of one field value
    pub fn test(&self, value: &str) -> bool {
        match self {
            Predicate::Exact(term) => value.to_lowercase() == term.to_lowercase(),
            Predicate::Substring(term) => value.to_lowercase().contains(&term.to_lowercase()),
            Predicate::Any => true,
        }
    }
}

/// Which fields a predicate is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Primary lemma only
    Lemma,
    /// Lemma, alternate lemmas and inflected forms
    Terms,
    /// Terms, etymology, definition content and example quotes
    AllContent,
    /// Definition content, example quotes and alternate lemmas
    SensesAndLemmas,
    /// Lemma and alternate lemmas of EXPR entries only
    Expressions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Retrieval {
    pub predicate: Predicate,
    pub scope: Scope,
    /// Keep EXPR entries; ignored for [`Scope::Expressions`]
    pub include_expr: bool,
}

impl Retrieval {
    pub fn new(predicate: Predicate, scope: Scope, include_expr: bool) -> Self {
        Self {
            predicate,
            scope,
            include_expr,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CorpusMetadata {
    pub name: String,
    pub entry_count: usize,
}

#[derive(Debug, Clone)]
pub struct CorpusStatistics {
    pub metadata: CorpusMetadata,
    pub definition_count: usize,
    pub example_count: usize,
    /// Entries per word class, most frequent first
    pub word_classes: Vec<(WordClass, usize)>,
}

impl CorpusStatistics {
    /// Entries of the given class
    pub fn count_of(&self, class: &WordClass) -> usize {
        self.word_classes
            .iter()
            .find(|(c, _)| c == class)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Order class counts by descending count, then by tag
pub fn sort_class_counts(counts: &mut [(WordClass, usize)]) {
    counts.sort_by(|(a, m), (b, n)| n.cmp(m).then_with(|| a.as_tag().cmp(b.as_tag())));
}
