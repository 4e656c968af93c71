use std::collections::HashSet;

use ordb_types::ExampleHit;
use regex::Regex;

use crate::corpus::Corpus;
use crate::error::CorpusError;
use crate::variants;

/// Whole-dictionary scan for examples using a word as a whole word
pub struct ExampleFinder<'a, C: Corpus + ?Sized> {
    corpus: &'a C,
}

impl<'a, C: Corpus + ?Sized> ExampleFinder<'a, C> {
    pub fn new(corpus: &'a C) -> Self {
        Self { corpus }
    }

    /// Examples containing any variant of `query` as a whole word.
    ///
    /// One copy per distinct quote text, sorted by owning lemma.
    pub async fn find(
        &self,
        query: &str,
        character_replacement: bool,
    ) -> Result<Vec<ExampleHit>, CorpusError> {
        let mut found = Vec::new();
        let mut seen_quotes = HashSet::new();

        for variant in variants::expand(query, character_replacement) {
            let matcher = WholeWord::new(&variant);
            let candidates = self.corpus.fetch_examples(&variant).await?;
            tracing::debug!("Example scan {variant:?}: {} candidates", candidates.len());

            for hit in candidates {
                if hit.quote.is_empty() || seen_quotes.contains(&hit.quote) {
                    continue;
                }
                if matcher.is_match(&hit.quote) {
                    seen_quotes.insert(hit.quote.clone());
                    found.push(hit);
                }
            }
        }

        found.sort_by(|a, b| a.lemma.cmp(&b.lemma));
        Ok(found)
    }
}

/// Lenient whole-word test: a `\b` boundary match, or failing that,
/// membership among the whitespace-separated tokens
pub struct WholeWord {
    word: String,
    pattern: Option<Regex>,
}

impl WholeWord {
    pub fn new(word: &str) -> Self {
        let word = word.to_lowercase();
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&word)))
            .inspect_err(|e| tracing::warn!("Cannot build boundary pattern for {word:?}: {e}"))
            .ok();
        Self { word, pattern }
    }

    pub fn is_match(&self, text: &str) -> bool {
        let text = text.to_lowercase();

        if self.pattern.as_ref().is_some_and(|re| re.is_match(&text)) {
            return true;
        }

        text.split_whitespace().any(|token| token == self.word)
    }
}
