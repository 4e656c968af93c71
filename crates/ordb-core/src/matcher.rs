use ordb_types::Entry;

use crate::corpus::{Corpus, Predicate, Retrieval, Scope};
use crate::error::CorpusError;
use crate::query::SearchMode;

/// An entry hit with its mode-specific score
#[derive(Debug, Clone)]
pub struct MatchCandidate {
    pub entry: Entry,
    /// Similarity in fuzzy mode, 1.0 otherwise
    pub score: f64,
}

impl MatchCandidate {
    fn exact(entry: Entry) -> Self {
        Self { entry, score: 1.0 }
    }
}

/// Normalized edit-distance similarity in [0, 1], case-insensitive
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

/// Runs mode-specific retrievals for each variant against a corpus
pub struct Matcher<'a, C: Corpus + ?Sized> {
    corpus: &'a C,
    fuzzy_threshold: f64,
}

impl<'a, C: Corpus + ?Sized> Matcher<'a, C> {
    pub fn new(corpus: &'a C, fuzzy_threshold: f64) -> Self {
        Self {
            corpus,
            fuzzy_threshold,
        }
    }

    /// Raw hits for every variant, in variant order, duplicates included
    pub async fn collect(
        &self,
        mode: SearchMode,
        variants: &[String],
        include_expr: bool,
    ) -> Result<Vec<MatchCandidate>, CorpusError> {
        if mode == SearchMode::Fuzzy {
            return self.collect_fuzzy(variants, include_expr).await;
        }

        let mut hits = Vec::new();
        for variant in variants {
            let found = match mode {
                SearchMode::Exact => self.exact(variant, include_expr).await?,
                SearchMode::Prefix => self.prefix(variant, include_expr).await?,
                SearchMode::AnywhereTerm => {
                    self.refined(variant, Scope::Terms, include_expr, |entry, needle| {
                        entry.terms().any(|t| t.to_lowercase().contains(needle))
                    })
                    .await?
                }
                SearchMode::Fulltext => {
                    self.fetch(Predicate::Substring(variant.clone()), Scope::AllContent, include_expr)
                        .await?
                }
                SearchMode::Anywhere => {
                    self.fetch(Predicate::Substring(variant.clone()), Scope::SensesAndLemmas, include_expr)
                        .await?
                }
                SearchMode::ExpressionsOnly => {
                    self.refined(variant, Scope::Expressions, true, |entry, needle| {
                        entry.is_expression()
                            && (entry.lemma.to_lowercase().contains(needle)
                                || entry.all_lemmas.iter().any(|l| l.to_lowercase().contains(needle)))
                    })
                    .await?
                }
                SearchMode::Fuzzy => unreachable!("handled above"),
            };

            tracing::debug!("{mode} variant {variant:?}: {} raw hits", found.len());
            hits.extend(found.into_iter().map(MatchCandidate::exact));
        }

        Ok(hits)
    }

    async fn fetch(
        &self,
        predicate: Predicate,
        scope: Scope,
        include_expr: bool,
    ) -> Result<Vec<Entry>, CorpusError> {
        self.corpus
            .fetch_entries(&Retrieval::new(predicate, scope, include_expr))
            .await
    }

    /// Substring retrieval followed by a precise check on the entry fields
    async fn refined<F>(
        &self,
        variant: &str,
        scope: Scope,
        include_expr: bool,
        keep: F,
    ) -> Result<Vec<Entry>, CorpusError>
    where
        F: Fn(&Entry, &str) -> bool,
    {
        let needle = variant.to_lowercase();
        let found = self
            .fetch(Predicate::Substring(variant.to_string()), scope, include_expr)
            .await?;
        Ok(found.into_iter().filter(|e| keep(e, &needle)).collect())
    }

    /// Lemma equality, then whole-element membership in forms
    async fn exact(&self, variant: &str, include_expr: bool) -> Result<Vec<Entry>, CorpusError> {
        let needle = variant.to_lowercase();

        let mut found: Vec<Entry> = self
            .fetch(Predicate::Exact(variant.to_string()), Scope::Lemma, include_expr)
            .await?
            .into_iter()
            .filter(|e| e.lemma.to_lowercase() == needle)
            .collect();

        let by_form = self
            .refined(variant, Scope::Terms, include_expr, |entry, needle| {
                entry
                    .all_lemmas
                    .iter()
                    .chain(entry.inflections.iter())
                    .any(|form| form.to_lowercase() == needle)
            })
            .await?;

        found.extend(by_form);
        Ok(found)
    }

    async fn prefix(&self, variant: &str, include_expr: bool) -> Result<Vec<Entry>, CorpusError> {
        self.refined(variant, Scope::Terms, include_expr, |entry, needle| {
            entry
                .terms()
                .filter(|t| !t.is_empty())
                .any(|t| t.to_lowercase().starts_with(needle))
        })
        .await
    }

    /// Full scan scored against lemma, then the best alternate lemma
    async fn collect_fuzzy(
        &self,
        variants: &[String],
        include_expr: bool,
    ) -> Result<Vec<MatchCandidate>, CorpusError> {
        let all = self.fetch(Predicate::Any, Scope::Lemma, include_expr).await?;
        tracing::debug!("Fuzzy scan over {} entries", all.len());

        let mut hits = Vec::new();
        for variant in variants {
            for entry in &all {
                if let Some(score) = self.fuzzy_score(variant, entry) {
                    hits.push(MatchCandidate {
                        entry: entry.clone(),
                        score,
                    });
                }
            }
        }

        Ok(hits)
    }

    fn fuzzy_score(&self, variant: &str, entry: &Entry) -> Option<f64> {
        let lemma_score = similarity(variant, &entry.lemma);
        if lemma_score >= self.fuzzy_threshold {
            return Some(lemma_score);
        }

        let best = entry
            .all_lemmas
            .iter()
            .map(|l| similarity(variant, l))
            .fold(0.0_f64, f64::max);

        (best >= self.fuzzy_threshold).then_some(best)
    }
}
