use std::collections::HashMap;

use ordb_types::{
    Definition, Entry, EntryId, Example, ExampleHit, ExpressionSense, RelatedExpression, Senses,
    WordClass,
};
use serde::Deserialize;

use crate::corpus::{
    Corpus, CorpusMetadata, CorpusStatistics, Predicate, Retrieval, Scope, sort_class_counts,
};
use crate::error::CorpusError;

#[derive(Debug, Deserialize)]
struct CorpusJson {
    entries: Vec<Entry>,
    #[serde(default)]
    definitions: Vec<Definition>,
    #[serde(default)]
    examples: Vec<Example>,
    #[serde(default)]
    expression_links: Vec<ExpressionLink>,
}

#[derive(Debug, Clone, Deserialize)]
struct ExpressionLink {
    expression_id: EntryId,
    target_lemma: String,
}

/// Dictionary held entirely in memory
#[derive(Default)]
pub struct MemoryCorpus {
    entries: Vec<Entry>,
    definitions: Vec<Definition>,
    examples: Vec<Example>,
    links: Vec<ExpressionLink>,
    /// Lower-cased lemma to entry positions
    lemma_index: HashMap<String, Vec<usize>>,
    id_index: HashMap<EntryId, usize>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON dump with `entries`, `definitions`, `examples`
    /// and `expression_links` arrays
    pub fn from_json(json_str: &str) -> Result<Self, CorpusError> {
        let data: CorpusJson = serde_json::from_str(json_str)?;

        let mut corpus = Self::new();
        for entry in data.entries {
            corpus.insert_entry(entry)?;
        }
        corpus.definitions = data.definitions;
        corpus.examples = data.examples;
        corpus.links = data.expression_links;
        Ok(corpus)
    }

    pub fn insert_entry(&mut self, entry: Entry) -> Result<(), CorpusError> {
        if self.id_index.contains_key(&entry.id) {
            return Err(CorpusError::MalformedRecord {
                id: entry.id,
                reason: "duplicate entry id".to_string(),
            });
        }

        let idx = self.entries.len();
        self.lemma_index
            .entry(entry.lemma.to_lowercase())
            .or_default()
            .push(idx);
        self.id_index.insert(entry.id, idx);
        self.entries.push(entry);
        Ok(())
    }

    pub fn with_entry(mut self, entry: Entry) -> Self {
        if let Err(e) = self.insert_entry(entry) {
            tracing::warn!("Skipping entry: {e}");
        }
        self
    }

    pub fn with_definition(mut self, definition: Definition) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn with_example(mut self, example: Example) -> Self {
        self.examples.push(example);
        self
    }

    /// Cross-link an expression entry to a lemma
    pub fn with_expression_link(mut self, expression_id: EntryId, target_lemma: &str) -> Self {
        self.links.push(ExpressionLink {
            expression_id,
            target_lemma: target_lemma.to_string(),
        });
        self
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.id_index.get(&id).and_then(|&idx| self.entries.get(idx))
    }

    fn definitions_of(&self, id: EntryId) -> impl Iterator<Item = &Definition> {
        self.definitions.iter().filter(move |d| d.entry_id == id)
    }

    fn examples_of(&self, id: EntryId) -> impl Iterator<Item = &Example> {
        self.examples.iter().filter(move |e| e.entry_id == id)
    }

    fn in_scope(&self, entry: &Entry, predicate: &Predicate, scope: Scope) -> bool {
        let test = |value: &str| predicate.test(value);
        match scope {
            Scope::Lemma => test(&entry.lemma),
            Scope::Terms => entry.terms().any(test),
            Scope::AllContent => {
                entry.terms().any(test)
                    || entry.etymology.as_deref().is_some_and(test)
                    || self.definitions_of(entry.id).any(|d| test(&d.content))
                    || self.examples_of(entry.id).any(|e| test(&e.quote))
            }
            Scope::SensesAndLemmas => {
                entry.all_lemmas.iter().any(|l| test(l.as_str()))
                    || self.definitions_of(entry.id).any(|d| test(&d.content))
                    || self.examples_of(entry.id).any(|e| test(&e.quote))
            }
            Scope::Expressions => {
                entry.is_expression()
                    && (test(&entry.lemma) || entry.all_lemmas.iter().any(|l| test(l.as_str())))
            }
        }
    }
}

#[async_trait::async_trait]
impl Corpus for MemoryCorpus {
    async fn fetch_entries(&self, retrieval: &Retrieval) -> Result<Vec<Entry>, CorpusError> {
        let keep_expr = retrieval.include_expr || retrieval.scope == Scope::Expressions;

        // Exact lemma lookups go through the index
        let candidates: Vec<&Entry> = match (&retrieval.predicate, retrieval.scope) {
            (Predicate::Exact(term), Scope::Lemma) => self
                .lemma_index
                .get(&term.to_lowercase())
                .map(|indices| indices.iter().filter_map(|&i| self.entries.get(i)).collect())
                .unwrap_or_default(),
            _ => self
                .entries
                .iter()
                .filter(|e| self.in_scope(e, &retrieval.predicate, retrieval.scope))
                .collect(),
        };

        Ok(candidates
            .into_iter()
            .filter(|e| keep_expr || !e.is_expression())
            .cloned()
            .collect())
    }

    async fn fetch_senses(&self, id: EntryId) -> Result<Senses, CorpusError> {
        if self.entry(id).is_none() {
            return Err(CorpusError::NotFound(id));
        }

        Ok(Senses::new(
            self.definitions_of(id).cloned().collect(),
            self.examples_of(id).cloned().collect(),
        ))
    }

    async fn fetch_examples(&self, needle: &str) -> Result<Vec<ExampleHit>, CorpusError> {
        let predicate = Predicate::Substring(needle.to_string());

        let mut hits: Vec<ExampleHit> = self
            .examples
            .iter()
            .filter(|e| !e.quote.is_empty() && predicate.test(&e.quote))
            .filter_map(|e| {
                self.entry(e.entry_id).map(|owner| ExampleHit {
                    quote: e.quote.clone(),
                    explanation: e.explanation.clone(),
                    lemma: owner.lemma.clone(),
                    word_class: owner.word_class.clone(),
                })
            })
            .collect();

        hits.sort_by(|a, b| a.lemma.cmp(&b.lemma));
        Ok(hits)
    }

    async fn related_expressions(&self, lemma: &str) -> Result<Vec<RelatedExpression>, CorpusError> {
        let mut related: Vec<RelatedExpression> = Vec::new();

        for link in self.links.iter().filter(|l| l.target_lemma == lemma) {
            let Some(expr) = self.entry(link.expression_id) else {
                continue;
            };
            if !expr.is_expression() || related.iter().any(|r| r.entry_id == expr.id) {
                continue;
            }

            let mut definitions: Vec<&Definition> = self.definitions_of(expr.id).collect();
            definitions.sort_by_key(|d| (d.order_num, d.id));

            let senses = definitions
                .into_iter()
                .filter(|d| !d.content.is_empty())
                .map(|d| ExpressionSense {
                    definition_id: d.id,
                    content: d.content.clone(),
                    examples: self
                        .examples_of(expr.id)
                        .filter(|e| e.definition_id == Some(d.id) && !e.quote.is_empty())
                        .cloned()
                        .collect(),
                })
                .collect();

            related.push(RelatedExpression {
                entry_id: expr.id,
                lemma: expr.lemma.clone(),
                senses,
            });
        }

        related.sort_by(|a, b| a.lemma.cmp(&b.lemma));
        Ok(related)
    }

    async fn metadata(&self) -> Result<CorpusMetadata, CorpusError> {
        Ok(CorpusMetadata {
            name: "memory".to_string(),
            entry_count: self.entries.len(),
        })
    }

    async fn statistics(&self) -> Result<CorpusStatistics, CorpusError> {
        let mut counts: HashMap<&WordClass, usize> = HashMap::new();
        for entry in &self.entries {
            *counts.entry(&entry.word_class).or_default() += 1;
        }

        let mut word_classes: Vec<(WordClass, usize)> = counts
            .into_iter()
            .map(|(class, n)| (class.clone(), n))
            .collect();
        sort_class_counts(&mut word_classes);

        Ok(CorpusStatistics {
            metadata: self.metadata().await?,
            definition_count: self.definitions.len(),
            example_count: self.examples.len(),
            word_classes,
        })
    }
}
