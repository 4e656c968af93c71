use ordb_core::{Corpus, Searcher};
use ordb_types::Senses;

use crate::render::Renderer;
use crate::state::AppState;

/// Runs one lookup against a corpus and renders it for the pager
pub struct LookupController<'a, C: Corpus + ?Sized> {
    state: &'a AppState,
    corpus: &'a C,
    renderer: Renderer,
}

impl<'a, C: Corpus + ?Sized> LookupController<'a, C> {
    pub fn new(state: &'a AppState, corpus: &'a C) -> Self {
        Self {
            state,
            corpus,
            renderer: Renderer::new(state.render.clone()),
        }
    }

    pub async fn run(&self, query: &str) -> anyhow::Result<String> {
        if self.state.all_examples {
            self.all_examples(query).await
        } else {
            self.search(query).await
        }
    }

    async fn search(&self, query: &str) -> anyhow::Result<String> {
        let searcher = Searcher::new(self.corpus, self.state.options.clone())?;
        let outcome = searcher.search(query).await?;

        if outcome.results.is_empty() {
            return Ok(self.renderer.no_results());
        }

        let total = outcome.results.len();
        let limit = self.state.limit;
        let shown = total.min(limit);
        let render = &self.state.render;

        let mut parts = vec![self.renderer.header(
            &outcome.query,
            self.state.options.fuzzy_threshold,
            outcome.fell_back,
        )];

        let wants_senses = render.show_definitions || render.show_examples;

        for (i, entry) in outcome.results.iter().take(limit).enumerate() {
            let senses = if wants_senses {
                self.corpus.fetch_senses(entry.id).await?
            } else {
                Senses::default()
            };

            // Linked expressions only under the top result
            let related = if wants_senses && i == 0 && !entry.is_expression() {
                self.corpus.related_expressions(&entry.lemma).await?
            } else {
                Vec::new()
            };

            parts.push(self.renderer.entry(entry, &senses, &related, &outcome.query.term));
            if i + 1 < shown {
                parts.push(self.renderer.separator());
            }
        }

        if let Some(summary) = self.renderer.summary(total, limit) {
            parts.push(summary);
        }

        tracing::info!("Rendered {shown} of {total} results");
        Ok(parts.join("\n"))
    }

    pub async fn statistics(&self) -> anyhow::Result<String> {
        let stats = self.corpus.statistics().await?;
        tracing::info!(
            "Statistics for {}: {} entries",
            stats.metadata.name,
            stats.metadata.entry_count
        );
        Ok(self.renderer.statistics(&stats))
    }

    async fn all_examples(&self, query: &str) -> anyhow::Result<String> {
        let searcher = Searcher::new(self.corpus, self.state.options.clone())?;
        let hits = searcher.all_examples(query).await?;
        tracing::info!("Found {} examples for {query:?}", hits.len());

        Ok(self
            .renderer
            .all_examples(query.trim(), &hits, self.state.limit))
    }
}
