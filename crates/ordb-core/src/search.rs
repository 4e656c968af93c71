use ordb_config::SearchConfig;
use ordb_types::{Entry, ExampleHit, WordClass};

use crate::corpus::Corpus;
use crate::error::{CorpusError, SearchError};
use crate::examples::ExampleFinder;
use crate::matcher::Matcher;
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::query::{self, ParsedQuery, SearchMode};
use crate::rank;
use crate::variants;

/// Mode forced by a command-line flag instead of query syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeOverride {
    ExpressionsOnly,
    Fuzzy,
    Anywhere,
}

impl ModeOverride {
    /// Pick an override from flags; expressions-only, then fuzzy, then anywhere
    pub fn from_flags(expressions_only: bool, fuzzy: bool, anywhere: bool) -> Option<Self> {
        if expressions_only {
            Some(ModeOverride::ExpressionsOnly)
        } else if fuzzy {
            Some(ModeOverride::Fuzzy)
        } else if anywhere {
            Some(ModeOverride::Anywhere)
        } else {
            None
        }
    }

    pub fn mode(&self) -> SearchMode {
        match self {
            ModeOverride::ExpressionsOnly => SearchMode::ExpressionsOnly,
            ModeOverride::Fuzzy => SearchMode::Fuzzy,
            ModeOverride::Anywhere => SearchMode::Anywhere,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub character_replacement: bool,
    pub fuzzy_threshold: f64,
    pub mode_override: Option<ModeOverride>,
    /// Keep only this word class, applied after ranking
    pub word_class: Option<WordClass>,
    /// Retry an empty exact search as a prefix search
    pub prefix_fallback: bool,
}

impl SearchOptions {
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            character_replacement: config.character_replacement,
            fuzzy_threshold: config.fuzzy_threshold,
            mode_override: None,
            word_class: None,
            prefix_fallback: true,
        }
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(SearchError::InvalidThreshold(self.fuzzy_threshold));
        }
        Ok(())
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Mode and term actually searched
    pub query: ParsedQuery,
    pub results: Vec<Entry>,
    /// An empty exact search was retried as a prefix search
    pub fell_back: bool,
}

/// Query pipeline: classify, expand, match, rank, filter
pub struct Searcher<'a, C: Corpus + ?Sized> {
    corpus: &'a C,
    options: SearchOptions,
}

impl<'a, C: Corpus + ?Sized> Searcher<'a, C> {
    pub fn new(corpus: &'a C, options: SearchOptions) -> Result<Self, SearchError> {
        options.validate()?;
        Ok(Self { corpus, options })
    }

    /// Resolve the mode and term for a raw query
    pub fn parse(&self, raw: &str) -> Result<ParsedQuery, SearchError> {
        let cleaned = DefaultPreprocessor.process(raw);
        if cleaned.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        Ok(match self.options.mode_override {
            Some(forced) => ParsedQuery {
                mode: forced.mode(),
                term: cleaned,
            },
            None => query::classify(&cleaned),
        })
    }

    pub async fn search(&self, raw: &str) -> Result<SearchOutcome, SearchError> {
        let parsed = self.parse(raw)?;
        tracing::info!("{} search for {:?}", parsed.mode, parsed.term);

        let mut results = self
            .run(parsed.mode, &parsed.term, parsed.mode.includes_expressions())
            .await?;

        let mut outcome_query = parsed.clone();
        let mut fell_back = false;
        if results.is_empty() && parsed.mode == SearchMode::Exact && self.options.prefix_fallback {
            tracing::info!("No exact matches for {:?}, trying prefix", parsed.term);
            results = self.run(SearchMode::Prefix, &parsed.term, true).await?;
            outcome_query.mode = SearchMode::Prefix;
            fell_back = true;
        }

        if let Some(class) = &self.options.word_class {
            results.retain(|e| &e.word_class == class);
        }

        Ok(SearchOutcome {
            query: outcome_query,
            results,
            fell_back,
        })
    }

    /// Match every variant of `term` in `mode` and rank the hits
    pub async fn run(
        &self,
        mode: SearchMode,
        term: &str,
        include_expr: bool,
    ) -> Result<Vec<Entry>, CorpusError> {
        let variants = variants::expand(term, self.options.character_replacement);
        tracing::debug!("Variants: {variants:?}");

        let matcher = Matcher::new(self.corpus, self.options.fuzzy_threshold);
        let hits = matcher.collect(mode, &variants, include_expr).await?;
        Ok(rank::rank(mode, hits))
    }

    /// Whole-word examples across the dictionary for a raw query
    pub async fn all_examples(&self, raw: &str) -> Result<Vec<ExampleHit>, SearchError> {
        let cleaned = DefaultPreprocessor.process(raw);
        if cleaned.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        Ok(ExampleFinder::new(self.corpus)
            .find(&cleaned, self.options.character_replacement)
            .await?)
    }
}
