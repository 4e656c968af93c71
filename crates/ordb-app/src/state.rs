use anyhow::Context;
use ordb_config::Config;
use ordb_core::SearchOptions;
use ordb_pager::Pager;

use crate::cli::Args;
use crate::render::{Focus, RenderOptions};

/// Everything one run needs, resolved from config and flags
pub struct AppState {
    pub config: Config,
    pub options: SearchOptions,
    pub render: RenderOptions,
    pub pager: Pager,
    pub limit: usize,
    pub all_examples: bool,
}

impl AppState {
    /// Apply command-line overrides on top of the loaded config
    pub fn new(args: &Args, mut config: Config) -> anyhow::Result<Self> {
        if let Some(db) = &args.db {
            config.database_path = db.clone();
        }
        if let Some(threshold) = args.threshold {
            config.search.fuzzy_threshold = threshold;
        }
        config.validate().context("Invalid settings")?;

        let mut options = SearchOptions::from_config(&config.search);
        options.mode_override = args.mode_override();
        options.word_class = args.word_class();
        options.validate()?;

        let pager = Pager::new(&config.pager, args.pager_overrides());
        let limit = args.limit.unwrap_or_else(|| config.result_limit(pager.enabled()));

        let focus = args.focus();
        let render = RenderOptions {
            focus,
            show_definitions: focus == Focus::Full && !args.no_definitions,
            show_examples: match focus {
                Focus::Full => !args.no_examples,
                Focus::Examples => true,
                Focus::Etymology | Focus::Inflections => false,
            },
            max_examples: args.max_examples,
            show_inflections: config.display.show_inflections,
            show_etymology: config.display.show_etymology,
        };

        tracing::debug!(
            "Limit {limit}, override {:?}, word class {:?}",
            options.mode_override,
            options.word_class
        );

        Ok(Self {
            config,
            options,
            render,
            pager,
            limit,
            all_examples: args.all_examples,
        })
    }
}
