use std::path::PathBuf;

use clap::Parser;
use ordb_core::ModeOverride;
use ordb_pager::PagerOverrides;
use ordb_types::WordClass;

use crate::render::Focus;

/// Norwegian (bokmål) dictionary search
#[derive(Parser, Debug)]
#[command(name = "ordb", version)]
#[command(after_help = "Query syntax:\n  \
    ære@     terms starting with \"ære\"\n  \
    @ære     terms containing \"ære\" (same as @ære@)\n  \
    %ære     all content, definitions and examples included\n\n\
    aa, oe and ae are also tried as å, ø and æ.")]
pub struct Args {
    /// Search term
    #[arg(required_unless_present = "stats")]
    pub query: Option<String>,

    /// Fuzzy matching on lemmas
    #[arg(short = 'f', long)]
    pub fuzzy: bool,

    /// Search definitions, examples and alternate lemmas
    #[arg(short = 'a', long)]
    pub anywhere: bool,

    /// Search expressions only
    #[arg(short = 'x', long)]
    pub expressions_only: bool,

    /// Every example in the dictionary using the term as a whole word
    #[arg(long)]
    pub all_examples: bool,

    /// Similarity threshold for fuzzy matching (0.0-1.0)
    #[arg(short = 't', long)]
    pub threshold: Option<f64>,

    /// Maximum number of results to show
    #[arg(long)]
    pub limit: Option<usize>,

    /// Only adjectives
    #[arg(long, conflicts_with_all = ["verb", "noun", "adv"])]
    pub adj: bool,

    /// Only verbs
    #[arg(long, conflicts_with_all = ["adj", "noun", "adv"])]
    pub verb: bool,

    /// Only nouns
    #[arg(long, conflicts_with_all = ["adj", "verb", "adv"])]
    pub noun: bool,

    /// Only adverbs
    #[arg(long, conflicts_with_all = ["adj", "verb", "noun"])]
    pub adv: bool,

    /// Hide definitions
    #[arg(long)]
    pub no_definitions: bool,

    /// Hide examples
    #[arg(long)]
    pub no_examples: bool,

    /// Show only examples, those of linked expressions included
    #[arg(long)]
    pub only_examples: bool,

    /// Show only etymology
    #[arg(short = 'e', long)]
    pub only_etymology: bool,

    /// Show only inflections, one category per line
    #[arg(short = 'i', long)]
    pub only_inflections: bool,

    /// Maximum examples per definition
    #[arg(long)]
    pub max_examples: Option<usize>,

    /// Dictionary statistics instead of a search
    #[arg(short = 's', long)]
    pub stats: bool,

    /// Dictionary database file
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Config file (default: ~/.ordb/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Force pagination on
    #[arg(short = 'p', long)]
    pub paginate: bool,

    /// Force pagination off, wins over --paginate
    #[arg(short = 'P', long)]
    pub no_paginate: bool,

    /// Debug logging to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Args {
    pub fn mode_override(&self) -> Option<ModeOverride> {
        ModeOverride::from_flags(self.expressions_only, self.fuzzy, self.anywhere)
    }

    pub fn word_class(&self) -> Option<WordClass> {
        [
            (self.adj, WordClass::Adj),
            (self.verb, WordClass::Verb),
            (self.noun, WordClass::Noun),
            (self.adv, WordClass::Adv),
        ]
        .into_iter()
        .find_map(|(set, class)| set.then_some(class))
    }

    /// Narrowed display; `--only-examples` beats `-e`, which beats `-i`
    pub fn focus(&self) -> Focus {
        if self.only_examples {
            Focus::Examples
        } else if self.only_etymology {
            Focus::Etymology
        } else if self.only_inflections {
            Focus::Inflections
        } else {
            Focus::Full
        }
    }

    pub fn pager_overrides(&self) -> PagerOverrides {
        PagerOverrides {
            force_paginate: self.paginate,
            force_no_paginate: self.no_paginate,
        }
    }

    /// Default log filter when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}
