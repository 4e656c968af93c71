use serde::{Deserialize, Serialize};

fn default_character_replacement() -> bool {
    true
}

fn default_fuzzy_threshold() -> f64 {
    0.6
}

fn default_limit() -> usize {
    50
}

fn default_limit_with_pagination() -> usize {
    500
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Also try aa→å, oe→ø and ae→æ spellings of the query
    #[serde(default = "default_character_replacement")]
    pub character_replacement: bool,
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Result limit used instead of `default_limit` when output is paged
    #[serde(default = "default_limit_with_pagination")]
    pub limit_with_pagination: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            character_replacement: default_character_replacement(),
            fuzzy_threshold: default_fuzzy_threshold(),
            default_limit: default_limit(),
            limit_with_pagination: default_limit_with_pagination(),
        }
    }
}
