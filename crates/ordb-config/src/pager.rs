use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_clear_screen() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PagerConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Lines per page, 0 = detect from the terminal
    #[serde(default)]
    pub page_size: usize,
    /// Clear the screen between pages
    #[serde(default = "default_clear_screen")]
    pub clear_screen: bool,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            page_size: 0,
            clear_screen: default_clear_screen(),
        }
    }
}
