use serde::{Deserialize, Serialize};

fn default_show() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    #[serde(default = "default_show")]
    pub show_inflections: bool,
    #[serde(default = "default_show")]
    pub show_etymology: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_inflections: default_show(),
            show_etymology: default_show(),
        }
    }
}
