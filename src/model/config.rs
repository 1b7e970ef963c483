use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from `.stask.toml` in the task root. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Editor command, e.g. `"nvim"` or `"code --wait"`.
    /// Takes precedence over `$EDITOR` and `$VISUAL`.
    #[serde(default)]
    pub editor: Option<String>,
    /// Program used to open a task directory in a file browser
    #[serde(default)]
    pub opener: Option<String>,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme color overrides, `name = "#RRGGBB"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Per-status row colors (`todo`, `done`, `pending`)
    #[serde(default)]
    pub status_colors: HashMap<String, String>,
}
