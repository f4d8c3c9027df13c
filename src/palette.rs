//! Chart series colors as injected configuration.
//!
//! The rendering layer cycles through whatever tokens the caller supplies;
//! nothing in the core depends on the tokens being HSL, hex, or theme names.

use serde::{Deserialize, Serialize};

const DEFAULT_COLORS: &[&str] = &[
    "hsl(173, 80%, 40%)",
    "hsl(38, 92%, 50%)",
    "hsl(350, 89%, 60%)",
    "hsl(262, 83%, 58%)",
    "hsl(142, 71%, 45%)",
    "hsl(199, 89%, 48%)",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Palette {
    /// An empty token list falls back to the default palette so indexing is
    /// always defined.
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn color(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }
}
