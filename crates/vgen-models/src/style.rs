//! Video style definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Visual style requested for a product video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Premium look, slow camera moves
    Luxury,
    /// Clean, plain backgrounds
    #[default]
    Minimal,
    /// Gadget showcase
    Tech,
    /// Product in everyday use
    Lifestyle,
}

impl Style {
    /// All available styles.
    pub const ALL: &'static [Style] = &[Style::Luxury, Style::Minimal, Style::Tech, Style::Lifestyle];

    /// Wire name of the style, as sent in the `style` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Luxury => "luxury",
            Style::Minimal => "minimal",
            Style::Tech => "tech",
            Style::Lifestyle => "lifestyle",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Style {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Style::ALL
            .iter()
            .copied()
            .find(|style| style.as_str() == normalized)
            .ok_or_else(|| StyleParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unknown style: {0}, expected one of luxury, minimal, tech, lifestyle")]
pub struct StyleParseError(String);
