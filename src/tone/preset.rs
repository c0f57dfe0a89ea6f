//! Named tone presets.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::ToneCoordinate;

/// Named shortcut to a fixed tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TonePreset {
    /// Professional and concise.
    Executive,
    /// Professional and detailed.
    Technical,
    /// Balanced formality, detailed.
    Educational,
    /// Casual and concise.
    Basic,
}

impl TonePreset {
    /// Every preset, in display order.
    pub const ALL: [Self; 4] = [
        Self::Executive,
        Self::Technical,
        Self::Educational,
        Self::Basic,
    ];

    /// Lower-case preset name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Executive => "executive",
            Self::Technical => "technical",
            Self::Educational => "educational",
            Self::Basic => "basic",
        }
    }

    /// Canonical tone description sent to the model.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Executive => "authoritative, concise, and professional with executive presence",
            Self::Technical => "precise, detailed, and technically accurate with clear explanations",
            Self::Educational => "clear, informative, and accessible for learning purposes",
            Self::Basic => "simple, straightforward, and easy to understand",
        }
    }

    /// Canonical point on the tone plane.
    #[must_use]
    pub const fn coordinate(self) -> ToneCoordinate {
        match self {
            Self::Executive => ToneCoordinate::new(0.85, 0.25),
            Self::Technical => ToneCoordinate::new(0.75, 0.85),
            Self::Educational => ToneCoordinate::new(0.55, 0.75),
            Self::Basic => ToneCoordinate::new(0.25, 0.25),
        }
    }
}

impl fmt::Display for TonePreset {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Parse error for [`TonePreset`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown tone preset '{value}': valid options are 'executive', 'technical', \
     'educational' or 'basic'"
)]
pub struct TonePresetParseError {
    value: String,
}

impl FromStr for TonePreset {
    type Err = TonePresetParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|preset| preset.label() == normalised)
            .ok_or_else(|| TonePresetParseError {
                value: value.to_owned(),
            })
    }
}
