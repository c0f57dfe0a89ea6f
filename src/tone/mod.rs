//! Tone selection and natural-language tone descriptions.
//!
//! A tone is picked either as a point on the formality × detail plane or as
//! a named preset. Both forms resolve to a [`ToneDescription`] whose
//! `description` string is what the language model is asked to match.
//!
//! The x axis runs from casual (`0.0`) to professional (`1.0`); the y axis
//! runs from concise (`0.0`) to expanded (`1.0`). Coordinates outside the
//! unit square are clamped rather than rejected.

mod preset;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use preset::{TonePreset, TonePresetParseError};

/// Description used whenever no usable tone was supplied.
pub const NEUTRAL_DESCRIPTION: &str = "neutral and balanced";

const LOWER_THRESHOLD: f64 = 0.33;
const UPPER_THRESHOLD: f64 = 0.66;

/// A point on the formality × detail plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneCoordinate {
    /// Formality, from casual (`0.0`) to professional (`1.0`).
    pub x: f64,
    /// Level of detail, from concise (`0.0`) to expanded (`1.0`).
    pub y: f64,
}

impl ToneCoordinate {
    /// Centre of the plane, used for unknown presets.
    pub const NEUTRAL: Self = Self::new(0.5, 0.5);

    /// Creates a coordinate without clamping.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns a copy with both axes clamped into `[0, 1]`.
    ///
    /// A `NaN` axis carries no position, so it is placed at the centre.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            x: clamp_axis(self.x),
            y: clamp_axis(self.y),
        }
    }

    /// Returns true when both axes are finite and inside `[0, 1]`.
    #[must_use]
    pub fn is_within_bounds(self) -> bool {
        axis_within_bounds(self.x) && axis_within_bounds(self.y)
    }
}

fn clamp_axis(value: f64) -> f64 {
    if value.is_nan() {
        0.5
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn axis_within_bounds(value: f64) -> bool {
    value.is_finite() && value >= 0.0 && value <= 1.0
}

/// Coordinates as supplied by a caller, where either axis may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ToneAxes {
    /// Formality axis, if supplied.
    pub x: Option<f64>,
    /// Detail axis, if supplied.
    pub y: Option<f64>,
}

impl ToneAxes {
    /// Creates axes with both values present.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Returns the clamped coordinate, or `None` when either axis is missing
    /// or not a number.
    #[must_use]
    pub fn coordinate(self) -> Option<ToneCoordinate> {
        let x = self.x.filter(|value| !value.is_nan())?;
        let y = self.y.filter(|value| !value.is_nan())?;
        Some(ToneCoordinate::new(x, y).clamped())
    }
}

/// The tone a caller asked for, after resolving precedence.
///
/// A preset wins over coordinates. Preset names are kept verbatim so that
/// unrecognised names still round-trip into cache keys and logs.
#[derive(Debug, Clone, PartialEq)]
pub enum ToneSelection {
    /// A named preset, recognised or not.
    Preset(String),
    /// A clamped coordinate.
    Coordinates(ToneCoordinate),
    /// Nothing usable was supplied.
    Neutral,
}

impl ToneSelection {
    /// Resolves a selection from optional coordinates and preset name.
    ///
    /// Blank preset names are treated as absent.
    #[must_use]
    pub fn resolve(axes: Option<ToneAxes>, preset: Option<&str>) -> Self {
        if let Some(name) = preset.filter(|name| !name.trim().is_empty()) {
            return Self::Preset(name.to_owned());
        }

        axes.and_then(ToneAxes::coordinate)
            .map_or(Self::Neutral, Self::Coordinates)
    }

    /// Returns the recognised preset, if this selection names one.
    #[must_use]
    pub fn preset(&self) -> Option<TonePreset> {
        match self {
            Self::Preset(name) => name.parse().ok(),
            Self::Coordinates(_) | Self::Neutral => None,
        }
    }

    /// Returns the point on the plane this selection corresponds to.
    ///
    /// Unknown presets and the neutral selection map to the centre.
    #[must_use]
    pub fn coordinate(&self) -> ToneCoordinate {
        match self {
            Self::Preset(_) => self
                .preset()
                .map_or(ToneCoordinate::NEUTRAL, TonePreset::coordinate),
            Self::Coordinates(coordinate) => *coordinate,
            Self::Neutral => ToneCoordinate::NEUTRAL,
        }
    }
}

/// Tier of a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisTier {
    /// Below the lower threshold.
    Low,
    /// From the lower threshold up to (not including) the upper threshold.
    Mid,
    /// At or above the upper threshold.
    High,
}

impl AxisTier {
    /// Buckets an already-clamped axis value.
    ///
    /// The thresholds are exclusive upper bounds, so `0.33` is `Mid` and
    /// `0.66` is `High`.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value < LOWER_THRESHOLD {
            Self::Low
        } else if value < UPPER_THRESHOLD {
            Self::Mid
        } else {
            Self::High
        }
    }

    const fn formality_phrase(self) -> &'static str {
        match self {
            Self::Low => "very casual and conversational",
            Self::Mid => "moderately professional",
            Self::High => "highly professional and formal",
        }
    }

    const fn detail_phrase(self) -> &'static str {
        match self {
            Self::Low => "very concise and to-the-point",
            Self::Mid => "moderately detailed",
            Self::High => "comprehensive and expanded with rich detail",
        }
    }
}

/// Natural-language tone description plus per-axis display labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToneDescription {
    /// Instruction-ready description, e.g. `"moderately professional,
    /// moderately detailed"`.
    pub description: String,
    /// Capitalised formality label for display.
    pub formality: String,
    /// Capitalised detail label for display.
    pub detail: String,
}

impl ToneDescription {
    fn neutral() -> Self {
        Self {
            description: NEUTRAL_DESCRIPTION.to_owned(),
            formality: "Neutral".to_owned(),
            detail: "Balanced".to_owned(),
        }
    }

    fn from_tiers(formality: AxisTier, detail: AxisTier) -> (String, String) {
        (
            capitalise(formality.formality_phrase()),
            capitalise(detail.detail_phrase()),
        )
    }

    /// Returns the description string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.description.as_str()
    }
}

impl fmt::Display for ToneDescription {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Maps a tone selection to its description.
///
/// Total and deterministic: every selection yields a non-empty description.
#[must_use]
pub fn describe_tone(selection: &ToneSelection) -> ToneDescription {
    match selection {
        ToneSelection::Preset(_) => selection
            .preset()
            .map_or_else(ToneDescription::neutral, describe_preset),
        ToneSelection::Coordinates(coordinate) => {
            let clamped = coordinate.clamped();
            let formality_tier = AxisTier::of(clamped.x);
            let detail_tier = AxisTier::of(clamped.y);
            let (formality, detail) = ToneDescription::from_tiers(formality_tier, detail_tier);
            ToneDescription {
                description: format!(
                    "{}, {}",
                    formality_tier.formality_phrase(),
                    detail_tier.detail_phrase()
                ),
                formality,
                detail,
            }
        }
        ToneSelection::Neutral => ToneDescription::neutral(),
    }
}

fn describe_preset(preset: TonePreset) -> ToneDescription {
    let coordinate = preset.coordinate();
    let (formality, detail) =
        ToneDescription::from_tiers(AxisTier::of(coordinate.x), AxisTier::of(coordinate.y));
    ToneDescription {
        description: preset.description().to_owned(),
        formality,
        detail,
    }
}

fn capitalise(phrase: &str) -> String {
    let mut characters = phrase.chars();
    characters.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(characters).collect()
    })
}
