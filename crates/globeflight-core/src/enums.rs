//! Enumeration types used throughout the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseLocationError;

/// Phase of the map → globe → flight cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationPhase {
    /// Flat map shown, waiting for a selection.
    #[default]
    Idle,
    /// Flat map morphing into the globe.
    Morphing,
    /// Globe rotating along the great circle toward the target.
    Flying,
    /// Target reached; host notified. Resets to `Idle` within the same tick.
    Arrived,
}

impl AnimationPhase {
    /// Whether an animation clock is expected to be running in this phase.
    pub fn is_animating(self) -> bool {
        matches!(self, AnimationPhase::Morphing | AnimationPhase::Flying)
    }
}

/// Places the host offers as destinations.
///
/// Serialized as ISO 3166-1 alpha-2 codes. Display names live in
/// [`crate::labels`] and are never used as keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocationId {
    #[serde(rename = "KR")]
    Korea,
    #[serde(rename = "US")]
    UnitedStates,
    #[serde(rename = "JP")]
    Japan,
    #[serde(rename = "AU")]
    Australia,
    #[serde(rename = "CN")]
    China,
    #[serde(rename = "PH")]
    Philippines,
    #[serde(rename = "LA")]
    Laos,
    #[serde(rename = "GB")]
    UnitedKingdom,
    #[serde(rename = "FR")]
    France,
    #[serde(rename = "IT")]
    Italy,
    #[serde(rename = "CH")]
    Switzerland,
    #[serde(rename = "DE")]
    Germany,
    #[serde(rename = "EG")]
    Egypt,
}

impl LocationId {
    pub const ALL: [LocationId; 13] = [
        LocationId::Korea,
        LocationId::UnitedStates,
        LocationId::Japan,
        LocationId::Australia,
        LocationId::China,
        LocationId::Philippines,
        LocationId::Laos,
        LocationId::UnitedKingdom,
        LocationId::France,
        LocationId::Italy,
        LocationId::Switzerland,
        LocationId::Germany,
        LocationId::Egypt,
    ];

    /// ISO 3166-1 alpha-2 code.
    pub fn code(self) -> &'static str {
        match self {
            LocationId::Korea => "KR",
            LocationId::UnitedStates => "US",
            LocationId::Japan => "JP",
            LocationId::Australia => "AU",
            LocationId::China => "CN",
            LocationId::Philippines => "PH",
            LocationId::Laos => "LA",
            LocationId::UnitedKingdom => "GB",
            LocationId::France => "FR",
            LocationId::Italy => "IT",
            LocationId::Switzerland => "CH",
            LocationId::Germany => "DE",
            LocationId::Egypt => "EG",
        }
    }

    /// ISO 3166-1 numeric code, the key used by world boundary datasets.
    pub fn iso_numeric(self) -> u16 {
        match self {
            LocationId::Korea => 410,
            LocationId::UnitedStates => 840,
            LocationId::Japan => 392,
            LocationId::Australia => 36,
            LocationId::China => 156,
            LocationId::Philippines => 608,
            LocationId::Laos => 418,
            LocationId::UnitedKingdom => 826,
            LocationId::France => 250,
            LocationId::Italy => 380,
            LocationId::Switzerland => 756,
            LocationId::Germany => 276,
            LocationId::Egypt => 818,
        }
    }

    /// Reverse of [`LocationId::iso_numeric`]. `None` for places that are not serviced.
    pub fn from_iso_numeric(code: u16) -> Option<LocationId> {
        Self::ALL.into_iter().find(|id| id.iso_numeric() == code)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LocationId {
    type Err = ParseLocationError;

    /// Accepts alpha-2 codes in any case, or a numeric code such as `"036"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(numeric) = trimmed.parse::<u16>() {
            return Self::from_iso_numeric(numeric)
                .ok_or_else(|| ParseLocationError(trimmed.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|id| id.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLocationError(trimmed.to_string()))
    }
}

/// Display language for location labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    English,
    Korean,
}
