//! The edge attribute a shortest-path search minimises.

use std::str::FromStr;

use crate::{CoreError, CoreResult};

/// Edge weight used as the shortest-path cost.
///
/// Parsed from the attribute names the API layer sends (`"travel_time"`,
/// `"length"`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Weight {
    /// Free-flow travel time in seconds.
    #[default]
    TravelTime,
    /// Physical length in metres.
    Length,
}

impl Weight {
    pub fn as_str(self) -> &'static str {
        match self {
            Weight::TravelTime => "travel_time",
            Weight::Length     => "length",
        }
    }
}

impl FromStr for Weight {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim() {
            "travel_time" => Ok(Weight::TravelTime),
            "length"      => Ok(Weight::Length),
            other         => Err(CoreError::UnknownWeight(other.to_owned())),
        }
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
