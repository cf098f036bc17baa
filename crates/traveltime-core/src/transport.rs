//! Transport methods.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Mode of travel chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMethod {
    Walking,
    Cycling,
    Car,
    PublicTransport,
}

impl TransportMethod {
    /// All methods, in display order.
    pub const ALL: [TransportMethod; 4] = [
        TransportMethod::Walking,
        TransportMethod::Cycling,
        TransportMethod::Car,
        TransportMethod::PublicTransport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Cycling => "cycling",
            Self::Car => "car",
            Self::PublicTransport => "public_transport",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Walking => "Walking",
            Self::Cycling => "Cycling",
            Self::Car => "Car",
            Self::PublicTransport => "Public transport",
        }
    }
}

impl fmt::Display for TransportMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "walking" | "walk" | "foot" => Ok(Self::Walking),
            "cycling" | "cycle" | "bike" | "bicycle" => Ok(Self::Cycling),
            "car" | "drive" | "driving" => Ok(Self::Car),
            "publictransport" | "transit" | "bus" | "train" | "public" => {
                Ok(Self::PublicTransport)
            }
            _ => Err(ValidationError::UnknownTransportMethod(s.to_string())),
        }
    }
}
