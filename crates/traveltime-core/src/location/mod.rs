//! Free-text location heuristics.
//!
//! This module guesses how far apart two human-entered locations are, and
//! whether they are effectively the same place. It does this without
//! geocoding, using keyword matching, comma-delimited address structure
//! and a list of known cities.

mod cities;
mod classifier;
mod profile;

pub use cities::{extract_city, CityList, DEFAULT_CITIES};
pub use classifier::{classify_distance, is_same_location, DistanceRule, LocationClassifier};
pub use profile::{UserProfile, UserProfileView};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse bucket describing the physical separation of two locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceCategory {
    SameBuilding,
    Nearby,
    SameCityClose,
    SameCityFar,
    DifferentCity,
}

impl DistanceCategory {
    pub const ALL: [DistanceCategory; 5] = [
        DistanceCategory::SameBuilding,
        DistanceCategory::Nearby,
        DistanceCategory::SameCityClose,
        DistanceCategory::SameCityFar,
        DistanceCategory::DifferentCity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameBuilding => "same_building",
            Self::Nearby => "nearby",
            Self::SameCityClose => "same_city_close",
            Self::SameCityFar => "same_city_far",
            Self::DifferentCity => "different_city",
        }
    }
}

impl fmt::Display for DistanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keywords naming a part of a building.
pub(crate) const SUB_BUILDING_KEYWORDS: [&str; 5] = ["room", "floor", "suite", "wing", "section"];

/// Keywords naming a multi-building site where everything is walkable.
pub(crate) const CAMPUS_KEYWORDS: [&str; 5] =
    ["campus", "university", "college", "mall", "business park"];

/// Words suggesting a location is in or close to a city centre.
pub(crate) const CENTRAL_INDICATORS: [&str; 5] =
    ["downtown", "central", "centre", "center", "near"];

/// Lowercased, trimmed form used by every comparison in this module.
pub(crate) fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Number of non-empty comma-delimited components.
pub(crate) fn component_count(normalized: &str) -> usize {
    normalized
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .count()
}

/// Both strings mention the same sub-building keyword, and the text before
/// that keyword matches. Both inputs must already be normalized.
pub(crate) fn shares_building(origin: &str, destination: &str) -> bool {
    SUB_BUILDING_KEYWORDS.iter().any(|keyword| {
        match (origin.find(keyword), destination.find(keyword)) {
            (Some(a), Some(b)) => {
                building_prefix(&origin[..a]) == building_prefix(&destination[..b])
            }
            _ => false,
        }
    })
}

fn building_prefix(text: &str) -> &str {
    text.trim().trim_end_matches(',').trim_end()
}
