//! City extraction from free-text addresses.

use serde::{Deserialize, Serialize};

/// Major cities recognised when an address has no usable comma structure.
pub const DEFAULT_CITIES: &[&str] = &[
    // United States
    "new york",
    "los angeles",
    "chicago",
    "houston",
    "phoenix",
    "philadelphia",
    "san antonio",
    "san diego",
    "dallas",
    "san jose",
    "austin",
    "seattle",
    "denver",
    "boston",
    "washington",
    "atlanta",
    "miami",
    "san francisco",
    "portland",
    "las vegas",
    "detroit",
    "minneapolis",
    // United Kingdom
    "london",
    "manchester",
    "birmingham",
    "liverpool",
    "leeds",
    "glasgow",
    "edinburgh",
    "bristol",
    // Australia
    "sydney",
    "melbourne",
    "brisbane",
    "perth",
    "adelaide",
    "canberra",
    // Canada
    "toronto",
    "vancouver",
    "montreal",
    "calgary",
    "ottawa",
];

/// Lowercased list of known city names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CityList(Vec<String>);

impl From<Vec<String>> for CityList {
    fn from(cities: Vec<String>) -> Self {
        Self::new(cities)
    }
}

impl From<CityList> for Vec<String> {
    fn from(list: CityList) -> Self {
        list.0
    }
}

impl Default for CityList {
    fn default() -> Self {
        Self::new(DEFAULT_CITIES.iter().copied())
    }
}

impl CityList {
    pub fn new<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            cities
                .into_iter()
                .map(|c| c.as_ref().trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Longest known city occurring in `normalized`, so "new york" wins
    /// over a bare "york".
    pub fn find_in(&self, normalized: &str) -> Option<&str> {
        self.iter()
            .filter(|city| normalized.contains(city))
            .max_by_key(|city| city.len())
    }
}

/// Resolve the city of a normalized address.
///
/// Addresses with at least three comma-delimited components are read as
/// `street, city, region`: the second-to-last component is the city. Shorter
/// addresses fall back to the known-city list.
pub fn extract_city(normalized: &str, cities: &CityList) -> Option<String> {
    let parts: Vec<&str> = normalized.split(',').map(str::trim).collect();
    if parts.len() >= 3 {
        let candidate = parts[parts.len() - 2];
        if !candidate.is_empty() {
            return Some(candidate.to_string());
        }
    }
    cities.find_in(normalized).map(str::to_string)
}
