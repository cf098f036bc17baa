//! Distance classification and same-location detection.
//!
//! Classification runs an ordered list of rules and the first rule that
//! produces a category wins.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::cities::{extract_city, CityList};
use super::profile::UserProfileView;
use super::{
    component_count, normalize, shares_building, DistanceCategory, CAMPUS_KEYWORDS,
    CENTRAL_INDICATORS,
};

/// Rules evaluated by [`LocationClassifier::classify`], in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceRule {
    /// Same sub-building keyword with an identical building prefix.
    SharedBuilding,
    /// Same campus-like keyword in both locations.
    SharedCampus,
    /// Both cities resolve; compare them.
    CityComparison,
    /// Comma-structure fallback. Always produces a category.
    ComponentFallback,
}

impl DistanceRule {
    pub const ORDER: [DistanceRule; 4] = [
        DistanceRule::SharedBuilding,
        DistanceRule::SharedCampus,
        DistanceRule::CityComparison,
        DistanceRule::ComponentFallback,
    ];

    fn evaluate(
        &self,
        origin: &str,
        destination: &str,
        cities: &CityList,
    ) -> Option<DistanceCategory> {
        match self {
            Self::SharedBuilding => {
                shares_building(origin, destination).then_some(DistanceCategory::SameBuilding)
            }
            Self::SharedCampus => CAMPUS_KEYWORDS
                .iter()
                .any(|k| origin.contains(k) && destination.contains(k))
                .then_some(DistanceCategory::Nearby),
            Self::CityComparison => {
                let origin_city = extract_city(origin, cities)?;
                let destination_city = extract_city(destination, cities)?;
                trace!(%origin_city, %destination_city, "resolved cities");
                if origin_city != destination_city {
                    return Some(DistanceCategory::DifferentCity);
                }
                let central = CENTRAL_INDICATORS
                    .iter()
                    .any(|i| origin.contains(i) || destination.contains(i));
                Some(if central {
                    DistanceCategory::SameCityClose
                } else {
                    DistanceCategory::SameCityFar
                })
            }
            Self::ComponentFallback => {
                let a = component_count(origin);
                let b = component_count(destination);
                let category = if a >= 3 && b >= 3 {
                    DistanceCategory::SameCityFar
                } else if a >= 2 && b >= 2 {
                    DistanceCategory::SameCityClose
                } else {
                    DistanceCategory::Nearby
                };
                debug!(
                    origin_parts = a,
                    destination_parts = b,
                    %category,
                    "no location signal, using component fallback"
                );
                Some(category)
            }
        }
    }
}

/// Location heuristics parameterised by the set of known cities.
#[derive(Debug, Clone, Default)]
pub struct LocationClassifier {
    cities: CityList,
}

impl LocationClassifier {
    pub fn new(cities: CityList) -> Self {
        Self { cities }
    }

    pub fn cities(&self) -> &CityList {
        &self.cities
    }

    /// Bucket the separation between two free-text locations.
    pub fn classify(&self, origin: &str, destination: &str) -> DistanceCategory {
        self.classify_with_rule(origin, destination).0
    }

    /// Like [`classify`](Self::classify), also returning the rule that decided.
    pub fn classify_with_rule(
        &self,
        origin: &str,
        destination: &str,
    ) -> (DistanceCategory, DistanceRule) {
        let origin = normalize(origin);
        let destination = normalize(destination);

        for rule in DistanceRule::ORDER {
            if let Some(category) = rule.evaluate(&origin, &destination, &self.cities) {
                trace!(?rule, %category, "distance classified");
                return (category, rule);
            }
        }
        // ComponentFallback always matches
        (DistanceCategory::Nearby, DistanceRule::ComponentFallback)
    }

    /// Whether the two locations are close enough to need only prep time.
    pub fn is_same_location(
        &self,
        origin: &str,
        destination: &str,
        profile: Option<&dyn UserProfileView>,
    ) -> bool {
        let origin = normalize(origin);
        let destination = normalize(destination);

        if origin == destination {
            return true;
        }
        if destination.is_empty() {
            return true;
        }
        if let Some(profile) = profile {
            let origin_anchor = matching_anchor(&origin, profile);
            if origin_anchor.is_some() && origin_anchor == matching_anchor(&destination, profile) {
                trace!(anchor = ?origin_anchor, "both locations match the same profile anchor");
                return true;
            }
        }
        shares_building(&origin, &destination)
    }
}

/// Shortest location text that may match an anchor by being a fragment of it.
const MIN_ANCHOR_FRAGMENT_CHARS: usize = 8;

/// Index of the first profile anchor that fuzzy-matches `location`.
///
/// A location matches when it contains the anchor, or when it is a fragment
/// of the anchor at least [`MIN_ANCHOR_FRAGMENT_CHARS`] long. Single words
/// such as "oak" or "street" never resolve to an anchor on their own.
fn matching_anchor(location: &str, profile: &dyn UserProfileView) -> Option<usize> {
    if location.is_empty() {
        return None;
    }
    let fragment_ok = location.chars().count() >= MIN_ANCHOR_FRAGMENT_CHARS;
    profile.anchors().iter().position(|anchor| {
        anchor.map(normalize).is_some_and(|anchor| {
            !anchor.is_empty()
                && (location.contains(&anchor) || (fragment_ok && anchor.contains(location)))
        })
    })
}

/// Classify with the default city list.
pub fn classify_distance(origin: &str, destination: &str) -> DistanceCategory {
    LocationClassifier::default().classify(origin, destination)
}

/// Same-location check with the default city list.
pub fn is_same_location(
    origin: &str,
    destination: &str,
    profile: Option<&dyn UserProfileView>,
) -> bool {
    LocationClassifier::default().is_same_location(origin, destination, profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::UserProfile;

    fn profile() -> UserProfile {
        UserProfile {
            location: Some("42 Elm Street, Springfield, IL".into()),
            work_location: Some("Acme Corp".into()),
            university_location: Some("State University".into()),
        }
    }

    #[test]
    fn same_building() {
        assert_eq!(
            classify_distance("Science Hall, Room 101", "science hall, room 230"),
            DistanceCategory::SameBuilding
        );
    }

    #[test]
    fn shared_campus_is_nearby() {
        assert_eq!(
            classify_distance("Library, North Campus", "Gym, North Campus"),
            DistanceCategory::Nearby
        );
        assert_eq!(
            classify_distance("Westfield Mall food court", "Westfield Mall cinema"),
            DistanceCategory::Nearby
        );
    }

    #[test]
    fn campus_beats_city() {
        let (category, rule) = LocationClassifier::default()
            .classify_with_rule("Boston College", "Boston University");
        // "college" vs "university" differ, so the city rule decides
        assert_eq!(rule, DistanceRule::CityComparison);
        assert_eq!(category, DistanceCategory::SameCityFar);

        let (_, rule) = LocationClassifier::default()
            .classify_with_rule("Harvard University, Boston", "MIT university, Cambridge");
        assert_eq!(rule, DistanceRule::SharedCampus);
    }

    #[test]
    fn same_city_far_and_close() {
        assert_eq!(
            classify_distance("1 Main St, Springfield, IL", "99 Oak Ave, Springfield, IL"),
            DistanceCategory::SameCityFar
        );
        assert_eq!(
            classify_distance("Downtown Diner, Springfield, IL", "99 Oak Ave, Springfield, IL"),
            DistanceCategory::SameCityClose
        );
    }

    #[test]
    fn different_cities() {
        assert_eq!(
            classify_distance("Kings Cross London", "Piccadilly Manchester"),
            DistanceCategory::DifferentCity
        );
    }

    #[test]
    fn component_fallback() {
        let classifier = LocationClassifier::default();
        assert_eq!(
            classifier.classify_with_rule("Dentist, Elm Road", "Bakery, Pine Road"),
            (DistanceCategory::SameCityClose, DistanceRule::ComponentFallback)
        );
        assert_eq!(classify_distance("gym", "bakery"), DistanceCategory::Nearby);
        assert_eq!(classify_distance("", ""), DistanceCategory::Nearby);
    }

    #[test]
    fn custom_city_list() {
        let classifier = LocationClassifier::new(CityList::new(["berlin", "munich"]));
        assert_eq!(
            classifier.classify("Alexanderplatz Berlin", "Marienplatz Munich"),
            DistanceCategory::DifferentCity
        );
        assert_eq!(
            classify_distance("Alexanderplatz Berlin", "Marienplatz Munich"),
            DistanceCategory::Nearby
        );
    }

    #[test]
    fn same_location_basic_rules() {
        assert!(is_same_location("Office", "  office ", None));
        assert!(is_same_location("Office", "", None));
        assert!(is_same_location("", "", None));
        assert!(is_same_location("Tower B, Floor 3", "Tower B, Floor 9", None));
        assert!(!is_same_location("Office", "Gym", None));
        assert!(!is_same_location("", "Gym", None));
    }

    #[test]
    fn same_location_profile_anchors() {
        let profile = profile();
        assert!(is_same_location("acme corp", "Acme Corp lobby", Some(&profile)));
        assert!(is_same_location(
            "42 elm street",
            "42 Elm Street, Springfield, IL",
            Some(&profile)
        ));
        assert!(!is_same_location("Acme Corp", "State University", Some(&profile)));
        assert!(!is_same_location("Acme Corp", "Coffee shop", Some(&profile)));
    }

    #[test]
    fn short_fragments_do_not_resolve_to_anchor() {
        let profile = UserProfile {
            location: Some("12 Oak Street".into()),
            ..Default::default()
        };
        assert!(!is_same_location("Oak", "Street", Some(&profile)));
        assert!(!is_same_location("oak st", "12 oak", Some(&profile)));
        assert!(is_same_location("12 oak street", "12 Oak Street garage", Some(&profile)));
        assert!(is_same_location("12 oak street", "12 Oak Street", Some(&profile)));
    }

    #[test]
    fn empty_anchor_never_matches() {
        let profile = UserProfile {
            location: Some(String::new()),
            ..Default::default()
        };
        assert!(!is_same_location("Gym", "Pool", Some(&profile)));
    }
}
