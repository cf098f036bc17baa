//! User location hints.

use serde::{Deserialize, Serialize};

/// Read-only view of the places a user goes regularly.
///
/// The estimator only uses these as hints for same-location detection.
/// Empty strings are treated the same as `None`.
pub trait UserProfileView {
    /// Home location.
    fn location(&self) -> Option<&str>;

    fn work_location(&self) -> Option<&str>;

    fn university_location(&self) -> Option<&str>;

    /// Anchors in match priority order: home, work, university.
    fn anchors(&self) -> [Option<&str>; 3] {
        [
            self.location(),
            self.work_location(),
            self.university_location(),
        ]
    }
}

/// Stored profile, persisted in the `[profile]` table of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub work_location: Option<String>,
    #[serde(default)]
    pub university_location: Option<String>,
}

impl UserProfile {
    pub fn is_empty(&self) -> bool {
        self.anchors().iter().all(Option::is_none)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl UserProfileView for UserProfile {
    fn location(&self) -> Option<&str> {
        non_empty(&self.location)
    }

    fn work_location(&self) -> Option<&str> {
        non_empty(&self.work_location)
    }

    fn university_location(&self) -> Option<&str> {
        non_empty(&self.university_location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_absent() {
        let profile = UserProfile {
            location: Some("   ".into()),
            work_location: Some("Acme HQ".into()),
            university_location: None,
        };
        assert_eq!(profile.anchors(), [None, Some("Acme HQ"), None]);
        assert!(!profile.is_empty());
        assert!(UserProfile::default().is_empty());
    }
}
