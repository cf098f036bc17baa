//! Travel time estimation pipeline.
//!
//! ```text
//! same-location check ──(same)──> prep time
//!        │
//!        └─> classify distance -> base lookup -> time of day -> day of week
//!            -> season -> bounds clamp
//! ```
//!
//! The pipeline is linear and total: any input produces a number of minutes.
//! It reads no clock; the event time is the only time input.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::adjust::{
    AdjusterStage, ContextAdjuster, DayOfWeekAdjuster, SeasonAdjuster, TimeOfDayAdjuster,
};
use crate::location::{DistanceCategory, DistanceRule, LocationClassifier, UserProfileView};
use crate::storage::EstimatorConfig;
use crate::tables::{BaseTimeTable, BoundsTable};
use crate::transport::TransportMethod;

/// Inputs for a single estimate.
#[derive(Clone, Copy)]
pub struct EstimateRequest<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
    pub transport_method: TransportMethod,
    /// Local wall-clock time of the event being travelled to.
    pub event_time: NaiveDateTime,
    pub profile: Option<&'a dyn UserProfileView>,
}

impl<'a> EstimateRequest<'a> {
    pub fn new(
        origin: &'a str,
        destination: &'a str,
        transport_method: TransportMethod,
        event_time: NaiveDateTime,
    ) -> Self {
        Self {
            origin,
            destination,
            transport_method,
            event_time,
            profile: None,
        }
    }

    pub fn with_profile(mut self, profile: &'a dyn UserProfileView) -> Self {
        self.profile = Some(profile);
        self
    }
}

/// Outcome of one adjuster stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    pub stage: AdjusterStage,
    pub factor: f64,
    /// Minutes after this stage, truncated.
    pub minutes: u32,
}

/// An estimate together with how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub transport_method: TransportMethod,
    pub minutes: u32,
    /// The same-location short-circuit fired; nothing below is populated.
    pub same_location: bool,
    pub category: Option<DistanceCategory>,
    pub rule: Option<DistanceRule>,
    pub base_minutes: Option<u32>,
    /// False when the base table had no entry and the default was used.
    pub base_from_table: bool,
    pub stages: Vec<StageResult>,
    pub clamped: bool,
}

impl Estimate {
    fn prep_time(transport_method: TransportMethod, minutes: u32) -> Self {
        Self {
            transport_method,
            minutes,
            same_location: true,
            category: None,
            rule: None,
            base_minutes: None,
            base_from_table: false,
            stages: Vec::new(),
            clamped: false,
        }
    }

    /// Latest time to set off to arrive by `event_time`.
    pub fn departure_time(&self, event_time: NaiveDateTime) -> NaiveDateTime {
        event_time - Duration::minutes(i64::from(self.minutes))
    }

    /// Minutes before the bounds clamp.
    pub fn unclamped_minutes(&self) -> Option<u32> {
        self.stages.last().map(|s| s.minutes)
    }
}

/// Immutable estimator service.
///
/// Holds the lookup tables and location heuristics built from an
/// [`EstimatorConfig`]. Cheap to share; estimation takes `&self`.
#[derive(Debug, Clone)]
pub struct TravelTimeEstimator {
    classifier: LocationClassifier,
    base_times: BaseTimeTable,
    bounds: BoundsTable,
    prep_time_minutes: u32,
    default_base_minutes: u32,
    time_of_day: TimeOfDayAdjuster,
    day_of_week: DayOfWeekAdjuster,
    season: SeasonAdjuster,
}

impl Default for TravelTimeEstimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}

impl TravelTimeEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            classifier: LocationClassifier::new(config.known_cities),
            base_times: config.base_times,
            bounds: config.bounds,
            prep_time_minutes: config.prep_time_minutes,
            default_base_minutes: config.default_base_minutes,
            time_of_day: TimeOfDayAdjuster,
            day_of_week: DayOfWeekAdjuster,
            season: SeasonAdjuster::new(config.hemisphere),
        }
    }

    pub fn classifier(&self) -> &LocationClassifier {
        &self.classifier
    }

    /// Adjusters in application order.
    fn adjusters(&self) -> [&dyn ContextAdjuster; 3] {
        [&self.time_of_day, &self.day_of_week, &self.season]
    }

    /// Estimated travel minutes.
    pub fn estimate(&self, request: &EstimateRequest<'_>) -> u32 {
        self.explain(request).minutes
    }

    /// Run the pipeline and keep every intermediate value.
    pub fn explain(&self, request: &EstimateRequest<'_>) -> Estimate {
        let method = request.transport_method;

        if self
            .classifier
            .is_same_location(request.origin, request.destination, request.profile)
        {
            debug!(%method, minutes = self.prep_time_minutes, "same location, using prep time");
            return Estimate::prep_time(method, self.prep_time_minutes);
        }

        let (category, rule) = self
            .classifier
            .classify_with_rule(request.origin, request.destination);

        let (base, base_from_table) = match self.base_times.get(method, category) {
            Some(minutes) => (minutes, true),
            None => {
                debug!(
                    %method,
                    %category,
                    default = self.default_base_minutes,
                    "no base time entry, using default"
                );
                (self.default_base_minutes, false)
            }
        };
        trace!(%method, %category, base, "base time");

        let mut minutes = base;
        let mut stages = Vec::with_capacity(AdjusterStage::ORDER.len());
        for adjuster in self.adjusters() {
            let factor = adjuster.factor(request.event_time, method);
            minutes = adjuster.apply(minutes, request.event_time, method);
            trace!(stage = ?adjuster.stage(), factor, minutes, "adjusted");
            stages.push(StageResult {
                stage: adjuster.stage(),
                factor,
                minutes,
            });
        }

        let clamped_minutes = self.bounds.apply(method, minutes);
        debug!(
            %method,
            %category,
            base,
            adjusted = minutes,
            minutes = clamped_minutes,
            "estimated travel time"
        );

        Estimate {
            transport_method: method,
            minutes: clamped_minutes,
            same_location: false,
            category: Some(category),
            rule: Some(rule),
            base_minutes: Some(base),
            base_from_table,
            stages,
            clamped: clamped_minutes != minutes,
        }
    }

    /// Explained estimates for every transport method, in
    /// [`TransportMethod::ALL`] order.
    pub fn compare(
        &self,
        origin: &str,
        destination: &str,
        event_time: NaiveDateTime,
        profile: Option<&dyn UserProfileView>,
    ) -> Vec<Estimate> {
        TransportMethod::ALL
            .iter()
            .map(|&method| {
                let request = EstimateRequest {
                    origin,
                    destination,
                    transport_method: method,
                    event_time,
                    profile,
                };
                self.explain(&request)
            })
            .collect()
    }
}

/// Estimate with the built-in configuration.
pub fn estimate_travel_time(
    origin: &str,
    destination: &str,
    transport_method: TransportMethod,
    event_time: NaiveDateTime,
    profile: Option<&dyn UserProfileView>,
) -> u32 {
    let request = EstimateRequest {
        origin,
        destination,
        transport_method,
        event_time,
        profile,
    };
    TravelTimeEstimator::default().estimate(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::UserProfile;
    use chrono::NaiveDate;

    const FAR_A: &str = "1 Main St, Springfield, IL";
    const FAR_B: &str = "99 Oak Ave, Springfield, IL";

    fn at(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn identical_locations_short_circuit() {
        let estimator = TravelTimeEstimator::default();
        let request =
            EstimateRequest::new("Office", "office", TransportMethod::Car, at(2025, 1, 7, 8, 0));
        let estimate = estimator.explain(&request);
        assert!(estimate.same_location);
        assert_eq!(estimate.minutes, 8);
        assert!(estimate.stages.is_empty());
    }

    #[test]
    fn car_rush_hour_pipeline() {
        // Tuesday in autumn: only the time of day matters
        let estimator = TravelTimeEstimator::default();
        let request =
            EstimateRequest::new(FAR_A, FAR_B, TransportMethod::Car, at(2025, 10, 7, 8, 0));
        let estimate = estimator.explain(&request);

        assert_eq!(estimate.category, Some(DistanceCategory::SameCityFar));
        assert_eq!(estimate.base_minutes, Some(20));
        assert_eq!(
            estimate.stages.iter().map(|s| s.minutes).collect::<Vec<_>>(),
            vec![32, 32, 32]
        );
        assert_eq!(estimate.minutes, 32);
        assert!(!estimate.clamped);
    }

    #[test]
    fn late_night_car_is_faster() {
        // Tuesday 23:30 in autumn: only the late-night factor applies
        let estimator = TravelTimeEstimator::default();
        let request =
            EstimateRequest::new(FAR_A, FAR_B, TransportMethod::Car, at(2025, 10, 7, 23, 30));
        let estimate = estimator.explain(&request);

        assert_eq!(estimate.category, Some(DistanceCategory::SameCityFar));
        assert_eq!(
            estimate.stages.iter().map(|s| s.factor).collect::<Vec<_>>(),
            vec![0.8, 1.0, 1.0]
        );
        assert_eq!(estimate.minutes, 16);
    }

    #[test]
    fn late_night_compare_applies_every_mode_factor() {
        let estimator = TravelTimeEstimator::default();
        let minutes: Vec<_> = estimator
            .compare(FAR_A, FAR_B, at(2025, 10, 7, 23, 30), None)
            .iter()
            .map(|e| e.minutes)
            .collect();
        // 45 * 1.0, 25 * 0.9, 20 * 0.8, 35 * 1.5
        assert_eq!(minutes, vec![45, 22, 16, 52]);
    }

    #[test]
    fn truncates_after_every_stage() {
        // Friday evening rush in winter, public transport, same_city_far (35):
        // 35 * 1.4 = 49, 49 * 1.1 = 53.9 -> 53, 53 * 1.2 = 63.6 -> 63
        let estimator = TravelTimeEstimator::default();
        let request = EstimateRequest::new(
            FAR_A,
            FAR_B,
            TransportMethod::PublicTransport,
            at(2025, 1, 10, 17, 0),
        );
        let estimate = estimator.explain(&request);
        assert_eq!(
            estimate.stages.iter().map(|s| s.minutes).collect::<Vec<_>>(),
            vec![49, 53, 63]
        );
        assert_eq!(estimate.minutes, 63);
    }

    #[test]
    fn clamps_to_mode_bounds() {
        // Walking between cities: 90 * 1.2 (winter) = 108 -> 90
        let estimator = TravelTimeEstimator::default();
        let request = EstimateRequest::new(
            "Kings Cross London",
            "Piccadilly Manchester",
            TransportMethod::Walking,
            at(2025, 1, 7, 11, 0),
        );
        let estimate = estimator.explain(&request);
        assert_eq!(estimate.unclamped_minutes(), Some(108));
        assert_eq!(estimate.minutes, 90);
        assert!(estimate.clamped);
    }

    #[test]
    fn missing_base_entry_uses_default() {
        let config = EstimatorConfig {
            base_times: BaseTimeTable::empty(),
            ..Default::default()
        };
        let estimator = TravelTimeEstimator::new(config);
        let request =
            EstimateRequest::new(FAR_A, FAR_B, TransportMethod::Walking, at(2025, 10, 7, 11, 0));
        let estimate = estimator.explain(&request);
        assert_eq!(estimate.base_minutes, Some(20));
        assert!(!estimate.base_from_table);
        assert_eq!(estimate.minutes, 20);
    }

    #[test]
    fn configured_prep_time() {
        let config = EstimatorConfig {
            prep_time_minutes: 3,
            ..Default::default()
        };
        let estimator = TravelTimeEstimator::new(config);
        let request =
            EstimateRequest::new("Gym", "", TransportMethod::Cycling, at(2025, 6, 1, 9, 0));
        assert_eq!(estimator.estimate(&request), 3);
    }

    #[test]
    fn profile_anchor_short_circuits() {
        let profile = UserProfile {
            location: Some("42 Elm Street".into()),
            ..Default::default()
        };
        let estimator = TravelTimeEstimator::default();
        let request = EstimateRequest::new(
            "42 Elm Street, Springfield, IL",
            "42 elm street kitchen",
            TransportMethod::Car,
            at(2025, 1, 7, 8, 0),
        )
        .with_profile(&profile);
        assert_eq!(estimator.estimate(&request), 8);
    }

    #[test]
    fn departure_time_subtracts_minutes() {
        let estimator = TravelTimeEstimator::default();
        let event = at(2025, 10, 7, 8, 0);
        let request = EstimateRequest::new(FAR_A, FAR_B, TransportMethod::Car, event);
        let estimate = estimator.explain(&request);
        assert_eq!(estimate.departure_time(event), at(2025, 10, 7, 7, 28));
    }

    #[test]
    fn compare_covers_every_mode() {
        let estimator = TravelTimeEstimator::default();
        let estimates = estimator.compare(FAR_A, FAR_B, at(2025, 10, 7, 11, 0), None);
        let methods: Vec<_> = estimates.iter().map(|e| e.transport_method).collect();
        assert_eq!(methods, TransportMethod::ALL.to_vec());
        // Off-peak midweek autumn: base values pass through untouched
        let minutes: Vec<_> = estimates.iter().map(|e| e.minutes).collect();
        assert_eq!(minutes, vec![45, 25, 20, 35]);
    }

    #[test]
    fn free_function_matches_service() {
        let event = at(2025, 4, 14, 17, 45);
        let request = EstimateRequest::new(FAR_A, FAR_B, TransportMethod::Cycling, event);
        assert_eq!(
            estimate_travel_time(FAR_A, FAR_B, TransportMethod::Cycling, event, None),
            TravelTimeEstimator::default().estimate(&request)
        );
    }
}
