//! Contextual adjusters.
//!
//! Each adjuster scales a travel time by a factor chosen from the event
//! timestamp and the transport method. The estimator runs them in the fixed
//! order of [`AdjusterStage::ORDER`], truncating to whole minutes after every
//! stage.

mod day_of_week;
mod season;
mod time_of_day;

pub use day_of_week::{DayKind, DayOfWeekAdjuster};
pub use season::{Hemisphere, Season, SeasonAdjuster};
pub use time_of_day::{TimeBucket, TimeOfDayAdjuster};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::transport::TransportMethod;

/// One multiplier per transport method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeFactors {
    pub walking: f64,
    pub cycling: f64,
    pub car: f64,
    pub public_transport: f64,
}

impl ModeFactors {
    pub const NEUTRAL: ModeFactors = ModeFactors::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(walking: f64, cycling: f64, car: f64, public_transport: f64) -> Self {
        Self {
            walking,
            cycling,
            car,
            public_transport,
        }
    }

    pub fn get(&self, method: TransportMethod) -> f64 {
        match method {
            TransportMethod::Walking => self.walking,
            TransportMethod::Cycling => self.cycling,
            TransportMethod::Car => self.car,
            TransportMethod::PublicTransport => self.public_transport,
        }
    }
}

/// Identifies an adjuster in explained estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjusterStage {
    TimeOfDay,
    DayOfWeek,
    Season,
}

impl AdjusterStage {
    pub const ORDER: [AdjusterStage; 3] = [
        AdjusterStage::TimeOfDay,
        AdjusterStage::DayOfWeek,
        AdjusterStage::Season,
    ];
}

/// A single multiplier stage of the estimate pipeline.
pub trait ContextAdjuster: Send + Sync {
    fn stage(&self) -> AdjusterStage;

    /// Multiplier for travelling by `method` at `at`.
    fn factor(&self, at: NaiveDateTime, method: TransportMethod) -> f64;

    /// Scale `minutes`, truncating toward zero.
    fn apply(&self, minutes: u32, at: NaiveDateTime, method: TransportMethod) -> u32 {
        scale(minutes, self.factor(at, method))
    }
}

/// `minutes * factor`, truncated to whole minutes.
pub fn scale(minutes: u32, factor: f64) -> u32 {
    (f64::from(minutes) * factor) as u32
}
