//! Rush-hour and late-night adjustments.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::{AdjusterStage, ContextAdjuster, ModeFactors};
use crate::transport::TransportMethod;

const fn hm(hour: u32, minute: u32) -> u32 {
    hour * 60 + minute
}

/// Traffic period of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBucket {
    MorningRush,    // 07:00-09:30
    EveningRush,    // 16:30-18:30
    LateNight,      // 23:00-06:00
    SecondaryPeak,  // 12:00-13:30, 15:00-16:30
    Normal,
}

impl TimeBucket {
    /// Bucket a wall-clock time. Windows are half-open: 09:30 is no longer
    /// morning rush.
    pub fn from_time(time: NaiveTime) -> Self {
        let minute = time.hour() * 60 + time.minute();

        if (hm(7, 0)..hm(9, 30)).contains(&minute) {
            Self::MorningRush
        } else if (hm(16, 30)..hm(18, 30)).contains(&minute) {
            Self::EveningRush
        } else if minute >= hm(23, 0) || minute < hm(6, 0) {
            Self::LateNight
        } else if (hm(12, 0)..hm(13, 30)).contains(&minute)
            || (hm(15, 0)..hm(16, 30)).contains(&minute)
        {
            Self::SecondaryPeak
        } else {
            Self::Normal
        }
    }

    /// Walking is never slowed by traffic.
    pub fn factors(&self) -> ModeFactors {
        match self {
            Self::MorningRush => ModeFactors::new(1.0, 1.1, 1.6, 1.4),
            Self::EveningRush => ModeFactors::new(1.0, 1.1, 1.7, 1.4),
            // Empty roads, sparse service
            Self::LateNight => ModeFactors::new(1.0, 0.9, 0.8, 1.5),
            Self::SecondaryPeak => ModeFactors::new(1.0, 1.0, 1.2, 1.1),
            Self::Normal => ModeFactors::NEUTRAL,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOfDayAdjuster;

impl ContextAdjuster for TimeOfDayAdjuster {
    fn stage(&self) -> AdjusterStage {
        AdjusterStage::TimeOfDay
    }

    fn factor(&self, at: NaiveDateTime, method: TransportMethod) -> f64 {
        TimeBucket::from_time(at.time()).factors().get(method)
    }
}
