//! Weekday traffic patterns.

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use super::{AdjusterStage, ContextAdjuster, ModeFactors};
use crate::transport::TransportMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    Weekend,
    Friday,
    Monday,
    Midweek,
}

impl DayKind {
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sat | Weekday::Sun => Self::Weekend,
            Weekday::Fri => Self::Friday,
            Weekday::Mon => Self::Monday,
            Weekday::Tue | Weekday::Wed | Weekday::Thu => Self::Midweek,
        }
    }

    pub fn factors(&self) -> ModeFactors {
        match self {
            // Lighter roads, reduced timetables
            Self::Weekend => ModeFactors::new(1.0, 0.9, 0.8, 1.3),
            Self::Friday => ModeFactors::new(1.0, 1.0, 1.2, 1.1),
            Self::Monday => ModeFactors::new(1.0, 1.0, 1.1, 1.1),
            Self::Midweek => ModeFactors::NEUTRAL,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DayOfWeekAdjuster;

impl ContextAdjuster for DayOfWeekAdjuster {
    fn stage(&self) -> AdjusterStage {
        AdjusterStage::DayOfWeek
    }

    fn factor(&self, at: NaiveDateTime, method: TransportMethod) -> f64 {
        DayKind::from_weekday(at.weekday()).factors().get(method)
    }
}
