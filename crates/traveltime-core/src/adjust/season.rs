//! Seasonal weather adjustments.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{AdjusterStage, ContextAdjuster, ModeFactors};
use crate::transport::TransportMethod;

/// Which half of the globe the user lives in. Decides which months are winter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hemisphere {
    #[default]
    Northern,
    Southern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Meteorological season for a calendar month (1-12).
    pub fn from_month(month: u32, hemisphere: Hemisphere) -> Self {
        let month = match hemisphere {
            Hemisphere::Northern => month,
            Hemisphere::Southern => (month + 5) % 12 + 1,
        };
        match month {
            12 | 1 | 2 => Self::Winter,
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            _ => Self::Autumn,
        }
    }

    pub fn factors(&self) -> ModeFactors {
        match self {
            // Ice, snow, darkness
            Self::Winter => ModeFactors::new(1.2, 1.4, 1.1, 1.2),
            // Rain hits cyclists hardest
            Self::Spring => ModeFactors::new(1.1, 1.25, 1.05, 1.05),
            // Heat
            Self::Summer => ModeFactors::new(1.05, 1.1, 1.0, 1.0),
            Self::Autumn => ModeFactors::NEUTRAL,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonAdjuster {
    pub hemisphere: Hemisphere,
}

impl SeasonAdjuster {
    pub fn new(hemisphere: Hemisphere) -> Self {
        Self { hemisphere }
    }
}

impl ContextAdjuster for SeasonAdjuster {
    fn stage(&self) -> AdjusterStage {
        AdjusterStage::Season
    }

    fn factor(&self, at: NaiveDateTime, method: TransportMethod) -> f64 {
        Season::from_month(at.month(), self.hemisphere).factors().get(method)
    }
}
