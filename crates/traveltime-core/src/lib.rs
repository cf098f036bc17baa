//! # Travel Time Core Library
//!
//! Heuristic travel time estimation for calendar events. Given two
//! free-text locations, a transport method and the time of the event, it
//! guesses how many minutes the trip takes. It needs no geocoding or
//! network access.
//!
//! ## Architecture
//!
//! - **Location**: distance classification and same-location detection from
//!   address text, keyword lists and known cities
//! - **Tables**: base minutes per (mode, distance) and per-mode bounds
//! - **Adjusters**: time-of-day, day-of-week and season multipliers
//! - **Estimator**: the linear pipeline tying these together
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TravelTimeEstimator`]: Configurable estimator service
//! - [`estimate_travel_time`]: Stateless estimate with built-in defaults
//! - [`EstimatorConfig`]: Configuration management

pub mod adjust;
pub mod error;
pub mod estimator;
pub mod location;
pub mod storage;
pub mod tables;
pub mod transport;

pub use adjust::{AdjusterStage, ContextAdjuster, DayKind, Hemisphere, Season, TimeBucket};
pub use error::{ConfigError, CoreError, ValidationError};
pub use estimator::{
    estimate_travel_time, Estimate, EstimateRequest, StageResult, TravelTimeEstimator,
};
pub use location::{
    classify_distance, is_same_location, CityList, DistanceCategory, DistanceRule,
    LocationClassifier, UserProfile, UserProfileView,
};
pub use storage::EstimatorConfig;
pub use tables::{BaseTimeTable, Bounds, BoundsTable};
pub use transport::TransportMethod;
