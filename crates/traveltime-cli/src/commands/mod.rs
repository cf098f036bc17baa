pub mod classify;
pub mod config;
pub mod estimate;
pub mod profile;
