//! Lookup tables: base travel minutes and per-mode bounds.
//!
//! Both tables are plain maps so they can be serialized into the config file
//! and replaced wholesale. A missing entry is never an error: the base table
//! falls back to a default and the bounds table passes values through.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::location::DistanceCategory;
use crate::transport::TransportMethod;

/// Base minutes used when the table has no entry for a combination.
pub const DEFAULT_BASE_MINUTES: u32 = 20;

/// Built-in base minutes, indexed by [`DistanceCategory::ALL`] order.
const BUILTIN_BASE_MINUTES: [(TransportMethod, [u32; 5]); 4] = [
    (TransportMethod::Walking, [5, 15, 25, 45, 90]),
    (TransportMethod::Cycling, [3, 8, 12, 25, 60]),
    (TransportMethod::Car, [3, 8, 12, 20, 45]),
    (TransportMethod::PublicTransport, [5, 15, 20, 35, 60]),
];

/// Built-in `(min, max)` minutes per mode.
const BUILTIN_BOUNDS: [(TransportMethod, u32, u32); 4] = [
    (TransportMethod::Walking, 5, 90),
    (TransportMethod::Cycling, 3, 60),
    (TransportMethod::Car, 5, 90),
    (TransportMethod::PublicTransport, 10, 120),
];

/// (transport method x distance category) -> base minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseTimeTable(BTreeMap<TransportMethod, BTreeMap<DistanceCategory, u32>>);

impl Default for BaseTimeTable {
    fn default() -> Self {
        let table: BTreeMap<_, _> = BUILTIN_BASE_MINUTES
            .iter()
            .map(|(method, minutes)| {
                let row: BTreeMap<_, _> = DistanceCategory::ALL
                    .iter()
                    .copied()
                    .zip(minutes.iter().copied())
                    .collect();
                (*method, row)
            })
            .collect();
        Self(table)
    }
}

impl BaseTimeTable {
    /// Table with no entries; every lookup misses.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, method: TransportMethod, category: DistanceCategory) -> Option<u32> {
        self.0.get(&method)?.get(&category).copied()
    }

    pub fn insert(&mut self, method: TransportMethod, category: DistanceCategory, minutes: u32) {
        self.0.entry(method).or_default().insert(category, minutes);
    }
}

/// Inclusive range of plausible minutes for one transport method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

impl Bounds {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, minutes: u32) -> u32 {
        minutes.max(self.min).min(self.max)
    }

    pub fn contains(&self, minutes: u32) -> bool {
        (self.min..=self.max).contains(&minutes)
    }
}

/// Per-mode bounds. Modes without an entry are not clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundsTable(BTreeMap<TransportMethod, Bounds>);

impl Default for BoundsTable {
    fn default() -> Self {
        Self(
            BUILTIN_BOUNDS
                .iter()
                .map(|&(method, min, max)| (method, Bounds::new(min, max)))
                .collect(),
        )
    }
}

impl BoundsTable {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, method: TransportMethod) -> Option<Bounds> {
        self.0.get(&method).copied()
    }

    pub fn insert(&mut self, method: TransportMethod, bounds: Bounds) {
        self.0.insert(method, bounds);
    }

    pub fn remove(&mut self, method: TransportMethod) -> Option<Bounds> {
        self.0.remove(&method)
    }

    /// Clamp `minutes` for `method`, or pass it through when unbounded.
    pub fn apply(&self, method: TransportMethod, minutes: u32) -> u32 {
        match self.get(method) {
            Some(bounds) => bounds.clamp(minutes),
            None => {
                tracing::debug!(%method, minutes, "no bounds configured, passing through");
                minutes
            }
        }
    }

    /// Reject any range whose minimum exceeds its maximum.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (method, bounds) in &self.0 {
            if bounds.min > bounds.max {
                return Err(ValidationError::InvalidBounds {
                    mode: method.to_string(),
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }
        Ok(())
    }
}
