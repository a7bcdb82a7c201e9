//! Inter-building travel times.
//!
//! Two lectures held back-to-back in different buildings are only
//! attendable if the idle gap between them covers the walk. The matrix
//! stores directed travel times; lookups fall back to a default for
//! unlisted pairs and to zero inside one building.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Building-to-building travel times (minutes).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelTimeMatrix {
    /// Travel times: (from_building, to_building) → minutes.
    travel: HashMap<(String, String), u32>,
    /// Travel time between different buildings with no explicit entry.
    pub default_minutes: u32,
}

impl TravelTimeMatrix {
    /// Creates an empty matrix (every pair is reachable instantly).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default travel time between different buildings.
    pub fn with_default(mut self, default_minutes: u32) -> Self {
        self.default_minutes = default_minutes;
        self
    }

    /// Defines a directed travel time.
    pub fn set_travel(&mut self, from: impl Into<String>, to: impl Into<String>, minutes: u32) {
        self.travel.insert((from.into(), to.into()), minutes);
    }

    /// Builder: defines the same travel time in both directions.
    pub fn with_route(mut self, a: impl Into<String>, b: impl Into<String>, minutes: u32) -> Self {
        let (a, b) = (a.into(), b.into());
        self.set_travel(a.clone(), b.clone(), minutes);
        self.set_travel(b, a, minutes);
        self
    }

    /// Travel time from one building to another.
    ///
    /// Same building → 0; explicit entry if defined; otherwise the default.
    pub fn minutes_between(&self, from: &str, to: &str) -> u32 {
        if from == to {
            return 0;
        }
        self.travel
            .get(&(from.to_string(), to.to_string()))
            .copied()
            .unwrap_or(self.default_minutes)
    }

    /// Number of explicitly defined routes (directed).
    pub fn route_count(&self) -> usize {
        self.travel.len()
    }
}
