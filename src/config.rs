//! Configuration parameters for the break transformations.

use serde::{Deserialize, Serialize};

use crate::problem::Measure;

/// Default break time window: 11:00 to 14:00, in minutes.
pub const DEFAULT_BREAK_TIME_WINDOW: (Measure, Measure) = (11 * 60, 14 * 60);

/// Settings for appending break nodes to an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakConfig {
    /// Depot whose coordinates (and service duration) the breaks inherit
    pub depot_idx: usize,
    /// Whether the break nodes must be visited
    pub make_required: bool,
    /// Zero travel cost to and from the break nodes; otherwise the row and
    /// column of location 0 are replicated as a placeholder
    pub zero_travel: bool,
    /// Service duration override; the reference depot's value when `None`
    pub service_duration: Option<Measure>,
    /// Time window override; [`DEFAULT_BREAK_TIME_WINDOW`] when `None`
    pub time_window: Option<(Measure, Measure)>,
}

impl Default for BreakConfig {
    fn default() -> Self {
        BreakConfig {
            depot_idx: 0,
            make_required: true,
            zero_travel: true,
            service_duration: None,
            time_window: None,
        }
    }
}

impl BreakConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        BreakConfig::default()
    }

    /// Set the reference depot.
    pub fn with_depot(mut self, depot_idx: usize) -> Self {
        self.depot_idx = depot_idx;
        self
    }

    /// Set whether break nodes are required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.make_required = required;
        self
    }

    /// Set whether travel to and from break nodes is free.
    pub fn with_zero_travel(mut self, zero_travel: bool) -> Self {
        self.zero_travel = zero_travel;
        self
    }

    /// Set the break service duration.
    pub fn with_service_duration(mut self, duration: Measure) -> Self {
        self.service_duration = Some(duration);
        self
    }

    /// Set the break time window.
    pub fn with_time_window(mut self, early: Measure, late: Measure) -> Self {
        self.time_window = Some((early, late));
        self
    }

    /// The time window break nodes will get.
    pub fn effective_time_window(&self) -> (Measure, Measure) {
        self.time_window.unwrap_or(DEFAULT_BREAK_TIME_WINDOW)
    }
}

/// Settings for building one exclusive break per vehicle. Service
/// duration and time window are mandatory here so every vehicle's break
/// looks the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleBreakConfig {
    pub service_duration: Measure,
    pub time_window: (Measure, Measure),
    pub depot_idx: usize,
}

impl VehicleBreakConfig {
    /// Create a configuration referencing depot 0.
    pub fn new(service_duration: Measure, time_window: (Measure, Measure)) -> Self {
        VehicleBreakConfig {
            service_duration,
            time_window,
            depot_idx: 0,
        }
    }

    /// Set the reference depot.
    pub fn with_depot(mut self, depot_idx: usize) -> Self {
        self.depot_idx = depot_idx;
        self
    }

    /// The synthesizer settings this configuration implies.
    pub fn to_break_config(&self) -> BreakConfig {
        BreakConfig::new()
            .with_depot(self.depot_idx)
            .with_required(true)
            .with_zero_travel(true)
            .with_service_duration(self.service_duration)
            .with_time_window(self.time_window.0, self.time_window.1)
    }
}
