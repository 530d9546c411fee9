//! Limits and thresholds for BDP checks.

use crate::domain::RoadTypeGroup;

/// Configuration parameters for BDP checks and route searches.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Maximum direct route length for minor highway brackets (meters).
    pub minor_max_route_m: f64,

    /// Maximum direct route length for major highway/freeway brackets (meters).
    pub major_max_route_m: f64,

    /// Longest selected detour accepted for minor highway brackets (meters).
    pub minor_detour_cap_m: f64,

    /// Longest selected detour accepted for major highway/freeway brackets (meters).
    pub major_detour_cap_m: f64,

    /// Hard cap on depth-first search steps per check.
    /// The search gives up and reports no route once this is reached.
    pub max_search_steps: usize,

    /// Map zoom level the host must be at or below for minor highway checks.
    pub minor_zoom: u8,

    /// Map zoom level the host must be at or below for major highway checks.
    pub major_zoom: u8,
}

impl CheckConfig {
    /// Create a configuration with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search step cap.
    pub fn with_max_search_steps(mut self, steps: usize) -> Self {
        self.max_search_steps = steps;
        self
    }

    /// Set the maximum direct route lengths (meters).
    pub fn with_max_route_lengths(mut self, minor_m: f64, major_m: f64) -> Self {
        self.minor_max_route_m = minor_m;
        self.major_max_route_m = major_m;
        self
    }

    /// Set the detour length caps (meters).
    pub fn with_detour_caps(mut self, minor_m: f64, major_m: f64) -> Self {
        self.minor_detour_cap_m = minor_m;
        self.major_detour_cap_m = major_m;
        self
    }

    /// Maximum direct route length for brackets of the given group.
    pub fn max_route_length(&self, group: RoadTypeGroup) -> f64 {
        match group {
            RoadTypeGroup::MinorHighway => self.minor_max_route_m,
            RoadTypeGroup::MajorHighwayOrFreeway => self.major_max_route_m,
        }
    }

    /// Longest detour accepted for brackets of the given group.
    pub fn detour_cap(&self, group: RoadTypeGroup) -> f64 {
        match group {
            RoadTypeGroup::MinorHighway => self.minor_detour_cap_m,
            RoadTypeGroup::MajorHighwayOrFreeway => self.major_detour_cap_m,
        }
    }

    /// Zoom level the host map must be at for the network to hold the
    /// segments a search of this group can reach.
    pub fn target_zoom(&self, group: RoadTypeGroup) -> u8 {
        match group {
            RoadTypeGroup::MinorHighway => self.minor_zoom,
            RoadTypeGroup::MajorHighwayOrFreeway => self.major_zoom,
        }
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            minor_max_route_m: 5_000.0,
            major_max_route_m: 50_000.0,
            minor_detour_cap_m: 500.0,
            major_detour_cap_m: 5_000.0,
            max_search_steps: 100_000,
            minor_zoom: 4,
            major_zoom: 3,
        }
    }
}
