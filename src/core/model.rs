use serde::{Deserialize, Serialize};

pub type StateName = String;
pub type DistrictName = String;

/// A WGS84 coordinate pair. Informational only; nothing in the
/// escalation logic branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Normalized lookup key for a state or state/district pair.
/// Datasets and coordinate tables both key on this format.
pub fn region_key(state: &str, district: Option<&str>) -> String {
    let state = state.trim().to_uppercase();
    match district {
        Some(d) => format!("{}:{}", state, d.trim().to_uppercase()),
        None => state,
    }
}
