//! Static coordinate tables for states and districts.
//!
//! Approximate centroids for display on the map layer. Lookups are pure:
//! a district miss falls back to the state centroid, and a state miss
//! falls back to the India centroid.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::model::{region_key, Coordinate};

/// Fallback when the state is unknown.
pub const INDIA_CENTROID: Coordinate = Coordinate::new(20.5937, 78.9629);

lazy_static! {
    static ref STATE_COORDS: HashMap<&'static str, Coordinate> = {
        let mut m = HashMap::new();
        m.insert("DELHI", Coordinate::new(28.7041, 77.1025));
        m.insert("MAHARASHTRA", Coordinate::new(19.7515, 75.7139));
        m.insert("UTTAR PRADESH", Coordinate::new(26.8467, 80.9462));
        m.insert("WEST BENGAL", Coordinate::new(22.9868, 87.8550));
        m.insert("KARNATAKA", Coordinate::new(15.3173, 75.7139));
        m.insert("TAMIL NADU", Coordinate::new(11.1271, 78.6569));
        m.insert("BIHAR", Coordinate::new(25.0961, 85.3131));
        m.insert("GUJARAT", Coordinate::new(22.2587, 71.1924));
        m.insert("PUNJAB", Coordinate::new(31.1471, 75.3412));
        m.insert("RAJASTHAN", Coordinate::new(27.0238, 74.2179));
        m.insert("ANDHRA PRADESH", Coordinate::new(15.9129, 79.7400));
        m.insert("ASSAM", Coordinate::new(26.2006, 92.9376));
        m.insert("CHHATTISGARH", Coordinate::new(21.2787, 81.8661));
        m.insert("GOA", Coordinate::new(15.2993, 74.1240));
        m.insert("HARYANA", Coordinate::new(29.0588, 76.0856));
        m.insert("HIMACHAL PRADESH", Coordinate::new(31.1048, 77.1734));
        m.insert("JAMMU & KASHMIR", Coordinate::new(33.7782, 76.5762));
        m.insert("JHARKHAND", Coordinate::new(23.6102, 85.2799));
        m.insert("KERALA", Coordinate::new(10.8505, 76.2711));
        m.insert("MADHYA PRADESH", Coordinate::new(22.9734, 78.6569));
        m.insert("MEGHALAYA", Coordinate::new(25.4670, 91.3662));
        m.insert("ODISHA", Coordinate::new(20.9517, 85.0985));
        m.insert("TELANGANA", Coordinate::new(18.1124, 79.0193));
        m.insert("TRIPURA", Coordinate::new(23.9408, 91.9882));
        m.insert("UTTARAKHAND", Coordinate::new(30.0668, 79.0193));
        m.insert("ARUNACHAL PRADESH", Coordinate::new(28.2180, 94.7278));
        m.insert("MANIPUR", Coordinate::new(24.6637, 93.9063));
        m.insert("MIZORAM", Coordinate::new(23.1645, 92.9376));
        m.insert("NAGALAND", Coordinate::new(26.1584, 94.5624));
        m.insert("SIKKIM", Coordinate::new(27.5330, 88.5122));
        m.insert("CHANDIGARH", Coordinate::new(30.7333, 76.7794));
        m
    };
    static ref DISTRICT_COORDS: HashMap<&'static str, Coordinate> = {
        let mut m = HashMap::new();
        m.insert("CHANDIGARH:CHANDIGARH", Coordinate::new(30.7333, 76.7794));
        m.insert("PUNJAB:MOHALI", Coordinate::new(30.7046, 76.7179));
        m.insert("PUNJAB:PATIALA", Coordinate::new(30.3398, 76.3869));
        m.insert("PUNJAB:LUDHIANA", Coordinate::new(30.9010, 75.8573));
        m.insert("HARYANA:GURGAON", Coordinate::new(28.4595, 77.0266));
        m.insert("HARYANA:FARIDABAD", Coordinate::new(28.4089, 77.3178));
        m.insert("DELHI:NEW DELHI", Coordinate::new(28.6139, 77.2090));
        m.insert("DELHI:SOUTH DELHI", Coordinate::new(28.5244, 77.1855));
        m.insert("UTTAR PRADESH:NOIDA", Coordinate::new(28.5355, 77.3910));
        m.insert("UTTAR PRADESH:LUCKNOW", Coordinate::new(26.8467, 80.9462));
        m.insert("MAHARASHTRA:MUMBAI", Coordinate::new(19.0760, 72.8777));
        m.insert("MAHARASHTRA:PUNE", Coordinate::new(18.5204, 73.8567));
        m.insert("KARNATAKA:BANGALORE", Coordinate::new(12.9716, 77.5946));
        m.insert("TAMIL NADU:CHENNAI", Coordinate::new(13.0827, 80.2707));
        m
    };
}

pub fn state_coordinates(state: &str) -> Coordinate {
    STATE_COORDS
        .get(region_key(state, None).as_str())
        .copied()
        .unwrap_or(INDIA_CENTROID)
}

pub fn district_coordinates(state: &str, district: &str) -> Coordinate {
    DISTRICT_COORDS
        .get(region_key(state, Some(district)).as_str())
        .copied()
        .unwrap_or_else(|| state_coordinates(state))
}
