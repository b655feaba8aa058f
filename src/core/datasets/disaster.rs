//! Disaster records (EM-DAT style export).
//!
//! Unlike the other loaders this one has no fallback record set: a missing
//! file yields an empty list, matching the published behavior.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{parse_f64, split_csv_line, HeaderIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisasterRisk {
    Low,
    Moderate,
    High,
    Severe,
}

/// Joint deaths/affected bucketing.
pub fn classify_disaster(deaths: f64, affected: f64) -> DisasterRisk {
    if deaths < 10.0 && affected < 1000.0 {
        DisasterRisk::Low
    } else if deaths < 100.0 && affected < 10000.0 {
        DisasterRisk::Moderate
    } else if deaths < 1000.0 && affected < 100000.0 {
        DisasterRisk::High
    } else {
        DisasterRisk::Severe
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterRecord {
    pub location: String,
    pub state: Option<String>,
    pub disaster_type: String,
    pub disaster_subtype: String,
    pub year: u32,
    pub month: Option<u32>,
    pub deaths: f64,
    pub affected: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub risk_level: DisasterRisk,
}

/// Load disaster records, most recent year first. Missing or empty source
/// is logged and yields an empty list.
pub fn load_disasters(path: &Path) -> Vec<DisasterRecord> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("disaster CSV {:?} unavailable ({}), no records loaded", path, e);
            return Vec::new();
        }
    };

    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let header = match lines.next() {
        Some(line) => HeaderIndex::new(line),
        None => return Vec::new(),
    };

    let mut records = Vec::new();
    for line in lines {
        let row = split_csv_line(line);
        let Some(disaster_type) = header.get(&row, "Disaster Type") else {
            continue;
        };
        let Some(year) = header.get(&row, "Start Year").and_then(|y| y.parse().ok()) else {
            continue;
        };

        let location = header
            .get(&row, "Location")
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or("Unknown")
            .to_string();
        let disaster_subtype = header
            .get(&row, "Disaster Subtype")
            .unwrap_or(disaster_type)
            .trim()
            .to_string();

        let deaths = parse_f64(header.get(&row, "Total Deaths"));
        let affected = {
            let total = parse_f64(header.get(&row, "Total Affected"));
            if total > 0.0 {
                total
            } else {
                parse_f64(header.get(&row, "No. Affected"))
            }
        };

        records.push(DisasterRecord {
            location,
            state: None,
            disaster_type: disaster_type.trim().to_string(),
            disaster_subtype,
            year,
            month: header.get(&row, "Start Month").and_then(|m| m.parse().ok()),
            deaths,
            affected,
            latitude: header.get(&row, "Latitude").and_then(|v| v.parse().ok()),
            longitude: header.get(&row, "Longitude").and_then(|v| v.parse().ok()),
            risk_level: classify_disaster(deaths, affected),
        });
    }

    records.sort_by(|a, b| b.year.cmp(&a.year));
    info!("parsed {} disaster records", records.len());
    records
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(classify_disaster(9.0, 999.0), DisasterRisk::Low);
        assert_eq!(classify_disaster(10.0, 0.0), DisasterRisk::Moderate);
        assert_eq!(classify_disaster(0.0, 1000.0), DisasterRisk::Moderate);
        assert_eq!(classify_disaster(99.0, 9999.0), DisasterRisk::Moderate);
        assert_eq!(classify_disaster(100.0, 0.0), DisasterRisk::High);
        assert_eq!(classify_disaster(999.0, 99999.0), DisasterRisk::High);
        assert_eq!(classify_disaster(1000.0, 0.0), DisasterRisk::Severe);
        assert_eq!(classify_disaster(0.0, 100000.0), DisasterRisk::Severe);
    }

    const HEADER: &str = "Disaster Type,Disaster Subtype,Location,Start Year,Start Month,Total Deaths,Total Affected,No. Affected,Latitude,Longitude";

    #[test]
    fn test_load_sorted_by_year_desc() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("disasters.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "Flood,Riverine flood,Assam,2010,7,120,50000,,26.2,92.9").unwrap();
        writeln!(file, "Storm,Tropical cyclone,Odisha,2019,5,60,2000000,,,").unwrap();
        writeln!(file, ",,Nowhere,2018,,,,,,").unwrap();

        let records = load_disasters(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year, 2019);
        assert_eq!(records[0].risk_level, DisasterRisk::Severe);
        assert_eq!(records[1].year, 2010);
        assert_eq!(records[1].risk_level, DisasterRisk::High);
        assert_eq!(records[1].latitude, Some(26.2));
    }

    #[test]
    fn test_affected_falls_back_to_alternate_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("disasters.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "Earthquake,Ground movement,Gujarat,2001,1,20000,,150000,,").unwrap();

        let records = load_disasters(&path);
        assert_eq!(records[0].affected, 150000.0);
        assert_eq!(records[0].risk_level, DisasterRisk::Severe);
    }

    #[test]
    fn test_subtype_defaults_to_type() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("disasters.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "Drought,,Rajasthan,2002,,0,500,,,").unwrap();

        let records = load_disasters(&path);
        assert_eq!(records[0].disaster_subtype, "Drought");
        assert_eq!(records[0].location, "Rajasthan");
        assert_eq!(records[0].risk_level, DisasterRisk::Low);
    }

    #[test]
    fn test_missing_file_yields_empty() {
        assert!(load_disasters(Path::new("/nonexistent/disasters.csv")).is_empty());
    }
}
