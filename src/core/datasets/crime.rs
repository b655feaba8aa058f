//! Crimes-against-women statistics.
//!
//! Two sources feed the same record shape: the comprehensive headered CSV
//! (2001-2014, per state/district) and the whitespace-separated table
//! extracted from the national report. The two use different risk-bucket
//! thresholds and slightly different crime-type labels; both are fixed
//! compatibility points, do not re-tune them.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::{parse_u32, split_csv_line, HeaderIndex};
use crate::core::model::{region_key, DistrictName, StateName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrimeRisk {
    Low,
    Medium,
    High,
    Critical,
}

/// Buckets for the comprehensive (CSV) dataset.
pub fn classify_comprehensive(total_crimes: u32) -> CrimeRisk {
    match total_crimes {
        0..=499 => CrimeRisk::Low,
        500..=1999 => CrimeRisk::Medium,
        2000..=4999 => CrimeRisk::High,
        _ => CrimeRisk::Critical,
    }
}

/// Buckets for the extracted-table dataset. Coarser on purpose: the table
/// aggregates whole states.
pub fn classify_table(total_crimes: u32) -> CrimeRisk {
    match total_crimes {
        0..=1999 => CrimeRisk::Low,
        2000..=4999 => CrimeRisk::Medium,
        5000..=9999 => CrimeRisk::High,
        _ => CrimeRisk::Critical,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeRecord {
    pub state: StateName,
    pub district: Option<DistrictName>,
    pub year: u32,
    pub rape: u32,
    pub kidnapping: u32,
    pub dowry_death: u32,
    pub assault_on_women: u32,
    pub assault_on_modesty: u32,
    pub domestic_violence: u32,
    pub trafficking: u32,
    pub total_crimes: u32,
    pub risk_level: CrimeRisk,
    pub highest_crime_type: String,
    pub highest_crime_count: u32,
}

struct Counts {
    rape: u32,
    kidnapping: u32,
    dowry_death: u32,
    assault_on_women: u32,
    assault_on_modesty: u32,
    domestic_violence: u32,
    trafficking: u32,
}

impl Counts {
    fn total(&self) -> u32 {
        self.rape
            + self.kidnapping
            + self.dowry_death
            + self.assault_on_women
            + self.assault_on_modesty
            + self.domestic_violence
            + self.trafficking
    }

    /// Highest count wins; first in the fixed order wins ties.
    fn dominant(&self, trafficking_label: &'static str) -> (String, u32) {
        let labeled = [
            ("Rape", self.rape),
            ("Kidnapping & Abduction", self.kidnapping),
            ("Dowry Deaths", self.dowry_death),
            ("Assault on Women", self.assault_on_women),
            ("Assault on Modesty", self.assault_on_modesty),
            ("Domestic Violence", self.domestic_violence),
            (trafficking_label, self.trafficking),
        ];
        let (label, count) = labeled
            .iter()
            .fold(labeled[0], |max, c| if c.1 > max.1 { *c } else { max });
        (label.to_string(), count)
    }

    fn into_record(
        self,
        state: String,
        district: Option<String>,
        year: u32,
        risk_level: CrimeRisk,
        trafficking_label: &'static str,
    ) -> CrimeRecord {
        let total_crimes = self.total();
        let (highest_crime_type, highest_crime_count) = self.dominant(trafficking_label);
        CrimeRecord {
            state,
            district,
            year,
            rape: self.rape,
            kidnapping: self.kidnapping,
            dowry_death: self.dowry_death,
            assault_on_women: self.assault_on_women,
            assault_on_modesty: self.assault_on_modesty,
            domestic_violence: self.domestic_violence,
            trafficking: self.trafficking,
            total_crimes,
            risk_level,
            highest_crime_type,
            highest_crime_count,
        }
    }
}

/// Keep the latest year per state(:district) key.
fn keep_latest(records: Vec<CrimeRecord>) -> Vec<CrimeRecord> {
    let mut latest: HashMap<String, CrimeRecord> = HashMap::new();
    for record in records {
        let key = region_key(&record.state, record.district.as_deref());
        match latest.get(&key) {
            Some(existing) if existing.year >= record.year => {}
            _ => {
                latest.insert(key, record);
            }
        }
    }
    latest.into_values().collect()
}

/// Load the comprehensive headered CSV (per state/district, 2001-2014).
pub fn load_crime_csv(path: &Path) -> Vec<CrimeRecord> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("crime CSV {:?} unavailable ({}), using fallback", path, e);
            return fallback_crime_records();
        }
    };

    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let header = match lines.next() {
        Some(line) => HeaderIndex::new(line),
        None => return fallback_crime_records(),
    };

    let mut records = Vec::new();
    for line in lines {
        let row = split_csv_line(line);
        let Some(state) = header.get(&row, "STATE/UT") else {
            continue;
        };
        let Some(year) = header.get(&row, "Year").and_then(|y| y.parse().ok()) else {
            continue;
        };
        let district = header
            .get(&row, "DISTRICT")
            .map(|d| d.trim().to_uppercase());

        let counts = Counts {
            rape: parse_u32(header.get(&row, "Rape")),
            kidnapping: parse_u32(header.get(&row, "Kidnapping and Abduction")),
            dowry_death: parse_u32(header.get(&row, "Dowry Deaths")),
            assault_on_women: parse_u32(header.get(
                &row,
                "Assault on women with intent to outrage her modesty",
            )),
            assault_on_modesty: parse_u32(header.get(&row, "Insult to modesty of Women")),
            domestic_violence: parse_u32(header.get(&row, "Cruelty by Husband or his Relatives")),
            trafficking: parse_u32(header.get(&row, "Importation of Girls")),
        };
        if counts.total() == 0 {
            continue;
        }

        let risk = classify_comprehensive(counts.total());
        records.push(counts.into_record(
            state.trim().to_uppercase(),
            district,
            year,
            risk,
            "Trafficking",
        ));
    }

    let records = keep_latest(records);
    if records.is_empty() {
        warn!("crime CSV {:?} yielded no records, using fallback", path);
        return fallback_crime_records();
    }
    info!("parsed {} crime records from comprehensive dataset", records.len());
    records
}

/// Load the whitespace-separated table extracted from the report PDF.
/// Line shape: `<state name...> <year> <7 crime counts>`, where the state
/// name runs until the first token that parses as a year.
pub fn load_crime_table(path: &Path) -> Vec<CrimeRecord> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("crime table {:?} unavailable ({}), using fallback", path, e);
            return fallback_crime_records();
        }
    };

    let mut records = Vec::new();
    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 9 || parts.contains(&"State") || parts.contains(&"Year") {
            continue;
        }

        let Some(year_idx) = parts
            .iter()
            .position(|p| p.parse::<u32>().map(|n| n > 1900).unwrap_or(false))
        else {
            continue;
        };
        if year_idx == 0 {
            continue;
        }

        let state = parts[..year_idx].join(" ").to_uppercase();
        let year: u32 = parts[year_idx].parse().unwrap_or(0);
        let num = |offset: usize| parse_u32(parts.get(year_idx + offset).copied());

        let counts = Counts {
            rape: num(1),
            kidnapping: num(2),
            dowry_death: num(3),
            assault_on_women: num(4),
            assault_on_modesty: num(5),
            domestic_violence: num(6),
            trafficking: num(7),
        };

        let risk = classify_table(counts.total());
        records.push(counts.into_record(state, None, year, risk, "Women Trafficking"));
    }

    let records = keep_latest(records);
    if records.is_empty() {
        warn!("crime table {:?} yielded no records, using fallback", path);
        return fallback_crime_records();
    }
    records
}

/// Hard-coded records used when no source is readable. Risk labels are
/// carried over verbatim from the published fallback set; they pre-date the
/// bucket formulas and are not recomputed.
pub fn fallback_crime_records() -> Vec<CrimeRecord> {
    let rows: [(&str, u32, [u32; 7], CrimeRisk); 5] = [
        ("DELHI", 2020, [1200, 800, 100, 500, 300, 1500, 100], CrimeRisk::Critical),
        ("MAHARASHTRA", 2020, [1400, 900, 120, 600, 350, 1800, 80], CrimeRisk::Critical),
        ("UTTAR PRADESH", 2020, [2000, 1200, 200, 800, 500, 2500, 100], CrimeRisk::Critical),
        ("WEST BENGAL", 2020, [1100, 700, 90, 450, 280, 1400, 80], CrimeRisk::High),
        ("KARNATAKA", 2020, [600, 400, 50, 250, 150, 800, 50], CrimeRisk::Medium),
    ];

    rows.iter()
        .map(|(state, year, c, risk)| {
            let counts = Counts {
                rape: c[0],
                kidnapping: c[1],
                dowry_death: c[2],
                assault_on_women: c[3],
                assault_on_modesty: c[4],
                domestic_violence: c[5],
                trafficking: c[6],
            };
            counts.into_record((*state).to_string(), None, *year, *risk, "Trafficking")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_comprehensive_buckets_boundary_exact() {
        assert_eq!(classify_comprehensive(0), CrimeRisk::Low);
        assert_eq!(classify_comprehensive(499), CrimeRisk::Low);
        assert_eq!(classify_comprehensive(500), CrimeRisk::Medium);
        assert_eq!(classify_comprehensive(1999), CrimeRisk::Medium);
        assert_eq!(classify_comprehensive(2000), CrimeRisk::High);
        assert_eq!(classify_comprehensive(4999), CrimeRisk::High);
        assert_eq!(classify_comprehensive(5000), CrimeRisk::Critical);
        assert_eq!(classify_comprehensive(u32::MAX), CrimeRisk::Critical);
    }

    #[test]
    fn test_table_buckets() {
        assert_eq!(classify_table(1999), CrimeRisk::Low);
        assert_eq!(classify_table(2000), CrimeRisk::Medium);
        assert_eq!(classify_table(5000), CrimeRisk::High);
        assert_eq!(classify_table(10000), CrimeRisk::Critical);
    }

    const CSV_HEADER: &str = "STATE/UT,DISTRICT,Year,Rape,Kidnapping and Abduction,Dowry Deaths,Assault on women with intent to outrage her modesty,Insult to modesty of Women,Cruelty by Husband or his Relatives,Importation of Girls";

    #[test]
    fn test_csv_parsing_and_latest_year() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crimes.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", CSV_HEADER).unwrap();
        writeln!(file, "DELHI,NEW DELHI,2012,100,50,10,40,20,200,5").unwrap();
        writeln!(file, "DELHI,NEW DELHI,2014,120,60,12,45,25,220,6").unwrap();
        writeln!(file, "DELHI,SOUTH DELHI,2014,0,0,0,0,0,0,0").unwrap();
        writeln!(file, ",,2014,1,1,1,1,1,1,1").unwrap();

        let records = load_crime_csv(&path);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.year, 2014);
        assert_eq!(record.district.as_deref(), Some("NEW DELHI"));
        assert_eq!(record.total_crimes, 488);
        assert_eq!(record.risk_level, CrimeRisk::Low);
        assert_eq!(record.highest_crime_type, "Domestic Violence");
        assert_eq!(record.highest_crime_count, 220);
    }

    #[test]
    fn test_table_parsing_multiword_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crimes.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "State Year Rape KA DD AoW AoM DV WT").unwrap();
        writeln!(file, "Uttar Pradesh 2014 3000 1500 300 900 600 3500 200").unwrap();
        writeln!(file, "Goa 2013 40 20 2 15 8 60 1").unwrap();

        let mut records = load_crime_table(&path);
        records.sort_by(|a, b| a.state.cmp(&b.state));
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].state, "GOA");
        assert_eq!(records[0].risk_level, CrimeRisk::Low);

        let up = &records[1];
        assert_eq!(up.state, "UTTAR PRADESH");
        assert_eq!(up.year, 2014);
        assert_eq!(up.total_crimes, 10000);
        assert_eq!(up.risk_level, CrimeRisk::Critical);
        assert_eq!(up.highest_crime_type, "Domestic Violence");
    }

    #[test]
    fn test_table_trafficking_label() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crimes.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Assam 2014 10 5 1 3 2 8 500").unwrap();

        let records = load_crime_table(&path);
        assert_eq!(records[0].highest_crime_type, "Women Trafficking");
    }

    #[test]
    fn test_missing_file_uses_fallback() {
        let records = load_crime_csv(Path::new("/nonexistent/crimes.csv"));
        assert_eq!(records.len(), 5);
        let up = records.iter().find(|r| r.state == "UTTAR PRADESH").unwrap();
        assert_eq!(up.total_crimes, 7300);
        assert_eq!(up.risk_level, CrimeRisk::Critical);
        // Labels are verbatim from the published set, not the bucket formula.
        let kar = records.iter().find(|r| r.state == "KARNATAKA").unwrap();
        assert_eq!(kar.risk_level, CrimeRisk::Medium);
    }

    #[test]
    fn test_dominant_tie_prefers_fixed_order() {
        let counts = Counts {
            rape: 50,
            kidnapping: 50,
            dowry_death: 0,
            assault_on_women: 0,
            assault_on_modesty: 0,
            domestic_violence: 0,
            trafficking: 0,
        };
        assert_eq!(counts.dominant("Trafficking").0, "Rape");
    }
}
