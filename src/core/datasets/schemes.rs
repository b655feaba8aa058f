//! Welfare-scheme dataset.
//!
//! The source file alternates scheme name and description lines. Category
//! is inferred from name keywords; benefits and eligibility carry fixed
//! boilerplate the source never provides per scheme.

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeRecord {
    pub name: String,
    pub slug: String,
    pub details: String,
    pub benefits: String,
    pub eligibility: String,
    pub application_url: Option<String>,
    pub documents: Option<String>,
    pub level: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
}

const APPLICATION_URL: &str = "https://india.gov.in";

/// Lowercase the name, hyphenate whitespace, strip parentheses.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .replace(['(', ')'], "")
}

/// Keyword-based category inference, first match wins.
pub fn category_from_name(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if has(&["education", "padhao", "school"]) {
        "Education"
    } else if has(&["health", "matru", "medical"]) {
        "Health"
    } else if has(&["safety", "violence", "protection"]) {
        "Safety"
    } else if has(&["shakti", "empowerment"]) {
        "Empowerment"
    } else if has(&["entrepreneur", "loan", "stand up"]) {
        "Entrepreneurship"
    } else if has(&["savings", "samriddhi", "financial"]) {
        "Financial"
    } else {
        "General"
    }
}

/// Load schemes from the paired-line file; fall back to the built-in set
/// when the file is missing, unreadable, or yields nothing.
pub fn load_schemes(path: &Path) -> Vec<SchemeRecord> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("schemes file {:?} unavailable ({}), using fallback", path, e);
            return fallback_schemes();
        }
    };

    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut schemes = Vec::new();
    for pair in lines.chunks(2) {
        let [name, details] = pair else { continue };
        schemes.push(SchemeRecord {
            name: (*name).to_string(),
            slug: slugify(name),
            details: (*details).to_string(),
            benefits: "Financial and social support".to_string(),
            eligibility: "Eligible women and families".to_string(),
            application_url: Some(APPLICATION_URL.to_string()),
            documents: Some(String::new()),
            level: Some("Central".to_string()),
            category: category_from_name(name).to_string(),
            tags: Vec::new(),
        });
    }

    if schemes.is_empty() {
        warn!("schemes file {:?} yielded no records, using fallback", path);
        return fallback_schemes();
    }
    schemes
}

/// 100 synthesized schemes cycling a 10-entry base list.
pub fn fallback_schemes() -> Vec<SchemeRecord> {
    struct Base {
        name: &'static str,
        category: &'static str,
        details: &'static str,
        benefits: &'static str,
        eligibility: &'static str,
    }

    const BASES: [Base; 10] = [
        Base {
            name: "Beti Bachao Beti Padhao",
            category: "Education",
            details: "Government scheme to save and educate girl children",
            benefits: "Financial support for girl child education",
            eligibility: "Families with girl children",
        },
        Base {
            name: "Pradhan Mantri Matru Vandana Yojana",
            category: "Health",
            details: "Maternity benefit scheme for pregnant mothers",
            benefits: "Cash incentive of Rs 5000",
            eligibility: "Pregnant mothers",
        },
        Base {
            name: "Sukanya Samriddhi Yojana",
            category: "Financial",
            details: "Savings scheme for girl child",
            benefits: "High interest savings account",
            eligibility: "Girl child under 10 years",
        },
        Base {
            name: "Mahila Shakti Kendra",
            category: "Empowerment",
            details: "Women empowerment program",
            benefits: "Skill development and training",
            eligibility: "Rural women",
        },
        Base {
            name: "One Stop Centre",
            category: "Safety",
            details: "Support for women facing violence",
            benefits: "Legal aid and counseling",
            eligibility: "Women in distress",
        },
        Base {
            name: "Women Helpline",
            category: "Safety",
            details: "24x7 helpline for women",
            benefits: "Emergency support",
            eligibility: "All women",
        },
        Base {
            name: "Ujjawala Scheme",
            category: "Safety",
            details: "Prevention of trafficking",
            benefits: "Rehabilitation support",
            eligibility: "Trafficked women",
        },
        Base {
            name: "Swadhar Greh",
            category: "Safety",
            details: "Shelter for women in distress",
            benefits: "Temporary accommodation",
            eligibility: "Homeless women",
        },
        Base {
            name: "Working Women Hostel",
            category: "Safety",
            details: "Safe accommodation for working women",
            benefits: "Affordable housing",
            eligibility: "Working women",
        },
        Base {
            name: "Mahila Police Volunteers",
            category: "Safety",
            details: "Community policing program",
            benefits: "Safety awareness",
            eligibility: "Women volunteers",
        },
    ];

    (0..100)
        .map(|i| {
            let base = &BASES[i % BASES.len()];
            SchemeRecord {
                name: format!("{} {}", base.name, i / 10 + 1),
                slug: format!("{}-{}", slugify(base.name), i + 1),
                details: base.details.to_string(),
                benefits: base.benefits.to_string(),
                eligibility: base.eligibility.to_string(),
                application_url: Some(APPLICATION_URL.to_string()),
                documents: None,
                level: Some("Central".to_string()),
                category: base.category.to_string(),
                tags: Vec::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("One Stop Centre"), "one-stop-centre");
        assert_eq!(
            slugify("Mahila Shakti Kendra (MSK)"),
            "mahila-shakti-kendra-msk"
        );
    }

    #[test]
    fn test_category_inference() {
        assert_eq!(category_from_name("Beti Bachao Beti Padhao"), "Education");
        assert_eq!(category_from_name("Matru Vandana"), "Health");
        assert_eq!(category_from_name("Domestic Violence Support"), "Safety");
        assert_eq!(category_from_name("Stand Up India"), "Entrepreneurship");
        assert_eq!(category_from_name("Sukanya Samriddhi"), "Financial");
        assert_eq!(category_from_name("Something Else"), "General");
    }

    #[test]
    fn test_load_paired_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schemes.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "One Stop Centre").unwrap();
        writeln!(file, "Support for women facing violence").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "Working Women Hostel").unwrap();
        writeln!(file, "Safe accommodation").unwrap();

        let schemes = load_schemes(&path);
        assert_eq!(schemes.len(), 2);
        assert_eq!(schemes[0].slug, "one-stop-centre");
        assert_eq!(schemes[0].category, "Safety");
        assert_eq!(schemes[1].details, "Safe accommodation");
    }

    #[test]
    fn test_missing_file_uses_fallback() {
        let schemes = load_schemes(Path::new("/nonexistent/schemes.csv"));
        assert_eq!(schemes.len(), 100);
        assert_eq!(schemes[0].name, "Beti Bachao Beti Padhao 1");
        assert_eq!(schemes[0].slug, "beti-bachao-beti-padhao-1");
        assert_eq!(schemes[99].name, "Mahila Police Volunteers 10");
        assert_eq!(schemes[99].slug, "mahila-police-volunteers-100");
    }
}
