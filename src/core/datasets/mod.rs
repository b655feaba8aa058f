// Government dataset loaders.
//
// Architecture:
// - schemes.rs: welfare schemes (alternating name/description lines)
// - crime.rs: crimes-against-women statistics (headered CSV + extracted table)
// - disaster.rs: disaster records (headered CSV)
//
// Every loader degrades to a fixed fallback set instead of erroring; bad
// rows are skipped, a missing file is a warning.

pub mod crime;
pub mod disaster;
pub mod schemes;

/// Split one CSV line, honoring double-quoted fields ("" escapes a quote).
/// Enough for the government exports these loaders consume.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Map header names to column indices for row lookups by name.
struct HeaderIndex {
    columns: Vec<String>,
}

impl HeaderIndex {
    fn new(header_line: &str) -> Self {
        Self {
            columns: split_csv_line(header_line),
        }
    }

    fn get<'a>(&self, row: &'a [String], name: &str) -> Option<&'a str> {
        let idx = self.columns.iter().position(|c| c == name)?;
        let value = row.get(idx)?.as_str();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

fn parse_u32(value: Option<&str>) -> u32 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

fn parse_f64(value: Option<&str>) -> f64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0.0)
}
