use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::{debug, warn};

lazy_static! {
    static ref DATE_TOKEN: Regex =
        Regex::new(r"^(\d{1,2})\s+([A-Za-z]{3})\s+(\d{2})$").expect("valid date token regex");
    static ref DATE_ROW: Regex =
        Regex::new(r"^\d{1,2} [A-Za-z]{3} \d{2}").expect("valid date row regex");
    static ref GROUP_CODE: Regex = Regex::new(r"^[A-D]\d{1,2}$").expect("valid group code regex");
    static ref GROUP_RANGE: Regex =
        Regex::new(r"^([A-D])(\d{1,2})\s*-\s*(?:[A-D])?(\d{1,2})$").expect("valid group range regex");
}

/// Phrases that open the "new" block of a two-era export
const SECTION_MARKERS: [&str; 2] = ["NEW SCHEDULE", "NEW DURATION"];

/// First-cell token of a duration header row
pub const DURATION_MARKER: &str = "DURATION";

/// Split a raw line into trimmed tab-separated cells
pub fn split_row(line: &str) -> Vec<String> {
    line.split('\t').map(|c| c.trim().to_string()).collect()
}

/// Parse a `DD MMM YY` token into a date. Two-digit years are always 20YY.
pub fn parse_date_token(token: &str) -> Option<NaiveDate> {
    let caps = DATE_TOKEN.captures(token.trim())?;
    let expanded = format!("{} {} 20{}", &caps[1], &caps[2], &caps[3]);
    NaiveDate::parse_from_str(&expanded, "%d %b %Y").ok()
}

/// Whether the first cell opens with a `DD MMM YY` date
pub fn is_data_row(cells: &[String]) -> bool {
    cells.first().is_some_and(|c| DATE_ROW.is_match(c))
}

/// Parse a `DD MMM YY - DD MMM YY` cell. Logs and returns `None` when either
/// side is not a real date.
pub fn parse_date_range(cell: &str) -> Option<(NaiveDate, NaiveDate)> {
    let parts: Vec<&str> = cell.split(" - ").map(str::trim).collect();
    if parts.len() != 2 {
        warn!("Skipping row with malformed date range: \"{}\"", cell);
        return None;
    }

    match (parse_date_token(parts[0]), parse_date_token(parts[1])) {
        (Some(start), Some(end)) if start <= end => Some((start, end)),
        (Some(_), Some(_)) => {
            warn!("Skipping row with reversed date range: \"{}\"", cell);
            None
        }
        _ => {
            warn!("Invalid date string encountered: \"{}\"", cell);
            None
        }
    }
}

/// Whether a line switches parsing from the old block to the new one
pub fn is_section_switch(line: &str) -> bool {
    SECTION_MARKERS.iter().any(|marker| line.contains(marker))
}

/// Whether a cell is a bare group code such as `A1` or `B12`
pub fn is_group_code(cell: &str) -> bool {
    GROUP_CODE.is_match(cell)
}

/// Expand `A1-A11,A12` (or `A1-11`) into the explicit set of group codes.
/// Tokens that are neither a code nor a range are dropped.
pub fn expand_group_codes(cell: &str) -> BTreeSet<String> {
    let mut expanded = BTreeSet::new();

    for part in cell.split(',').map(|p| p.trim().to_uppercase()) {
        if part.is_empty() {
            continue;
        }

        if let Some(caps) = GROUP_RANGE.captures(&part) {
            let prefix = &caps[1];
            let (Ok(start), Ok(end)) = (caps[2].parse::<u32>(), caps[3].parse::<u32>()) else {
                continue;
            };
            for i in start..=end {
                expanded.insert(format!("{}{}", prefix, i));
            }
        } else if is_group_code(&part) {
            expanded.insert(part);
        } else {
            debug!("Ignoring unrecognised group token \"{}\"", part);
        }
    }

    expanded
}
