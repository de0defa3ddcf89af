use super::tabular::split_row;
use crate::models::{GroupRoster, Roll};
use tracing::{info, warn};

/// Header line that opens the roster table
const ROSTER_START: &str = "CODE\tROLL. NO.";
/// Free-text section that follows the table
const ROSTER_END: &str = "Directions to Candidates";
/// Each row holds up to this many (code, rolls) column pairs
const PAIRS_PER_ROW: usize = 4;

/// Parse a "Group Codes" export into a group → rolls mapping
pub fn parse_group_codes(content: &str) -> GroupRoster {
    let mut roster = GroupRoster::new();
    let mut started = false;

    for line in content.lines() {
        if line.trim_start().starts_with(ROSTER_START) {
            started = true;
            continue;
        }
        if !started {
            continue;
        }
        if line.trim_start().starts_with(ROSTER_END) {
            break;
        }

        let cells = split_row(line);
        if cells.len() < 2 || cells[0].is_empty() {
            continue;
        }

        for pair in cells.chunks(2).take(PAIRS_PER_ROW) {
            let [code, rolls] = pair else { continue };
            if code.is_empty() || rolls.is_empty() {
                continue;
            }
            if roster.contains_key(code.as_str()) {
                warn!("Group {} listed twice, keeping the later row", code);
            }
            roster.insert(code.clone(), parse_rolls(rolls));
        }
    }

    info!("Parsed roster with {} groups", roster.len());
    roster
}

/// Parse a comma-separated roll list, dropping the `*` annotation marker
pub fn parse_rolls(cell: &str) -> Vec<Roll> {
    cell.split(',')
        .map(|token| token.trim().replace('*', ""))
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let roll = Roll::parse(&token);
            if roll.is_none() {
                warn!("Skipping unreadable roll \"{}\"", token);
            }
            roll
        })
        .collect()
}
