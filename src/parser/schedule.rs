use super::tabular::{
    expand_group_codes, is_data_row, is_group_code, is_section_switch, parse_date_range,
    split_row, DURATION_MARKER,
};
use crate::models::{Era, Schedule, WeekSchedule};
use tracing::{debug, info};

/// Department tokens that identify the header row of the at-a-glance sheet
const DEPARTMENT_HEADER_TOKENS: [&str; 4] = ["PSM", "GM", "GS", "OBG"];

/// Row grammar for one kind of two-era weekly schedule export
trait WeekGrammar {
    /// Lines dropped before any other classification
    fn skip_line(&self, _trimmed: &str) -> bool {
        false
    }

    /// Whether a row (re)defines the column labels
    fn is_header(&self, cells: &[String]) -> bool;

    /// Record one data cell under its column label
    fn fill(&self, week: &mut WeekSchedule, label: &str, cell: &str);
}

/// Department-level sheet: columns are departments, cells list group codes
struct AtAGlance;

impl WeekGrammar for AtAGlance {
    fn is_header(&self, cells: &[String]) -> bool {
        cells
            .iter()
            .any(|c| DEPARTMENT_HEADER_TOKENS.contains(&c.as_str()))
    }

    fn fill(&self, week: &mut WeekSchedule, department: &str, cell: &str) {
        for group in expand_group_codes(cell) {
            week.postings.insert(group, department.to_string());
        }
    }
}

/// Per-letter sheet: columns are group codes, cells are site/task codes
struct Detailed;

impl WeekGrammar for Detailed {
    fn skip_line(&self, trimmed: &str) -> bool {
        trimmed.contains("Detailed view")
    }

    fn is_header(&self, cells: &[String]) -> bool {
        let first = cells.first().map(String::as_str).unwrap_or_default();
        if first.eq_ignore_ascii_case(DURATION_MARKER) {
            return true;
        }
        first.is_empty() && cells.get(1).is_some_and(|c| is_group_code(c))
    }

    fn fill(&self, week: &mut WeekSchedule, group: &str, posting: &str) {
        week.postings.insert(group.to_string(), posting.to_string());
    }
}

/// Parse the department-level "at a glance" export
pub fn parse_at_a_glance(content: &str) -> Schedule {
    let schedule = parse_sectioned(&AtAGlance, content);
    info!(
        "Parsed at-a-glance schedule: {} old weeks, {} new weeks",
        schedule.old_schedule.len(),
        schedule.new_schedule.len()
    );
    schedule
}

/// Parse one per-letter detailed group export
pub fn parse_detailed_schedule(content: &str) -> Schedule {
    let schedule = parse_sectioned(&Detailed, content);
    info!(
        "Parsed detailed schedule: {} old weeks, {} new weeks",
        schedule.old_schedule.len(),
        schedule.new_schedule.len()
    );
    schedule
}

fn parse_sectioned<G: WeekGrammar>(grammar: &G, content: &str) -> Schedule {
    let mut schedule = Schedule::default();
    let mut era = Era::Old;
    // Positional: labels[i] names the cell at column i + 1
    let mut labels: Vec<String> = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || grammar.skip_line(trimmed) {
            continue;
        }

        if is_section_switch(trimmed) {
            era = Era::New;
            labels.clear();
            continue;
        }

        let cells = split_row(line);

        if grammar.is_header(&cells) {
            labels = cells.into_iter().skip(1).collect();
            continue;
        }

        if !is_data_row(&cells) {
            continue;
        }

        if labels.is_empty() {
            debug!("Data row before any header, skipping: \"{}\"", trimmed);
            continue;
        }

        let Some((start, end)) = parse_date_range(&cells[0]) else {
            continue;
        };

        let mut week = WeekSchedule::new(start, end);
        for (label, cell) in labels.iter().zip(cells.iter().skip(1)) {
            if label.is_empty() || cell.is_empty() {
                continue;
            }
            grammar.fill(&mut week, label, cell);
        }
        schedule.push(era, week);
    }

    schedule
}
