use super::tabular::split_row;
use crate::models::{RegulationDocument, RegulationEntry};
use tracing::info;

const REGULATIONS_START: &str = "Abbreviation used";
const FOOTNOTE_MARKER: &str = "*Electives";

/// Parse the regulations export into department rows plus the elective footnote
pub fn parse_regulations(content: &str) -> RegulationDocument {
    let mut document = RegulationDocument::default();
    let mut started = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with(REGULATIONS_START) {
            started = true;
            continue;
        }
        if !started || trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with(FOOTNOTE_MARKER) {
            document.note = trimmed.to_string();
            continue;
        }

        let cells = split_row(line);
        if cells.len() >= 3 && !cells[0].is_empty() {
            document.regulations.push(RegulationEntry {
                abbreviation: cells[0].clone(),
                department: cells[1].clone(),
                duration: cells[2].clone(),
            });
        }
    }

    info!("Parsed {} regulation rows", document.regulations.len());
    document
}
