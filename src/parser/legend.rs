use crate::models::{LegendDocument, LegendEntry};
use tracing::info;

const LEGEND_START: &str = "CODE\tSITE\tSPLIT";

/// Parse the legend export. Single-cell rows after the table header are
/// collected into the free-text note.
pub fn parse_legend(content: &str) -> LegendDocument {
    let mut document = LegendDocument::default();
    let mut started = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with(LEGEND_START) {
            started = true;
            continue;
        }
        if !started || trimmed.is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split('\t').collect();
        if cells.len() >= 3 && !cells[0].is_empty() {
            document.legend.push(LegendEntry {
                code: cells[0].trim().to_string(),
                site: cells[1].trim().to_string(),
                task: cells[2].trim().to_string(),
            });
        } else if cells.len() == 1 {
            if !document.note.is_empty() {
                document.note.push(' ');
            }
            document.note.push_str(trimmed);
        }
    }

    info!("Parsed legend with {} entries", document.legend.len());
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_legend() {
        let content = "LEGEND\n\
CODE\tSITE\tSPLIT\n\
GM - FMW\tFemale Medical Ward\tRounds and admissions\n\
PSM - UHC\tUrban Health Centre\tOPD\textra\n\
\tno code\trow\n\
Postings rotate weekly.\n\
Report by 8 AM.\n";
        let document = parse_legend(content);

        assert_eq!(document.legend.len(), 2);
        assert_eq!(document.legend[0].code, "GM - FMW");
        assert_eq!(document.legend[0].site, "Female Medical Ward");
        assert_eq!(document.legend[1].task, "OPD");
        assert_eq!(document.note, "Postings rotate weekly. Report by 8 AM.");
        assert!(document.find("PSM - UHC").is_some());
    }

    #[test]
    fn test_nothing_before_header() {
        let document = parse_legend("GM\tWard\tRounds\nA lone note\n");
        assert!(document.legend.is_empty());
        assert!(document.note.is_empty());
    }
}
