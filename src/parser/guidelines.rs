use crate::models::Guideline;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::info;

lazy_static! {
    static ref NUMBERED_TITLE: Regex = Regex::new(r"^\d+\.\s").expect("valid title regex");
}

/// Parse the guidelines export: a numbered line opens a guideline and the
/// lines after it, up to the next numbered line, are its points.
pub fn parse_guidelines(content: &str) -> Vec<Guideline> {
    let mut guidelines = Vec::new();
    let mut current: Option<Guideline> = None;

    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        if NUMBERED_TITLE.is_match(line) {
            if let Some(done) = current.take() {
                guidelines.push(done);
            }
            current = Some(Guideline {
                title: line.trim().to_string(),
                points: Vec::new(),
            });
        } else if let Some(guideline) = current.as_mut() {
            guideline.points.push(line.trim().to_string());
        }
    }
    guidelines.extend(current);

    info!("Parsed {} guidelines", guidelines.len());
    guidelines
}
