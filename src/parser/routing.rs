use super::{guidelines, legend, regulations, roster, schedule};
use crate::error::RotaResult;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref GROUP_SCHEDULE_FILE: Regex =
        Regex::new(r"(?i)group ([a-d])[ .]").expect("valid group file regex");
}

/// Which dataset a raw export holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    AtAGlance,
    GroupSchedule(char),
    NewGroupCodes,
    OldGroupCodes,
    Legend,
    Guidelines,
    Regulations,
}

impl DatasetKind {
    /// File name of the JSON document this dataset converts to
    pub fn output_file_name(&self) -> String {
        match self {
            DatasetKind::AtAGlance => "schedule-data.json".to_string(),
            DatasetKind::GroupSchedule(letter) => {
                format!("group-{}-schedule.json", letter.to_ascii_lowercase())
            }
            DatasetKind::NewGroupCodes => "group-data.json".to_string(),
            DatasetKind::OldGroupCodes => "old-group-data.json".to_string(),
            DatasetKind::Legend => "legend.json".to_string(),
            DatasetKind::Guidelines => "guidelines.json".to_string(),
            DatasetKind::Regulations => "regulations.json".to_string(),
        }
    }

    /// Run this dataset's row grammar and serialize the result
    pub fn convert(&self, content: &str) -> RotaResult<String> {
        let json = match self {
            DatasetKind::AtAGlance => {
                serde_json::to_string_pretty(&schedule::parse_at_a_glance(content))?
            }
            DatasetKind::GroupSchedule(_) => {
                serde_json::to_string_pretty(&schedule::parse_detailed_schedule(content))?
            }
            DatasetKind::NewGroupCodes | DatasetKind::OldGroupCodes => {
                serde_json::to_string_pretty(&roster::parse_group_codes(content))?
            }
            DatasetKind::Legend => serde_json::to_string_pretty(&legend::parse_legend(content))?,
            DatasetKind::Guidelines => {
                serde_json::to_string_pretty(&guidelines::parse_guidelines(content))?
            }
            DatasetKind::Regulations => {
                serde_json::to_string_pretty(&regulations::parse_regulations(content))?
            }
        };
        Ok(json)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::AtAGlance => write!(f, "'At a Glance' schedule"),
            DatasetKind::GroupSchedule(letter) => write!(f, "Group {} detailed schedule", letter),
            DatasetKind::NewGroupCodes => write!(f, "NEW group codes"),
            DatasetKind::OldGroupCodes => write!(f, "OLD group codes"),
            DatasetKind::Legend => write!(f, "legend"),
            DatasetKind::Guidelines => write!(f, "guidelines"),
            DatasetKind::Regulations => write!(f, "regulations"),
        }
    }
}

/// One routing predicate
enum Rule {
    /// Case-insensitive substring of the file name
    Contains(&'static str, DatasetKind),
    /// `Group A` … `Group D` followed by a space or dot
    GroupLetter,
}

impl Rule {
    fn apply(&self, file_name: &str) -> Option<DatasetKind> {
        match self {
            Rule::Contains(needle, kind) => file_name
                .to_lowercase()
                .contains(&needle.to_lowercase())
                .then_some(*kind),
            Rule::GroupLetter => GROUP_SCHEDULE_FILE
                .captures(file_name)
                .and_then(|caps| caps[1].chars().next())
                .map(|letter| DatasetKind::GroupSchedule(letter.to_ascii_uppercase())),
        }
    }
}

/// Most specific first: "NEW Group Codes" must be tried before "Group Codes"
const RULES: [Rule; 7] = [
    Rule::Contains("At a Glance", DatasetKind::AtAGlance),
    Rule::GroupLetter,
    Rule::Contains("NEW Group Codes", DatasetKind::NewGroupCodes),
    Rule::Contains("Group Codes", DatasetKind::OldGroupCodes),
    Rule::Contains("Legend", DatasetKind::Legend),
    Rule::Contains("Guidelines", DatasetKind::Guidelines),
    Rule::Contains("Regulations", DatasetKind::Regulations),
];

/// Classify an export by its file name; `None` means unrecognised
pub fn classify(file_name: &str) -> Option<DatasetKind> {
    RULES.iter().find_map(|rule| rule.apply(file_name))
}
