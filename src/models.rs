//! Canonical documents shared by the converter and the lookup engine.
//!
//! Every type here round-trips through the JSON files the converter writes,
//! so field names follow those files rather than Rust conventions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// One of the two schedule regimes, split by the pivot date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Era {
    Old,
    New,
}

impl Era {
    /// Pick the era a date falls in
    pub fn for_date(date: NaiveDate, pivot: NaiveDate) -> Self {
        if date < pivot {
            Era::Old
        } else {
            Era::New
        }
    }

    /// The era on the other side of the pivot
    pub fn other(self) -> Self {
        match self {
            Era::Old => Era::New,
            Era::New => Era::Old,
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Era::Old => write!(f, "old"),
            Era::New => write!(f, "new"),
        }
    }
}

/// A single week of postings, keyed by group code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSchedule {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub postings: BTreeMap<String, String>,
}

impl WeekSchedule {
    /// Create an empty week covering `start_date..=end_date`
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            postings: BTreeMap::new(),
        }
    }

    /// Whether the inclusive range covers `date`
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether this week has the same range as another
    pub fn same_range(&self, other: &WeekSchedule) -> bool {
        self.start_date == other.start_date && self.end_date == other.end_date
    }

    /// Postings ordered by group letter, then group number
    pub fn postings_in_group_order(&self) -> Vec<(&String, &String)> {
        let mut postings: Vec<_> = self.postings.iter().collect();
        postings.sort_by_cached_key(|(group, _)| group_sort_key(group.as_str()));
        postings
    }
}

/// Ordering key for group codes, so `A2` comes before `A10`
pub fn group_sort_key(code: &str) -> (String, u32, String) {
    let split = code
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(code.len());
    let (prefix, digits) = code.split_at(split);
    (
        prefix.to_string(),
        digits.parse().unwrap_or(u32::MAX),
        code.to_string(),
    )
}

/// Old and new week sequences for one schedule source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(default)]
    pub old_schedule: Vec<WeekSchedule>,
    #[serde(default)]
    pub new_schedule: Vec<WeekSchedule>,
}

impl Schedule {
    pub fn weeks(&self, era: Era) -> &[WeekSchedule] {
        match era {
            Era::Old => &self.old_schedule,
            Era::New => &self.new_schedule,
        }
    }

    pub fn push(&mut self, era: Era, week: WeekSchedule) {
        match era {
            Era::Old => self.old_schedule.push(week),
            Era::New => self.new_schedule.push(week),
        }
    }

    /// Find the week covering `date` in the given era
    pub fn week_for(&self, era: Era, date: NaiveDate) -> Option<&WeekSchedule> {
        self.weeks(era).iter().find(|w| w.contains(date))
    }

    /// Find the week with exactly the range of `reference`
    pub fn week_matching(&self, era: Era, reference: &WeekSchedule) -> Option<&WeekSchedule> {
        self.weeks(era).iter().find(|w| w.same_range(reference))
    }

    /// Check that no two weeks of an era overlap and every range is ordered
    pub fn is_partitioned(&self, era: Era) -> bool {
        let mut ranges: Vec<(NaiveDate, NaiveDate)> = self
            .weeks(era)
            .iter()
            .map(|w| (w.start_date, w.end_date))
            .collect();
        ranges.sort();

        ranges.iter().all(|(start, end)| start <= end)
            && ranges.windows(2).all(|pair| pair[0].1 < pair[1].0)
    }
}

/// A roll identifier: numeric, or a reserved-prefix string such as `R7`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Roll {
    Number(u32),
    Reserved(String),
}

/// Prefix marking non-numeric roll identifiers
pub const RESERVED_ROLL_PREFIX: char = 'R';

impl Roll {
    /// Parse a roll token. Reserved rolls are uppercased with the zero
    /// padding after the prefix removed (`r007` → `R7`); anything else must
    /// be a plain unsigned integer.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        let upper = token.to_uppercase();
        if let Some(rest) = upper.strip_prefix(RESERVED_ROLL_PREFIX) {
            // A bare prefix (or prefix and zeros) names nobody
            let tail = rest.trim_start_matches('0');
            if tail.is_empty() {
                return None;
            }
            return Some(Roll::Reserved(format!("{}{}", RESERVED_ROLL_PREFIX, tail)));
        }
        token.parse::<u32>().ok().map(Roll::Number)
    }

    /// Numeric part of the roll, if it has one
    pub fn numeric_part(&self) -> Option<u32> {
        match self {
            Roll::Number(n) => Some(*n),
            Roll::Reserved(s) => s
                .strip_prefix(RESERVED_ROLL_PREFIX)
                .and_then(|rest| rest.parse::<u32>().ok()),
        }
    }

    /// Display order: rolls with a numeric part first by number, the rest
    /// lexically.
    pub fn display_cmp(&self, other: &Roll) -> Ordering {
        match (self.numeric_part(), other.numeric_part()) {
            (Some(a), Some(b)) => a
                .cmp(&b)
                .then_with(|| self.to_string().cmp(&other.to_string())),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Roll::Number(n) => write!(f, "{}", n),
            Roll::Reserved(s) => write!(f, "{}", s),
        }
    }
}

/// Join rolls the way answers display them
pub fn join_rolls<'a>(rolls: impl IntoIterator<Item = &'a Roll>) -> String {
    rolls
        .into_iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Group code to ordered member rolls
pub type GroupRoster = BTreeMap<String, Vec<Roll>>;

/// What a posting code means physically
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub code: String,
    pub site: String,
    #[serde(rename = "split", alias = "taskDescription")]
    pub task: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendDocument {
    #[serde(default)]
    pub legend: Vec<LegendEntry>,
    #[serde(default)]
    pub note: String,
}

impl LegendDocument {
    pub fn find(&self, code: &str) -> Option<&LegendEntry> {
        self.legend.iter().find(|entry| entry.code == code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulationEntry {
    pub abbreviation: String,
    pub department: String,
    pub duration: String,
}

impl RegulationEntry {
    /// Summary rows carry `TOTAL` in the department column
    pub fn is_total_row(&self) -> bool {
        self.department.is_empty() || self.department.to_uppercase().contains("TOTAL")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulationDocument {
    #[serde(default)]
    pub regulations: Vec<RegulationEntry>,
    #[serde(default)]
    pub note: String,
}

impl RegulationDocument {
    /// Department rows, without the synthetic totals
    pub fn departments(&self) -> impl Iterator<Item = &RegulationEntry> {
        self.regulations.iter().filter(|r| !r.is_total_row())
    }

    pub fn find(&self, abbreviation: &str) -> Option<&RegulationEntry> {
        self.departments()
            .find(|entry| entry.abbreviation == abbreviation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guideline {
    pub title: String,
    pub points: Vec<String>,
}

/// How many interns of a contributing code show up at a unified site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CapacityRepr", into = "CapacityRepr")]
pub enum Capacity {
    All,
    Exactly(u32),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CapacityRepr {
    Count(u32),
    Word(String),
}

impl TryFrom<CapacityRepr> for Capacity {
    type Error = String;

    fn try_from(repr: CapacityRepr) -> Result<Self, Self::Error> {
        match repr {
            CapacityRepr::Count(n) => Ok(Capacity::Exactly(n)),
            CapacityRepr::Word(word) if word.eq_ignore_ascii_case("all") => Ok(Capacity::All),
            CapacityRepr::Word(word) => Err(format!("invalid posting count: {}", word)),
        }
    }
}

impl From<Capacity> for CapacityRepr {
    fn from(capacity: Capacity) -> Self {
        match capacity {
            Capacity::All => CapacityRepr::Word("all".to_string()),
            Capacity::Exactly(n) => CapacityRepr::Count(n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedPosting {
    pub code: String,
    pub count: Capacity,
}

/// A physical site fed by several posting codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedSite {
    pub name: String,
    pub postings: Vec<UnifiedPosting>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedSitesDocument {
    #[serde(default)]
    pub unified_sites: Vec<UnifiedSite>,
}
