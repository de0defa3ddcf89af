//! Resolution engine: answers "where is this intern on this date" and "who is
//! in this department on this date" over an immutable [`ScheduleIndex`].

pub mod codes;
pub mod directory;
mod faculty;
mod handle;
pub mod index;
pub mod loader;
mod student;
mod unified;

pub use codes::CodeTables;
pub use directory::{DepartmentDirectory, DepartmentRef};
pub use handle::RotaHandle;
pub use index::ScheduleIndex;
pub use loader::{load_index, DataSource, FsDataSource};
pub use student::StudentAnswer;

use crate::models::Era;
use chrono::NaiveDate;
use serde::Serialize;

/// Date the schedules switched from the old regime to the new one
pub const DEFAULT_PIVOT_DATE: (i32, u32, u32) = (2025, 7, 21);

/// Query-time settings that are not part of the datasets themselves
#[derive(Debug, Clone)]
pub struct LookupSettings {
    pub pivot: NaiveDate,
    pub tables: CodeTables,
}

impl Default for LookupSettings {
    fn default() -> Self {
        let (y, m, d) = DEFAULT_PIVOT_DATE;
        Self {
            pivot: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            tables: CodeTables::default(),
        }
    }
}

impl LookupSettings {
    pub fn era_for(&self, date: NaiveDate) -> Era {
        Era::for_date(date, self.pivot)
    }
}

/// One site and who is there
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteStudents {
    pub site: String,
    pub students: String,
}

/// Borrowing view that runs queries against an index
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    index: &'a ScheduleIndex,
    settings: &'a LookupSettings,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a ScheduleIndex, settings: &'a LookupSettings) -> Self {
        Self { index, settings }
    }

    /// Site name for a canonical posting code, falling back to the raw code
    fn site_name(&self, canonical: &str, raw: &str) -> String {
        self.index
            .legend
            .find(canonical)
            .map(|entry| entry.site.clone())
            .unwrap_or_else(|| raw.to_string())
    }
}
