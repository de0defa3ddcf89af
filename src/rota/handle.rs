use super::directory::{DepartmentDirectory, DepartmentRef};
use super::index::ScheduleIndex;
use super::loader::{load_index, DataSource};
use super::student::StudentAnswer;
use super::{LookupSettings, Resolver, SiteStudents};
use crate::error::{LookupError, RotaResult};
use chrono::NaiveDate;
use rand::Rng;
use std::sync::Arc;
use tracing::debug;

/// Cheap-to-clone handle shared by every caller of a loaded session
#[derive(Debug, Clone)]
pub struct RotaHandle {
    index: Arc<ScheduleIndex>,
    settings: Arc<LookupSettings>,
    directory: Arc<DepartmentDirectory>,
}

impl RotaHandle {
    /// Wrap an already-built index
    pub fn new(index: ScheduleIndex, settings: LookupSettings) -> Self {
        let directory = DepartmentDirectory::new(&index.regulations, &settings.tables);
        Self {
            index: Arc::new(index),
            settings: Arc::new(settings),
            directory: Arc::new(directory),
        }
    }

    /// Load every dataset from a source and build a handle over them
    pub async fn load(source: &dyn DataSource, settings: LookupSettings) -> RotaResult<Self> {
        let index = load_index(source).await?;
        Ok(Self::new(index, settings))
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.index, &self.settings)
    }

    pub fn index(&self) -> &ScheduleIndex {
        &self.index
    }

    pub fn settings(&self) -> &LookupSettings {
        &self.settings
    }

    pub fn lookup_student<R: Rng>(
        &self,
        input: &str,
        date: NaiveDate,
        rng: &mut R,
    ) -> Result<StudentAnswer, LookupError> {
        self.resolver().lookup_student(input, date, rng)
    }

    /// Faculty lookup that also accepts a department name or search term
    pub fn lookup_faculty(
        &self,
        department: &str,
        date: NaiveDate,
    ) -> Result<Vec<SiteStudents>, LookupError> {
        let department = department.trim();
        if department.is_empty() {
            return Err(LookupError::EmptyInput);
        }

        let code = match self.directory.resolve(department) {
            Some(found) => {
                debug!("Department query {:?} resolved to {}", department, found.code);
                found.code.as_str()
            }
            // Raw schedule codes such as R&L are not departments but still work
            None if self.knows_schedule_code(department) => department,
            None => return Err(LookupError::UnknownDepartment(department.to_string())),
        };

        self.resolver().lookup_faculty(code, date)
    }

    pub fn lookup_unified_site(
        &self,
        site_name: &str,
        date: NaiveDate,
    ) -> Result<Vec<SiteStudents>, LookupError> {
        self.resolver().lookup_unified_site(site_name, date)
    }

    /// Departments offered for selection
    pub fn departments(&self) -> &[DepartmentRef] {
        self.directory.list()
    }

    pub fn find_department(&self, query: &str) -> Option<&DepartmentRef> {
        self.directory.resolve(query)
    }

    /// Names of every configured unified site
    pub fn unified_site_names(&self) -> Vec<&str> {
        self.index
            .unified_sites
            .iter()
            .map(|site| site.name.as_str())
            .collect()
    }

    fn knows_schedule_code(&self, code: &str) -> bool {
        let schedule = &self.index.at_a_glance;
        schedule
            .old_schedule
            .iter()
            .chain(schedule.new_schedule.iter())
            .any(|week| week.postings.values().any(|posting| posting == code))
    }
}
