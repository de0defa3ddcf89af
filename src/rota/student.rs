use super::Resolver;
use crate::error::LookupError;
use crate::models::{group_sort_key, join_rolls, Era, Guideline, Roll};
use chrono::NaiveDate;
use rand::Rng;
use rust_i18n::t;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Where a student (or a whole group) is posted on a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentAnswer {
    pub group: String,
    pub era: Era,
    pub department: String,
    pub site: String,
    pub task: String,
    pub colleagues: Vec<Roll>,
    pub guideline: Option<Guideline>,
}

impl StudentAnswer {
    /// Colleagues as displayed, with a placeholder when there are none
    pub fn colleagues_text(&self) -> String {
        if self.colleagues.is_empty() {
            t!("no_colleagues").to_string()
        } else {
            join_rolls(&self.colleagues)
        }
    }
}

impl Resolver<'_> {
    /// Resolve a roll number or group code for a date
    pub fn lookup_student<R: Rng>(
        &self,
        input: &str,
        date: NaiveDate,
        rng: &mut R,
    ) -> Result<StudentAnswer, LookupError> {
        let cleaned = input.trim().to_uppercase();
        if cleaned.is_empty() {
            return Err(LookupError::EmptyInput);
        }

        let roll = Roll::parse(&cleaned);
        let cleaned = roll
            .as_ref()
            .map(Roll::to_string)
            .unwrap_or(cleaned);

        let era = self.settings.era_for(date);
        let group = self.resolve_group(era, roll.as_ref(), &cleaned)?;
        debug!("Resolved {} to group {} ({} era)", cleaned, group, era);

        let gap = || LookupError::ScheduleGap { date };
        let week = self
            .index
            .detailed_for_group(&group)
            .and_then(|schedule| schedule.week_for(era, date))
            .ok_or_else(gap)?;
        let glance_week = self
            .index
            .at_a_glance
            .week_for(era, date)
            .ok_or_else(gap)?;

        let incomplete = || LookupError::IncompletePosting {
            group: group.clone(),
        };
        let posting = week
            .postings
            .get(&group)
            .filter(|p| !p.is_empty())
            .ok_or_else(incomplete)?;
        let department_code = glance_week
            .postings
            .get(&group)
            .filter(|d| !d.is_empty())
            .ok_or_else(incomplete)?;

        let canonical = self.settings.tables.canonicalize(posting);
        let legend = self.index.legend.find(canonical);
        let department = self
            .index
            .regulations
            .find(department_code)
            .map(|entry| entry.department.clone())
            .unwrap_or_else(|| department_code.clone());

        Ok(StudentAnswer {
            department,
            site: legend
                .map(|entry| entry.site.clone())
                .unwrap_or_else(|| posting.clone()),
            task: legend
                .map(|entry| entry.task.clone())
                .unwrap_or_else(|| t!("no_task_description").to_string()),
            colleagues: self.colleagues(era, date, canonical, roll.as_ref()),
            guideline: pick_guideline(&self.index.guidelines, rng),
            era,
            group,
        })
    }

    /// Find the group a query refers to: the group listing the roll, or the
    /// input itself taken as a group code.
    fn resolve_group(
        &self,
        era: Era,
        roll: Option<&Roll>,
        cleaned: &str,
    ) -> Result<String, LookupError> {
        let roster = self.index.roster(era);
        let group = roll
            .and_then(|r| self.index.group_of(era, r))
            .unwrap_or(cleaned);

        if roster.contains_key(group) {
            return Ok(group.to_string());
        }

        let other = era.other();
        let in_other = roll.is_some_and(|r| self.index.group_of(other, r).is_some())
            || self.index.roster(other).contains_key(group);
        if in_other {
            Err(LookupError::WrongEra {
                found_in: other,
                pivot: self.settings.pivot,
            })
        } else {
            Err(LookupError::NotFound(cleaned.to_string()))
        }
    }

    /// Everyone in a group whose at-a-glance or detailed posting for the week
    /// canonicalizes to `canonical`, without the querying roll and without
    /// repeats.
    pub fn colleagues(
        &self,
        era: Era,
        date: NaiveDate,
        canonical: &str,
        exclude: Option<&Roll>,
    ) -> Vec<Roll> {
        let tables = &self.settings.tables;
        let roster = self.index.roster(era);

        let mut groups: Vec<&String> = self
            .index
            .at_a_glance
            .week_for(era, date)
            .into_iter()
            .chain(self.index.detailed_weeks(era, date))
            .flat_map(|week| week.postings.iter())
            .filter(|(_, code)| tables.canonicalize(code) == canonical)
            .map(|(group, _)| group)
            .collect();
        groups.sort_by_cached_key(|group| group_sort_key(group.as_str()));
        groups.dedup();

        let mut seen = HashSet::new();
        groups
            .into_iter()
            .filter_map(|group| roster.get(group))
            .flatten()
            .filter(|roll| Some(*roll) != exclude)
            .filter(|roll| seen.insert((*roll).clone()))
            .cloned()
            .collect()
    }
}

/// Pick one guideline with the injected random source
pub fn pick_guideline<R: Rng>(guidelines: &[Guideline], rng: &mut R) -> Option<Guideline> {
    if guidelines.is_empty() {
        return None;
    }
    let index = rng.random_range(0..guidelines.len());
    guidelines.get(index).cloned()
}
