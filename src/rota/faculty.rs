use super::{Resolver, SiteStudents};
use crate::error::LookupError;
use crate::models::{join_rolls, Roll};
use chrono::NaiveDate;
use tracing::debug;

impl Resolver<'_> {
    /// List who is in a department on a date, grouped by site
    pub fn lookup_faculty(
        &self,
        department: &str,
        date: NaiveDate,
    ) -> Result<Vec<SiteStudents>, LookupError> {
        let department = department.trim();
        if department.is_empty() {
            return Err(LookupError::EmptyInput);
        }

        let era = self.settings.era_for(date);
        let week = self
            .index
            .at_a_glance
            .week_for(era, date)
            .ok_or(LookupError::ScheduleGap { date })?;

        let search_codes = self.settings.tables.equivalent_codes(department);
        let roster = self.index.roster(era);
        // First-seen site order
        let mut by_site: Vec<(String, Vec<Roll>)> = Vec::new();

        for (group, code) in week.postings_in_group_order() {
            if !search_codes.contains(code) {
                continue;
            }

            let raw = self
                .index
                .detailed_for_group(group)
                .and_then(|schedule| schedule.week_matching(era, week))
                .and_then(|detailed| detailed.postings.get(group));
            let Some(raw) = raw else {
                debug!("No detailed posting for {} in week of {}", group, week.start_date);
                continue;
            };
            let Some(members) = roster.get(group) else {
                debug!("Group {} has no roster in the {} era", group, era);
                continue;
            };

            let canonical = self.settings.tables.canonicalize(raw);
            let site = self.site_name(canonical, raw);

            match by_site.iter_mut().find(|(name, _)| *name == site) {
                Some((_, rolls)) => rolls.extend(members.iter().cloned()),
                None => by_site.push((site, members.clone())),
            }
        }

        if by_site.is_empty() {
            return Err(LookupError::NoStudents { date });
        }

        Ok(by_site
            .into_iter()
            .map(|(site, rolls)| SiteStudents {
                site,
                students: join_rolls(&rolls),
            })
            .collect())
    }
}
