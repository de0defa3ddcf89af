use super::{Resolver, SiteStudents};
use crate::error::LookupError;
use crate::models::{join_rolls, Capacity, Roll};
use chrono::NaiveDate;
use rust_i18n::t;
use std::collections::{BTreeMap, HashSet};

impl Resolver<'_> {
    /// List who is at a unified site on a date, one entry per contributing
    /// posting code, applying each code's headcount rule.
    pub fn lookup_unified_site(
        &self,
        site_name: &str,
        date: NaiveDate,
    ) -> Result<Vec<SiteStudents>, LookupError> {
        let site_name = site_name.trim();
        if site_name.is_empty() {
            return Err(LookupError::EmptyInput);
        }

        let site = self
            .index
            .unified_sites
            .iter()
            .find(|s| s.name == site_name)
            .ok_or_else(|| LookupError::UnknownUnifiedSite(site_name.to_string()))?;

        let tables = &self.settings.tables;
        let era = self.settings.era_for(date);
        let roster = self.index.roster(era);

        // Canonical code -> (rule, pooled members)
        let mut pools: BTreeMap<&str, (Capacity, HashSet<&Roll>)> = BTreeMap::new();

        for week in self.index.detailed_weeks(era, date) {
            for (group, posting) in &week.postings {
                let canonical = tables.canonicalize(posting);
                let Some(rule) = site
                    .postings
                    .iter()
                    .find(|p| tables.canonicalize(&p.code) == canonical)
                else {
                    continue;
                };
                let Some(members) = roster.get(group).filter(|m| !m.is_empty()) else {
                    continue;
                };

                pools
                    .entry(canonical)
                    .or_insert_with(|| (rule.count, HashSet::new()))
                    .1
                    .extend(members.iter());
            }
        }

        if pools.is_empty() {
            return Err(LookupError::NoStudents { date });
        }

        Ok(pools
            .into_iter()
            .map(|(code, (capacity, members))| {
                let mut members: Vec<Roll> = members.into_iter().cloned().collect();
                members.sort_by(|a, b| a.display_cmp(b));
                SiteStudents {
                    site: self.site_name(code, code),
                    students: render_capacity(capacity, &members),
                }
            })
            .collect())
    }
}

/// Render a pool under its headcount rule: the whole list when everyone
/// goes, otherwise "Two interns from [...]".
pub fn render_capacity(capacity: Capacity, members: &[Roll]) -> String {
    let list = join_rolls(members);
    let count = match capacity {
        Capacity::All => return list,
        Capacity::Exactly(n) if n as usize >= members.len() => return list,
        Capacity::Exactly(n) => n,
    };

    let count_text = match count {
        1 => t!("count_one").to_string(),
        2 => t!("count_two").to_string(),
        3 => t!("count_three").to_string(),
        n => n.to_string(),
    };
    let noun = if count > 1 {
        t!("intern_plural")
    } else {
        t!("intern_singular")
    };

    t!(
        "interns_from",
        count = count_text,
        noun = noun,
        rolls = list
    )
    .to_string()
}
