use crate::models::{
    Era, GroupRoster, Guideline, LegendDocument, RegulationDocument, Roll, Schedule,
    UnifiedSite, WeekSchedule,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::warn;

/// Letters of the per-group detailed schedules
pub const GROUP_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Every dataset a session needs, loaded once and never mutated.
/// Share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ScheduleIndex {
    /// New-era roster
    pub groups: GroupRoster,
    /// Old-era roster
    pub old_groups: GroupRoster,
    /// Department-level schedule
    pub at_a_glance: Schedule,
    /// Site-level schedules keyed by group letter
    pub detailed: BTreeMap<char, Schedule>,
    pub legend: LegendDocument,
    pub guidelines: Vec<Guideline>,
    pub regulations: RegulationDocument,
    pub unified_sites: Vec<UnifiedSite>,
}

impl ScheduleIndex {
    /// Roster in force for an era
    pub fn roster(&self, era: Era) -> &GroupRoster {
        match era {
            Era::Old => &self.old_groups,
            Era::New => &self.groups,
        }
    }

    /// Detailed schedule for the letter a group code starts with
    pub fn detailed_for_group(&self, group: &str) -> Option<&Schedule> {
        let letter = group.chars().next()?.to_ascii_uppercase();
        self.detailed.get(&letter)
    }

    /// Every detailed week covering `date` in an era, one per letter at most
    pub fn detailed_weeks(&self, era: Era, date: NaiveDate) -> Vec<&WeekSchedule> {
        self.detailed
            .values()
            .filter_map(|schedule| schedule.week_for(era, date))
            .collect()
    }

    /// Group whose roster in `era` lists the roll
    pub fn group_of(&self, era: Era, roll: &Roll) -> Option<&str> {
        self.roster(era)
            .iter()
            .find(|(_, members)| members.contains(roll))
            .map(|(group, _)| group.as_str())
    }

    /// Log every schedule that breaks the one-week-per-date rule
    pub fn check_partitions(&self) -> usize {
        let mut broken = 0;
        let sources = std::iter::once(("at-a-glance".to_string(), &self.at_a_glance)).chain(
            self.detailed
                .iter()
                .map(|(letter, schedule)| (format!("group {}", letter), schedule)),
        );

        for (name, schedule) in sources {
            for era in [Era::Old, Era::New] {
                if !schedule.is_partitioned(era) {
                    warn!("{} schedule has overlapping {} weeks", name, era);
                    broken += 1;
                }
            }
        }
        broken
    }
}
