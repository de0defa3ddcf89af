use super::index::{ScheduleIndex, GROUP_LETTERS};
use crate::error::{load_error, RotaResult};
use crate::models::{
    GroupRoster, Guideline, LegendDocument, RegulationDocument, Schedule, UnifiedSitesDocument,
};
use crate::parser::DatasetKind;
use async_trait::async_trait;
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Optional document describing physical sites shared by several codes
pub const UNIFIED_SITES_FILE: &str = "unified-sites.json";

/// Where the JSON documents come from
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable location, for logs and errors
    fn describe(&self) -> String;

    /// Raw contents of a document, or `None` when it does not exist
    async fn fetch(&self, name: &str) -> RotaResult<Option<String>>;
}

/// Documents stored as files in one directory
#[derive(Debug, Clone)]
pub struct FsDataSource {
    root: PathBuf,
}

impl FsDataSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DataSource for FsDataSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch(&self, name: &str) -> RotaResult<Option<String>> {
        match tokio::fs::read_to_string(self.root.join(name)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(load_error(name, e)),
        }
    }
}

async fn load_required<T: DeserializeOwned>(source: &dyn DataSource, name: &str) -> RotaResult<T> {
    let content = source
        .fetch(name)
        .await?
        .ok_or_else(|| load_error(name, format!("missing from {}", source.describe())))?;
    let parsed = serde_json::from_str(&content).map_err(|e| load_error(name, e))?;
    debug!("Loaded {}", name);
    Ok(parsed)
}

async fn load_optional<T: DeserializeOwned + Default>(
    source: &dyn DataSource,
    name: &str,
) -> RotaResult<T> {
    match source.fetch(name).await? {
        Some(content) => serde_json::from_str(&content).map_err(|e| load_error(name, e)),
        None => {
            info!("{} not found in {}, continuing without it", name, source.describe());
            Ok(T::default())
        }
    }
}

/// Load every dataset concurrently and assemble the index.
/// Any missing or malformed required document fails the whole load.
pub async fn load_index(source: &dyn DataSource) -> RotaResult<ScheduleIndex> {
    info!("Loading schedule data from {}", source.describe());

    let groups_file = DatasetKind::NewGroupCodes.output_file_name();
    let old_groups_file = DatasetKind::OldGroupCodes.output_file_name();
    let glance_file = DatasetKind::AtAGlance.output_file_name();
    let legend_file = DatasetKind::Legend.output_file_name();
    let guidelines_file = DatasetKind::Guidelines.output_file_name();
    let regulations_file = DatasetKind::Regulations.output_file_name();
    let detailed_files: Vec<String> = GROUP_LETTERS
        .iter()
        .map(|&letter| DatasetKind::GroupSchedule(letter).output_file_name())
        .collect();

    let detailed_loads = detailed_files
        .iter()
        .map(|name| load_required::<Schedule>(source, name));

    let (groups, old_groups, at_a_glance, legend, guidelines, regulations, unified, detailed) = tokio::try_join!(
        load_required::<GroupRoster>(source, &groups_file),
        load_required::<GroupRoster>(source, &old_groups_file),
        load_required::<Schedule>(source, &glance_file),
        load_required::<LegendDocument>(source, &legend_file),
        load_required::<Vec<Guideline>>(source, &guidelines_file),
        load_required::<RegulationDocument>(source, &regulations_file),
        load_optional::<UnifiedSitesDocument>(source, UNIFIED_SITES_FILE),
        try_join_all(detailed_loads),
    )?;

    let index = ScheduleIndex {
        groups,
        old_groups,
        at_a_glance,
        detailed: GROUP_LETTERS.into_iter().zip(detailed).collect(),
        legend,
        guidelines,
        regulations,
        unified_sites: unified.unified_sites,
    };

    let broken = index.check_partitions();
    if broken > 0 {
        warn!("{} schedule(s) have overlapping weeks; lookups use the first match", broken);
    }

    info!(
        "Loaded {} groups ({} old), {} legend entries, {} unified sites",
        index.groups.len(),
        index.old_groups.len(),
        index.legend.legend.len(),
        index.unified_sites.len()
    );
    Ok(index)
}
