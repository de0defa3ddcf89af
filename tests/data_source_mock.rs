use async_trait::async_trait;
use chrono::NaiveDate;
use internship_rota::error::{load_error, Error, RotaResult};
use internship_rota::rota::{load_index, DataSource, LookupSettings, RotaHandle};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock implementation of a dataset store for testing
#[derive(Debug, Clone, Default)]
pub struct MockDataSource {
    files: Arc<Mutex<HashMap<String, String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl MockDataSource {
    /// Create a new mock source
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document under a file name
    pub async fn put(&self, name: &str, content: &str) {
        let mut files = self.files.lock().await;
        files.insert(name.to_string(), content.to_string());
    }

    /// Make every fetch of a document fail
    pub async fn fail(&self, name: &str) {
        let mut failing = self.failing.lock().await;
        failing.insert(name.to_string());
    }

    /// Source holding the one-group scenario: A1 = [101, 102] in General
    /// Medicine, posted to GM for the week of 6 Jan 2025.
    pub async fn with_scenario() -> Self {
        let source = Self::new();
        let week = r#"{"oldSchedule": [{"startDate": "2025-01-06", "endDate": "2025-01-12", "postings": {"A1": "GM"}}], "newSchedule": []}"#;
        let empty = r#"{"oldSchedule": [], "newSchedule": []}"#;

        source.put("old-group-data.json", r#"{"A1": [101, 102]}"#).await;
        source.put("group-data.json", "{}").await;
        source.put("schedule-data.json", week).await;
        source.put("group-a-schedule.json", week).await;
        for letter in ['b', 'c', 'd'] {
            source
                .put(&format!("group-{}-schedule.json", letter), empty)
                .await;
        }
        source
            .put(
                "legend.json",
                r#"{"legend": [{"code": "GM", "site": "Ward 4", "split": "Rounds"}], "note": ""}"#,
            )
            .await;
        source
            .put(
                "guidelines.json",
                r#"[{"title": "1. Be punctual", "points": ["Arrive by 8 am."]}]"#,
            )
            .await;
        source
            .put(
                "regulations.json",
                r#"{"regulations": [{"abbreviation": "GM", "department": "General Medicine", "duration": "4 weeks"}], "note": ""}"#,
            )
            .await;
        source
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    fn describe(&self) -> String {
        "mock".to_string()
    }

    async fn fetch(&self, name: &str) -> RotaResult<Option<String>> {
        if self.failing.lock().await.contains(name) {
            return Err(load_error(name, "simulated failure"));
        }
        let files = self.files.lock().await;
        Ok(files.get(name).cloned())
    }
}

/// Test loading the scenario and answering a query from it
#[tokio::test]
async fn test_mock_source_scenario() {
    let source = MockDataSource::with_scenario().await;
    let handle = RotaHandle::load(&source, LookupSettings::default())
        .await
        .unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
    let answer = handle
        .lookup_student("101", date, &mut rand::rng())
        .unwrap();

    assert_eq!(answer.department, "General Medicine");
    assert_eq!(answer.site, "Ward 4");
    assert_eq!(answer.task, "Rounds");
    assert_eq!(answer.colleagues_text(), "102");
    // Only one guideline to choose from
    assert_eq!(answer.guideline.unwrap().title, "1. Be punctual");
}

/// Test that one failing fetch aborts the whole load
#[tokio::test]
async fn test_mock_source_failure_aborts_load() {
    let source = MockDataSource::with_scenario().await;
    source.fail("legend.json").await;

    let result = load_index(&source).await;
    assert!(matches!(result, Err(Error::Load { ref dataset, .. }) if dataset == "legend.json"));
}

/// Test that a document with the wrong shape is a load error
#[tokio::test]
async fn test_mock_source_invalid_structure() {
    let source = MockDataSource::with_scenario().await;
    source.put("group-data.json", r#"["not", "a", "roster"]"#).await;

    let result = load_index(&source).await;
    assert!(matches!(result, Err(Error::Load { ref dataset, .. }) if dataset == "group-data.json"));
}

/// Test that unified sites are picked up when present
#[tokio::test]
async fn test_mock_source_unified_sites() {
    let source = MockDataSource::with_scenario().await;
    source
        .put(
            "unified-sites.json",
            r#"{"unifiedSites": [{"name": "Medical Block", "postings": [{"code": "GM", "count": "all"}]}]}"#,
        )
        .await;

    let handle = RotaHandle::load(&source, LookupSettings::default())
        .await
        .unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
    let sites = handle.lookup_unified_site("Medical Block", date).unwrap();

    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].site, "Ward 4");
    assert_eq!(sites[0].students, "101, 102");
}
