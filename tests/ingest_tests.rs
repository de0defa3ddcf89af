use chrono::NaiveDate;
use internship_rota::models::{Era, Roll, Schedule};
use internship_rota::parser::convert_directory;
use internship_rota::rota::{FsDataSource, LookupSettings, RotaHandle};
use std::fs;
use std::path::Path;

const AT_A_GLANCE: &str = "COMPLETE SCHEDULE\n\
DURATION\tPSM\tGM\tGS\tOBG\n\
06 JAN 25 - 12 JAN 25\tA2\tA1\t\t\n\
NEW SCHEDULE\n\
DURATION\tPSM\tGM\tGS\tOBG\n\
21 JUL 25 - 27 JUL 25\t\t\tA1\t\n";

const GROUP_A: &str = "Group A Detailed view\n\
DURATION\tA1\tA2\n\
06 JAN 25 - 12 JAN 25\tGM - FMTW\tPSM - UHC\n\
NEW DURATION\n\
\tA1\n\
21 JUL 25 - 27 JUL 25\tGS - W2\n";

const OLD_CODES: &str = "GROUP CODES\n\
CODE\tROLL. NO.\tCODE\tROLL. NO.\n\
A1\t101, 102\tA2\t103,R07*\n\
Directions to Candidates\n";

const NEW_CODES: &str = "CODE\tROLL. NO.\n\
A1\t301, 302\n";

const LEGEND: &str = "CODE\tSITE\tSPLIT\n\
GM - FMW\tFemale Medical Ward\tRounds and admissions\n\
GS - W2\tSurgical Ward 2\tDressings\n\
Postings rotate weekly.\n";

const GUIDELINES: &str = "1. Attendance\nSign in daily.\n";

const REGULATIONS: &str = "Abbreviation used\tDepartment\tDuration\n\
GM\tGeneral Medicine\t8 weeks\n\
GS\tGeneral Surgery\t8 weeks\n\
PSM\tCommunity Medicine\t12 weeks\n\
TOT\tTOTAL\t52 weeks\n";

fn write_exports(dir: &Path) {
    let files = [
        ("Internship - At a Glance.tsv", AT_A_GLANCE),
        ("Internship - Group A.tsv", GROUP_A),
        ("Internship - Group B.tsv", "DURATION\tB1\n"),
        ("Internship - Group C.tsv", "DURATION\tC1\n"),
        ("Internship - Group D.tsv", "DURATION\tD1\n"),
        ("Internship - Group Codes.tsv", OLD_CODES),
        ("Internship - NEW Group Codes.tsv", NEW_CODES),
        ("Internship - Legend.tsv", LEGEND),
        ("Internship - Guidelines.tsv", GUIDELINES),
        ("Internship - Regulations.tsv", REGULATIONS),
        ("Holidays.tsv", "26 JAN 25\tRepublic Day\n"),
        ("notes.txt", "not an export"),
    ];
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
}

/// Test converting a full export directory
#[test]
fn test_convert_directory() {
    let tsv_dir = tempfile::tempdir().unwrap();
    let json_dir = tempfile::tempdir().unwrap();
    write_exports(tsv_dir.path());

    // Output directory is created on demand
    let output = json_dir.path().join("json_data");
    let report = convert_directory(tsv_dir.path(), &output).unwrap();

    assert_eq!(report.converted.len(), 10);
    assert_eq!(report.skipped, vec!["Holidays.tsv".to_string()]);

    let roster: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output.join("old-group-data.json")).unwrap())
            .unwrap();
    assert_eq!(roster["A2"], serde_json::json!([103, "R7"]));

    let glance: Schedule =
        serde_json::from_str(&fs::read_to_string(output.join("schedule-data.json")).unwrap())
            .unwrap();
    assert_eq!(glance.weeks(Era::Old).len(), 1);
    assert_eq!(glance.weeks(Era::New)[0].postings["A1"], "GS");

    // Dates are stored as ISO strings
    let raw = fs::read_to_string(output.join("group-a-schedule.json")).unwrap();
    assert!(raw.contains("\"startDate\": \"2025-01-06\""));
}

/// Test the converted documents answering queries end to end
#[tokio::test]
async fn test_converted_data_answers_queries() {
    let tsv_dir = tempfile::tempdir().unwrap();
    let json_dir = tempfile::tempdir().unwrap();
    write_exports(tsv_dir.path());
    convert_directory(tsv_dir.path(), json_dir.path()).unwrap();

    let source = FsDataSource::new(json_dir.path());
    let handle = RotaHandle::load(&source, LookupSettings::default())
        .await
        .unwrap();

    let jan = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
    let answer = handle
        .lookup_student("102", jan, &mut rand::rng())
        .unwrap();
    assert_eq!(answer.department, "General Medicine");
    // GM - FMTW is the drifted spelling of GM - FMW
    assert_eq!(answer.site, "Female Medical Ward");
    assert_eq!(answer.colleagues, vec![Roll::Number(101)]);

    let july = NaiveDate::from_ymd_opt(2025, 7, 22).unwrap();
    let answer = handle
        .lookup_student("301", july, &mut rand::rng())
        .unwrap();
    assert_eq!(answer.department, "General Surgery");
    assert_eq!(answer.site, "Surgical Ward 2");

    let sites = handle.lookup_faculty("psm", jan).unwrap();
    assert_eq!(sites.len(), 1);
    assert_eq!(sites[0].site, "PSM - UHC");
    assert_eq!(sites[0].students, "103, R7");

    let names: Vec<&str> = handle.departments().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["General Medicine", "General Surgery", "Community Medicine"]
    );
}

/// Test that an empty export directory converts nothing without failing
#[test]
fn test_convert_empty_directory() {
    let tsv_dir = tempfile::tempdir().unwrap();
    let json_dir = tempfile::tempdir().unwrap();

    let report = convert_directory(tsv_dir.path(), json_dir.path()).unwrap();
    assert!(report.converted.is_empty());
    assert!(report.skipped.is_empty());
}
