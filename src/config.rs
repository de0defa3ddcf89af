use crate::error::{config_error, RotaResult};
use crate::rota::{CodeTables, LookupSettings, DEFAULT_PIVOT_DATE};
use chrono::NaiveDate;
use chrono_tz::Tz;
use dotenvy::dotenv;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info};

/// Default directory of the normalized JSON documents
pub const DEFAULT_DATA_DIR: &str = "database/json_data";
/// Default directory of the raw spreadsheet exports
pub const DEFAULT_TSV_DIR: &str = "database/TSV_data";
/// Default location of the code table overrides
pub const DEFAULT_CODE_TABLES: &str = "config/code_tables.toml";

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the normalized JSON documents
    pub data_dir: PathBuf,
    /// Directory holding the TSV exports
    pub tsv_dir: PathBuf,
    /// First day of the new schedule era
    pub pivot_date: NaiveDate,
    /// Timezone used to work out "today"
    pub timezone: Tz,
    /// Locale for user-facing text
    pub locale: String,
    /// Code tables after merging the optional file over the defaults
    pub tables: CodeTables,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> RotaResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let data_dir = env::var("ROTA_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        let tsv_dir = env::var("ROTA_TSV_DIR").unwrap_or_else(|_| DEFAULT_TSV_DIR.to_string());

        let pivot_date = match env::var("ROTA_PIVOT_DATE") {
            Ok(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map_err(|_| config_error(&format!("Invalid ROTA_PIVOT_DATE: {}", value)))?,
            Err(_) => {
                let (y, m, d) = DEFAULT_PIVOT_DATE;
                NaiveDate::from_ymd_opt(y, m, d)
                    .ok_or_else(|| config_error("Invalid built-in pivot date"))?
            }
        };

        // Default timezone
        let timezone_name = env::var("TIMEZONE").unwrap_or_else(|_| String::from("UTC"));
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|_| config_error(&format!("Unknown TIMEZONE: {}", timezone_name)))?;

        let locale = env::var("ROTA_LOCALE").unwrap_or_else(|_| String::from("en"));

        let tables_path =
            env::var("ROTA_CODE_TABLES").unwrap_or_else(|_| DEFAULT_CODE_TABLES.to_string());
        let tables = load_code_tables(&tables_path)?;

        Ok(Config {
            data_dir: PathBuf::from(data_dir),
            tsv_dir: PathBuf::from(tsv_dir),
            pivot_date,
            timezone,
            locale,
            tables,
        })
    }

    /// Input and output directories of a conversion run, explicit paths
    /// taking precedence over the configured ones
    pub fn conversion_dirs(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> (PathBuf, PathBuf) {
        (
            input.unwrap_or_else(|| self.tsv_dir.clone()),
            output.unwrap_or_else(|| self.data_dir.clone()),
        )
    }

    /// Settings the resolution engine needs
    pub fn lookup_settings(&self) -> LookupSettings {
        LookupSettings {
            pivot: self.pivot_date,
            tables: self.tables.clone(),
        }
    }
}

/// Built-in tables, with the file at `path` merged over them when it exists
pub fn load_code_tables(path: &str) -> RotaResult<CodeTables> {
    let mut tables = CodeTables::default();

    match fs::read_to_string(path) {
        Ok(content) => {
            let overrides: CodeTables = toml::from_str(&content)?;
            tables.merge(overrides);
            info!("Merged code tables from {}", path);
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No code table file at {}, using defaults", path)
        }
        Err(e) => {
            return Err(config_error(&format!(
                "Cannot read code tables {}: {}",
                path, e
            )))
        }
    }

    tables.validate()?;
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_code_table_file_uses_defaults() {
        let tables = load_code_tables("does/not/exist.toml").unwrap();
        assert_eq!(tables, CodeTables::default());
    }

    #[test]
    fn test_code_table_file_is_merged_and_validated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[canonical]\n\"OPD - X\" = \"OPD\"").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let tables = load_code_tables(&path).unwrap();
        assert_eq!(tables.canonicalize("OPD - X"), "OPD");
        // Defaults survive the overlay
        assert_eq!(tables.canonicalize("FP & AY"), "FP&AY");

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "[canonical]\n\"GM - FMW\" = \"GM\"").unwrap();
        let bad_path = bad.path().to_string_lossy().into_owned();
        // GM - FMTW -> GM - FMW -> GM is a chain
        assert!(load_code_tables(&bad_path).is_err());
    }

    #[test]
    fn test_unreadable_code_table_file_is_an_error() {
        // A directory exists but cannot be read as a file
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().into_owned();
        assert!(load_code_tables(&path).is_err());
    }
}
