//! Row grammars that turn spreadsheet TSV exports into the canonical JSON
//! documents, plus the filename router that picks a grammar per export.

pub mod guidelines;
pub mod legend;
pub mod regulations;
pub mod roster;
pub mod routing;
pub mod schedule;
pub mod tabular;

pub use routing::{classify, DatasetKind};

use crate::error::RotaResult;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// What a directory conversion did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// (input file name, output file name) per converted export
    pub converted: Vec<(String, String)>,
    /// Exports no routing rule recognised
    pub skipped: Vec<String>,
}

/// Convert every `.tsv` file in `tsv_dir` into its JSON document in `output_dir`
pub fn convert_directory(tsv_dir: &Path, output_dir: &Path) -> RotaResult<ConversionReport> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
        info!("Created output directory: {}", output_dir.display());
    }

    info!("Scanning for TSV files in {}", tsv_dir.display());

    let mut entries: Vec<_> = fs::read_dir(tsv_dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "tsv"))
        .collect();
    entries.sort();

    let mut report = ConversionReport::default();

    for path in entries {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Some(kind) = classify(&file_name) else {
            info!("Skipping unrecognized TSV file: {}", file_name);
            report.skipped.push(file_name);
            continue;
        };

        info!("Processing {}: {}", kind, file_name);
        let content = fs::read_to_string(&path)?;
        let json = kind.convert(&content)?;

        let output_name = kind.output_file_name();
        fs::write(output_dir.join(&output_name), json)?;
        info!("Converted {} -> {}", file_name, output_name);

        report.converted.push((file_name, output_name));
    }

    if report.converted.is_empty() {
        warn!(
            "No TSV files were converted. Make sure the exports are in {}",
            tsv_dir.display()
        );
    }

    Ok(report)
}
