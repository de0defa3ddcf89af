use clap::Parser;
use internship_rota::parser::convert_directory;
use internship_rota::startup;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "convert_tsv")]
#[command(about = "Convert schedule TSV exports into JSON documents", long_about = None)]
struct Args {
    /// Directory with the .tsv exports (defaults to ROTA_TSV_DIR)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory the JSON documents are written to (defaults to ROTA_DATA_DIR)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    let args = Args::parse();
    let config = startup::load_config()?;
    let (input, output) = config.conversion_dirs(args.input, args.output);

    let report = convert_directory(&input, &output)?;

    info!(
        "Conversion complete: {} converted, {} skipped",
        report.converted.len(),
        report.skipped.len()
    );
    Ok(())
}
