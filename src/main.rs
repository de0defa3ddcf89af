#[macro_use]
extern crate rust_i18n;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use internship_rota::config::Config;
use internship_rota::error::{other_error, Error};
use internship_rota::rota::SiteStudents;
use internship_rota::startup;
use internship_rota::utils::time::{parse_query_date, today_in};
use tracing::info;

// Initialize i18n
i18n!("locales", fallback = "en");

#[derive(Parser)]
#[command(name = "rota")]
#[command(about = "Look up intern clinical postings by date", long_about = None)]
struct Cli {
    /// Print answers as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Where a roll number or group is posted
    Student {
        /// Roll number (e.g. 103, R007) or group code (e.g. A2)
        roll: String,

        /// Date as YYYY-MM-DD or "21 Jul 25"; defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Who is posted in a department
    Faculty {
        /// Department abbreviation, name, or search term
        department: String,

        #[arg(long)]
        date: Option<String>,
    },

    /// Who is at a unified site
    Site {
        name: String,

        #[arg(long)]
        date: Option<String>,
    },

    /// List the departments
    Departments,
}

fn query_date(config: &Config, date: Option<&str>) -> Result<NaiveDate, Error> {
    match date {
        Some(text) => parse_query_date(text)
            .ok_or_else(|| other_error(&format!("Unrecognised date: {}", text))),
        None => Ok(today_in(config.timezone)),
    }
}

fn print_sites(sites: &[SiteStudents], json: bool) -> Result<(), Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(sites)?);
        return Ok(());
    }
    for entry in sites {
        println!("{}: {}", entry.site, entry.students);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    let cli = Cli::parse();

    // Load configuration
    let config = startup::load_config()?;
    let handle = startup::load_handle(&config).await?;
    info!("Schedule data ready");

    match cli.command {
        Commands::Student { roll, date } => {
            let date = query_date(&config, date.as_deref())?;
            let answer = handle
                .lookup_student(&roll, date, &mut rand::rng())
                .map_err(Error::from)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&answer).map_err(Error::from)?);
                return Ok(());
            }
            println!("{}: {}", t!("label_group"), answer.group);
            println!("{}: {}", t!("label_department"), answer.department);
            println!("{}: {}", t!("label_site"), answer.site);
            println!("{}: {}", t!("label_task"), answer.task);
            println!("{}: {}", t!("label_colleagues"), answer.colleagues_text());
            if let Some(guideline) = answer.guideline {
                println!(
                    "{}: {} {}",
                    t!("label_guideline"),
                    guideline.title,
                    guideline.points.join(" ")
                );
            }
        }
        Commands::Faculty { department, date } => {
            let date = query_date(&config, date.as_deref())?;
            let sites = handle
                .lookup_faculty(&department, date)
                .map_err(Error::from)?;
            print_sites(&sites, cli.json)?;
        }
        Commands::Site { name, date } => {
            let date = query_date(&config, date.as_deref())?;
            let sites = handle
                .lookup_unified_site(&name, date)
                .map_err(Error::from)?;
            print_sites(&sites, cli.json)?;
        }
        Commands::Departments => {
            let departments = handle.departments();
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(departments).map_err(Error::from)?
                );
            } else if departments.is_empty() {
                println!("{}", t!("no_departments"));
            } else {
                for department in departments {
                    println!("{:<8} {}", department.code, department.name);
                }
            }
        }
    }

    Ok(())
}
