//! CLI entry point for the passenger satisfaction explorer.
//!
//! Loads the survey dataset once, then either runs the interactive menu or
//! answers a single query given as a subcommand.

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};
use passenger_insights::analyzers::types::{Category, NumericField};
use passenger_insights::output::{
    format_distribution, format_numeric_stats, format_rates, format_record, format_record_table,
    format_service_ratings, print_json, print_pretty, thousands,
};
use passenger_insights::shell::Shell;
use passenger_insights::{Analyzer, LoaderOptions, load};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "passenger_insights")]
#[command(about = "Explore an airline passenger satisfaction survey", long_about = None)]
struct Cli {
    /// CSV file with one header line followed by survey rows
    #[arg(
        short,
        long,
        env = "PASSENGER_DATA_PATH",
        default_value = "data/airline_satisfaction.csv",
        global = true
    )]
    data: PathBuf,

    /// The source has no leading row-index column
    #[arg(long, default_value_t = false, global = true)]
    no_row_index: bool,

    /// Field delimiter
    #[arg(long, default_value_t = ',', global = true)]
    delimiter: char,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Menu,
    /// Print the comprehensive summary report
    Report {
        /// Also log the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Record counts per category
    Distribution {
        #[arg(value_enum)]
        field: Category,
    },
    /// Min/max/average of a numeric column
    Stats {
        #[arg(value_enum)]
        field: NumericField,
    },
    /// Satisfaction rate per category
    Rates {
        #[arg(value_enum)]
        field: Category,
    },
    /// Average rating of every service plus the top/bottom ranking
    Ratings,
    /// Look up a passenger by id
    Search { id: String },
    /// List flights with this exact date token
    Date { token: String },
    /// Show the first records in load order
    Sample {
        #[arg(short, default_value_t = 10)]
        n: usize,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/passenger_insights.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("passenger_insights.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    ensure!(
        cli.delimiter.is_ascii(),
        "delimiter must be a single ASCII character, got {:?}",
        cli.delimiter
    );
    let options = LoaderOptions::new()
        .delimiter(cli.delimiter as u8)
        .has_row_index(!cli.no_row_index);

    let (dataset, stats) = match load(&cli.data, &options) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!(error = %e, "Dataset could not be loaded");
            return Err(e)
                .with_context(|| format!("failed to load dataset from {}", cli.data.display()));
        }
    };
    info!(
        records = stats.rows_parsed,
        skipped = stats.rows_skipped,
        loaded_at = %stats.loaded_at,
        "Dataset ready"
    );
    print_pretty(&stats);

    let analyzer = Analyzer::new(&dataset);

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let stdin = std::io::stdin();
            Shell::new(analyzer, stdin.lock(), std::io::stdout()).run()?;
        }
        Commands::Report { json } => {
            let report = analyzer.comprehensive_report();
            if json {
                print_json(&report)?;
            }
            println!("{report}");
        }
        Commands::Distribution { field } => {
            let title = format!("{} DISTRIBUTION", field.label().to_uppercase());
            print!(
                "{}",
                format_distribution(&title, &analyzer.distribution_by(field))
            );
        }
        Commands::Stats { field } => {
            let stats = analyzer.numeric_stats(field);
            print!("{}", format_numeric_stats(field, stats.as_ref()));
        }
        Commands::Rates { field } => {
            let title = format!("SATISFACTION BY {}", field.label().to_uppercase());
            print!(
                "{}",
                format_rates(&title, &analyzer.satisfaction_rate_by(field))
            );
        }
        Commands::Ratings => {
            print!(
                "{}",
                format_service_ratings(
                    &analyzer.average_service_ratings(),
                    analyzer.overall_average_rating()
                )
            );
            if let Some(ranking) = analyzer.service_ranking() {
                print!("\n{ranking}");
            }
        }
        Commands::Search { id } => match analyzer.find_by_id(&id) {
            Some(record) => print!("{}", format_record(record)),
            None => println!("No passenger found with ID: {id}"),
        },
        Commands::Date { token } => {
            let hits = analyzer.find_by_date(&token);
            println!("Flights on {token}: {}", thousands(hits.len()));
            if !hits.is_empty() {
                print!("{}", format_record_table(hits));
            }
        }
        Commands::Sample { n } => {
            print!("{}", format_record_table(analyzer.sample(n)));
        }
    }

    Ok(())
}
