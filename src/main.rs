use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use slot_oracle::airline::loader::AirlineFile;
use slot_oracle::config::{Config, ConfigOverrides};
use slot_oracle::engine::batch::rank_by_priority;
use slot_oracle::engine::{evaluate_month, CandidateEvaluator, CandidateRecord};
use slot_oracle::network::minimum_ops::{minimum_operations_table, MinimumOperations};
use slot_oracle::network::routes::{load_routes, sample_routes};
use slot_oracle::network::{Dataset, Route};
use slot_oracle::output::csv::{candidates_to_csv, minimum_ops_to_csv, round_trips_to_csv};
use slot_oracle::output::json::render_json;
use slot_oracle::output::table::{
    render_candidates_table, render_minimum_ops_table, render_round_trip_table,
    render_weights_table,
};
use slot_oracle::round_trip::{match_round_trips, MatchOptions, RoundTripRecord};
use slot_oracle::weights::{AirlineWeights, WeightsReport};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "slot-oracle",
    about = "Departure candidate pricing and priority scoring"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Airline file (TOML or JSON)
    #[arg(short, long)]
    airline: Option<String>,
    /// Route list (CSV or JSON)
    #[arg(short, long)]
    routes: Option<String>,
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long)]
    month: Option<u32>,
    #[arg(short, long)]
    year: Option<i32>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Evaluate every candidate departure of the month
    Candidates {
        #[arg(long, default_value_t = 20)]
        top: usize,
        #[arg(long)]
        dataset: Option<Dataset>,
        /// Write one CSV per dataset into the output directory
        #[arg(long)]
        write: bool,
    },
    /// Evaluate the month and pair outbound with inbound candidates
    RoundTrip {
        #[arg(long, default_value_t = 20)]
        top: usize,
        #[arg(long)]
        feasible_only: bool,
        #[arg(long)]
        max_day_offset: Option<u32>,
    },
    /// Show the airline's round-trip weight split
    Weights,
    /// Draw the monthly minimum operation count for each route
    MinimumOps {
        /// Write the table as CSV into the output directory
        #[arg(long)]
        write: bool,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        profile_path: cli.airline.clone(),
        routes_path: cli.routes.clone(),
        seed: cli.seed,
        year: cli.year,
        month: cli.month,
    });

    if let Commands::Config { init, show } = &cli.command {
        return handle_config_command(*init, *show, &config, &config_path);
    }

    let airline = load_airline(&config)?;

    match &cli.command {
        Commands::Weights => {
            print_weights(&WeightsReport::for_profile(&airline.profile), cli.output)?;
        }
        Commands::MinimumOps { write } => {
            let routes = load_network(&config)?;
            let rows = minimum_operations_table(&airline.profile, &routes, config.engine.seed);
            if *write {
                write_minimum_ops(&rows, &config.resolved_output_dir())?;
            }
            print_minimum_ops(&rows, cli.output)?;
        }
        Commands::Candidates {
            top,
            dataset,
            write,
        } => {
            let mut records = run_month(&config, airline).await?;
            if *write {
                write_datasets(&records, &config.resolved_output_dir())?;
            }
            if let Some(dataset) = dataset {
                records.retain(|r| r.dataset == *dataset);
            }
            rank_by_priority(&mut records);
            records.truncate(*top);
            print_candidates(&records, cli.output)?;
        }
        Commands::RoundTrip {
            top,
            feasible_only,
            max_day_offset,
        } => {
            let weights = AirlineWeights::derive(&airline.profile);
            let max_day_offset = max_day_offset.unwrap_or(config.round_trip.max_day_offset);
            let feasible_only = *feasible_only || config.round_trip.feasible_only;
            let records = run_month(&config, airline).await?;
            let options = MatchOptions {
                max_day_offset,
                feasible_only,
                limit: *top,
            };
            let pairs = match_round_trips(&records, &weights, options);
            info!(
                pairs = pairs.len(),
                waste_weight = weights.waste_weight,
                priority_weight = weights.priority_weight,
                "round trips scored"
            );
            print_round_trips(&pairs, cli.output)?;
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn handle_config_command(
    init: bool,
    show: bool,
    config: &Config,
    config_path: &Path,
) -> Result<()> {
    if init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if show || !init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn load_airline(config: &Config) -> Result<AirlineFile> {
    match config.resolved_profile_path() {
        Some(path) => AirlineFile::load(&path),
        None => {
            warn!("no airline file configured, using the sample airline");
            Ok(AirlineFile::sample())
        }
    }
}

fn load_network(config: &Config) -> Result<Vec<Route>> {
    match config.resolved_routes_path() {
        Some(path) => load_routes(&path),
        None => {
            warn!("no routes file configured, using the sample network");
            Ok(sample_routes())
        }
    }
}

async fn run_month(config: &Config, airline: AirlineFile) -> Result<Vec<CandidateRecord>> {
    let routes = load_network(config)?;
    let schedule = config.month_schedule()?;
    let evaluator = Arc::new(
        CandidateEvaluator::new(airline, config.engine.seed)
            .with_debug_sample_rate(config.engine.debug_sample_rate),
    );
    evaluate_month(evaluator, &routes, &schedule).await
}

fn write_datasets(records: &[CandidateRecord], dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed creating output directory: {}", dir.display()))?;
    for dataset in Dataset::ALL {
        let rows: Vec<CandidateRecord> = records
            .iter()
            .filter(|r| r.dataset == dataset)
            .cloned()
            .collect();
        if rows.is_empty() {
            continue;
        }
        let path = dir.join(format!("{}_candidates.csv", dataset.as_slug()));
        fs::write(&path, candidates_to_csv(&rows)?)
            .with_context(|| format!("failed writing {}", path.display()))?;
        info!(dataset = %dataset, rows = rows.len(), path = %path.display(), "dataset written");
    }
    Ok(())
}

fn write_minimum_ops(rows: &[MinimumOperations], dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed creating output directory: {}", dir.display()))?;
    let path = dir.join("monthly_minimum_operations.csv");
    fs::write(&path, minimum_ops_to_csv(rows)?)
        .with_context(|| format!("failed writing {}", path.display()))?;
    info!(rows = rows.len(), path = %path.display(), "minimum operations written");
    Ok(())
}

fn print_candidates(records: &[CandidateRecord], output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Table => println!("{}", render_candidates_table(records)),
        OutputFormat::Json => println!("{}", render_json(records)?),
        OutputFormat::Csv => println!("{}", candidates_to_csv(records)?),
    }
    Ok(())
}

fn print_round_trips(pairs: &[RoundTripRecord], output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Table => println!("{}", render_round_trip_table(pairs)),
        OutputFormat::Json => println!("{}", render_json(pairs)?),
        OutputFormat::Csv => println!("{}", round_trips_to_csv(pairs)?),
    }
    Ok(())
}

fn print_minimum_ops(rows: &[MinimumOperations], output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Table => println!("{}", render_minimum_ops_table(rows)),
        OutputFormat::Json => println!("{}", render_json(rows)?),
        OutputFormat::Csv => println!("{}", minimum_ops_to_csv(rows)?),
    }
    Ok(())
}

fn print_weights(report: &WeightsReport, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Table => println!("{}", render_weights_table(report)),
        OutputFormat::Json | OutputFormat::Csv => {
            if matches!(output, OutputFormat::Csv) {
                warn!("CSV output for weights not implemented, using JSON");
            }
            println!("{}", render_json(report)?);
        }
    }
    Ok(())
}
