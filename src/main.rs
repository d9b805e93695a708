use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use demand_pressure::api::build_stats_report;
use demand_pressure::config::{default_config_path, AppConfig};
use demand_pressure::scoring::heat_level_at;
use demand_pressure::server;
use demand_pressure::store::DemandStore;
use demand_pressure::{
    escalation_progress, escalation_stage, format_float, format_number, format_percent,
    signers_to_next_stage,
};

#[derive(Parser)]
#[command(name = "demand-pressure", about = "Pressure and escalation scoring for demands")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print platform stats, the pressure board and trending demands
    Report(ReportArgs),
    /// Show the escalation stage for a co-signer count
    Stage(StageArgs),
    /// Serve the read-only stats API
    Serve(ServeArgs),
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug, Clone)]
struct ReportArgs {
    #[arg(long)]
    data: Option<PathBuf>,
    #[arg(long)]
    limit: Option<usize>,
    /// Emit the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct StageArgs {
    count: u64,
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write the effective configuration to a TOML file
    Init {
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("demand_pressure=info")),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (mut config, config_path) = AppConfig::load(cli.config)?;
    if let Some(path) = config_path.as_ref().filter(|path| path.exists()) {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    match cli.command {
        Command::Report(args) => {
            if let Some(data) = args.data.clone() {
                config.data.demands_path = data;
            }
            run_report(&config, args).await
        }
        Command::Stage(args) => {
            run_stage(args.count);
            Ok(())
        }
        Command::Serve(args) => {
            if let Some(host) = args.host {
                config.server.host = host;
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
            if let Some(data) = args.data {
                config.data.demands_path = data;
            }
            server::serve(config).await
        }
        Command::Config(ConfigCommand::Init { path }) => {
            let target = path
                .or(config_path)
                .or_else(default_config_path)
                .ok_or_else(|| "no config path available".to_string())?;
            config.write(&target)?;
            println!("Wrote config to {}", target.display());
            Ok(())
        }
    }
}

async fn run_report(config: &AppConfig, args: ReportArgs) -> Result<(), String> {
    let store = DemandStore::load(config.data.demands_path.clone()).await?;
    let demands = store.list().await;
    let limit = args.limit.unwrap_or(config.stats.trending_limit);
    let now = Utc::now();
    let report = build_stats_report(&demands, limit, now);

    if args.json {
        let payload = serde_json::to_string_pretty(&report)
            .map_err(|err| format!("failed to serialize report: {}", err))?;
        println!("{}", payload);
        return Ok(());
    }

    println!(
        "Demands: {} ({} active, {} met) against {} companies",
        format_number(report.stats.total_demands as f64),
        format_number(report.stats.active_demands as f64),
        format_number(report.stats.demands_met as f64),
        format_number(report.stats.companies_targeted as f64)
    );
    println!(
        "Co-signers: {}",
        format_number(report.stats.total_co_signers as f64)
    );

    if !report.pressure_board.is_empty() {
        println!("\nPressure board:");
        for entry in &report.pressure_board {
            println!(
                "  #{} {} | pressure {} | active {} | co-signers {} | velocity {}/day",
                entry.rank,
                entry.company_name,
                format_number(entry.pressure_score as f64),
                entry.active_demands,
                format_number(entry.total_co_signers as f64),
                format_float(entry.velocity, 1)
            );
        }
    }

    if !report.trending.is_empty() {
        println!("\nTrending:");
        for demand in &report.trending {
            let stage = escalation_stage(demand.co_sign_count);
            let heat = heat_level_at(demand, now);
            println!(
                "  {} ({}) | {} co-signers | {} | {}",
                display_title(&demand.title, &demand.id),
                demand.target_company,
                format_number(demand.co_sign_count as f64),
                stage.label(),
                heat.label()
            );
        }
    }

    Ok(())
}

fn run_stage(count: u64) {
    let stage = escalation_stage(count);
    let descriptor = stage.descriptor();
    println!(
        "{} {} ({} co-signers)",
        descriptor.icon,
        descriptor.label,
        format_number(count as f64)
    );
    println!("Ladder progress: {}", format_percent(escalation_progress(count)));
    match signers_to_next_stage(count) {
        Some(remaining) => println!("Co-signers to next stage: {}", format_number(remaining as f64)),
        None => println!("Top of the ladder"),
    }
}

fn display_title<'a>(title: &'a str, id: &'a str) -> &'a str {
    if title.trim().is_empty() {
        id
    } else {
        title
    }
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
