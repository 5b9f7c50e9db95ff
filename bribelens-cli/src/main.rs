//! bribelens CLI - prints one aggregate chart as JSON
//!
//! A thin stand-in for the dashboard's presentation layer: it picks one of
//! the five chart selections, runs it against the configured database, and
//! writes the chart-ready table plus metadata (or the no-data marker) to
//! stdout as JSON. Rendering itself stays external.

use anyhow::{Context, Result};
use bribelens_charts::{top_departments, top_districts, ChartSelection};
use bribelens_db::{Db, DbConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "bribelens",
    author,
    version,
    about = "Read-only analytics over reported bribe incidents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one aggregation and print its chart as JSON
    Render(RenderArgs),
    /// List the five chart selection labels
    List,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ChartArg {
    /// Histogram of amounts over fixed rupee ranges
    Distribution,
    /// Total amount per state/UT
    States,
    /// Top departments by total amount
    Departments,
    /// Top districts by total amount
    Districts,
    /// Monthly report counts
    Timeline,
}

impl ChartArg {
    fn selection(self) -> ChartSelection {
        match self {
            ChartArg::Distribution => ChartSelection::AmountDistribution,
            ChartArg::States => ChartSelection::TotalsByState,
            ChartArg::Departments => ChartSelection::TopDepartments,
            ChartArg::Districts => ChartSelection::TopDistricts,
            ChartArg::Timeline => ChartSelection::ReportsOverTime,
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Which chart to build
    #[arg(value_enum)]
    chart: ChartArg,

    /// Cap for the departments/districts charts (defaults 15 and 20)
    #[arg(long)]
    top_n: Option<i64>,

    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Lower pool bound
    #[arg(long, default_value_t = 1)]
    min_connections: u32,

    /// Upper pool bound
    #[arg(long, default_value_t = 15)]
    max_connections: u32,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

fn init_tracing() {
    // Logs go to stderr; stdout is reserved for the JSON result
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => run_render(args).await?,
        Commands::List => {
            for selection in ChartSelection::ALL {
                println!("{}", selection.label());
            }
        }
    }

    Ok(())
}

async fn run_render(args: RenderArgs) -> Result<()> {
    let config = DbConfig::new(&args.database_url)
        .min_connections(args.min_connections)
        .max_connections(args.max_connections);
    let db = Db::connect(&config)
        .await
        .context("failed to connect to database")?;

    let outcome = match (args.chart, args.top_n) {
        (ChartArg::Departments, Some(n)) => top_departments(&db, n).await,
        (ChartArg::Districts, Some(n)) => top_districts(&db, n).await,
        (chart, _) => chart.selection().render(&db).await,
    }
    .context("data access failed")?;

    if outcome.is_no_data() {
        tracing::info!(chart = ?args.chart, "no data for selection");
    }
    let json = if args.pretty {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string(&outcome)?
    };
    println!("{json}");

    db.close().await;
    Ok(())
}
