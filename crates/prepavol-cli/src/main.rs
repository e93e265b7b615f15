use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use prepavol_cli::output::OutputFormat;

mod commands;

use commands::performance::{GridArgs, PerfArgs};
use commands::trip::TripArgs;
use commands::{ConditionsArgs, LoadingArgs};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Light-aircraft weight-and-balance and performance planning"
)]
struct Cli {
    /// Override the reference data directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the aircraft of the fleet catalog.
    Fleet,
    /// Compute the weight-and-balance report of a loading.
    Balance(LoadingArgs),
    /// Predict take-off or landing distances for a loading and field conditions.
    Perf(PerfArgs),
    /// Sample the distance over pressure altitude and temperature.
    Grid(GridArgs),
    /// Compute pressure and density altitude.
    Altitude(ConditionsArgs),
    /// Check the fuel on board against a planned flight.
    Trip(TripArgs),
    /// Show an airfield of the directory.
    Airfield {
        /// ICAO code, e.g. LFMT.
        code: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let data_dir = cli.data_dir.as_deref();

    match &cli.command {
        Command::Fleet => commands::fleet::handle_fleet(data_dir, cli.format),
        Command::Balance(args) => commands::balance::handle_balance(data_dir, cli.format, args),
        Command::Perf(args) => commands::performance::handle_perf(data_dir, cli.format, args),
        Command::Grid(args) => commands::performance::handle_grid(data_dir, cli.format, args),
        Command::Altitude(args) => commands::airfield::handle_altitude(data_dir, cli.format, args),
        Command::Trip(args) => commands::trip::handle_trip(data_dir, cli.format, args),
        Command::Airfield { code } => commands::airfield::handle_airfield(data_dir, cli.format, code),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
