use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use airroute_cli::commands::download::handle_download;
use airroute_cli::commands::route::{handle_route_command, RouteCommandArgs};
use airroute_cli::output::OutputFormat;
use airroute_lib::MAX_HOPS;

#[derive(Parser, Debug)]
#[command(author, version, about = "Least-distance airport route finder")]
struct Cli {
    /// Override the dataset directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ensure the OpenFlights dataset is downloaded and report its location.
    Download,
    /// Compute the least-distance route between two airports.
    Route {
        /// Departure airport IATA code.
        #[arg(long = "from")]
        from: String,
        /// Arrival airport IATA code.
        #[arg(long = "to")]
        to: String,
        /// Maximum number of connecting flights.
        #[arg(long, default_value_t = MAX_HOPS)]
        max_hops: usize,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Download => handle_download(cli.data_dir.as_deref(), cli.format),
        Command::Route { from, to, max_hops } => {
            let args = RouteCommandArgs { from, to, max_hops };
            handle_route_command(cli.data_dir.as_deref(), &args, cli.format)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
