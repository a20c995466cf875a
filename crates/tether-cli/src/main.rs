use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tether")]
#[command(about = "Signature scan diagnostics for the Tether mod")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the handling offset and time-scale array in a running process
    Scan {
        /// Executable name of the game process
        #[arg(short, long, default_value = "GTA5.exe")]
        process: String,
    },
    /// Poll the time-scale array until interrupted
    Watch {
        /// Executable name of the game process
        #[arg(short, long, default_value = "GTA5.exe")]
        process: String,

        /// Poll interval in milliseconds
        #[arg(long, default_value_t = 500)]
        interval_ms: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tether_core=info".parse()?))
        .init();

    let args = Args::parse();

    match args.command {
        Command::Scan { process } => commands::scan::run(&process),
        Command::Watch {
            process,
            interval_ms,
        } => commands::watch::run(&process, interval_ms),
    }
}
