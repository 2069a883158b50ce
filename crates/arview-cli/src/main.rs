mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arview", about = "Camera overlay compositing and snapshot tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Composite an overlay onto a camera frame and export the PNG
    Snapshot(commands::snapshot::SnapshotArgs),
    /// Show how a screen position maps into a video buffer
    Map(commands::map::MapArgs),
    /// Replay a recorded gesture script and print the resulting transform
    Replay(commands::replay::ReplayArgs),
    /// Print or save the default configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Snapshot(args) => commands::snapshot::run(args),
        Commands::Map(args) => commands::map::run(args),
        Commands::Replay(args) => commands::replay::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
