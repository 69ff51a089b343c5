mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "idphoto", about = "ID photo cropping and background tool")]
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
    /// Suggest an ID-photo crop for an image
    Suggest(commands::suggest::SuggestArgs),
    /// Crop, composite and save ID photos
    Compose(commands::compose::ComposeArgs),
    /// List preset background colors
    Colors,
    /// Print a default config file
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
        Commands::Suggest(args) => commands::suggest::run(args),
        Commands::Compose(args) => commands::compose::run(args),
        Commands::Colors => commands::colors::run(),
        Commands::Config(args) => commands::config::run(args),
    }
}
