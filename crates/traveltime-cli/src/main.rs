use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "traveltime-cli", version, about = "Travel time estimator CLI")]
struct Cli {
    /// Show debug logs from the estimator
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate travel minutes between two locations
    Estimate(commands::estimate::EstimateArgs),
    /// Estimate every transport method side by side
    Compare(commands::estimate::CompareArgs),
    /// Show how two locations are classified
    Classify(commands::classify::ClassifyArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Home/work/university location hints
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
}

fn main() {
    let cli = Cli::parse();
    common::init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Estimate(args) => commands::estimate::run_estimate(args),
        Commands::Compare(args) => commands::estimate::run_compare(args),
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Profile { action } => commands::profile::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
