//! # atoll CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Atoll Stack CLI — real-world-asset tokenization toolchain.
///
/// Runs scripted asset lifecycle scenarios and compliance gate
/// walkthroughs against the in-memory ledger.
#[derive(Parser, Debug)]
#[command(name = "atoll", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run a scripted asset lifecycle scenario.
    Demo(atoll_cli::demo::DemoArgs),
    /// Exercise the compliance gate in isolation.
    Compliance(atoll_cli::compliance::ComplianceArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo(args) => atoll_cli::demo::run(args),
        Commands::Compliance(args) => atoll_cli::compliance::run(args),
    }
}
