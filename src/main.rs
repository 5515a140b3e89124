use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxdash::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Fetch exchange rates and the financial summary and display them
    Dashboard {
        /// Override the API base URL from the configuration
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxdash::cli::setup::setup().map(|path| {
            println!("Created default configuration at {}", path.display());
        }),
        Some(Commands::Dashboard { base_url }) => {
            fxdash::run_command(
                fxdash::AppCommand::Dashboard { base_url },
                cli.config_path.as_deref(),
            )
            .await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
