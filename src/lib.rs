pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    /// Fetch and print the dashboard, optionally against another API host
    Dashboard { base_url: Option<String> },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxdash starting...");

    let mut config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Dashboard { base_url } => {
            if let Some(url) = base_url {
                config.api.base_url = url;
            }
            let source = providers::HttpDashboardSource::new(&config.api)?;
            cli::dashboard::run(Arc::new(source), config.display_name.as_deref()).await
        }
    }
}
