//! Route listing command

use crate::app::{view, App};
use crate::config::CliConfigLoader;
use anyhow::Result;
use tracing::info;

/// Show registered pages
pub async fn routes_command(config_loader: CliConfigLoader) -> Result<()> {
    let config = config_loader.load().await?;
    let app = App::build(&config, "")?;
    let navigator = &app.navigator;

    info!("Listing {} registered pages", navigator.registry().len());
    println!(
        "{}",
        view::render_routes(navigator.registry(), &navigator.config().landing_page)
    );

    Ok(())
}
