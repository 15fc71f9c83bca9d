//! Single page rendering command

use crate::app::{view, App};
use crate::config::CliConfigLoader;
use anyhow::Result;
use pagenav_core::NavigationOutcome;
use tracing::{info, warn};

/// Open the shell at a URL fragment and print the resulting page
pub async fn open_command(config_loader: CliConfigLoader, fragment: Option<String>) -> Result<()> {
    let config = config_loader.load().await?;
    let location = fragment.unwrap_or_default();
    info!("Opening '{}'", location);

    let app = App::build(&config, &location)?;
    match app.navigator.initialize().await? {
        NavigationOutcome::UnknownRoute(key) => warn!("No page registered for '{}'", key),
        NavigationOutcome::Rendered { degraded: true, page_key } => {
            warn!("Template for '{}' could not be loaded", page_key)
        }
        _ => {}
    }

    println!("{}", view::render_page(&app.navigator));
    Ok(())
}
