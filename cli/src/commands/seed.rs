//! Sample data command

use crate::app::seed::seed_library;
use crate::app::App;
use crate::config::CliConfigLoader;
use anyhow::Result;

/// Fill the record store with the sample collection
pub async fn seed_command(config_loader: CliConfigLoader, force: bool) -> Result<()> {
    let config = config_loader.load().await?;
    let app = App::build(&config, "")?;

    let written = seed_library(&app.store, force)?;
    if written == 0 {
        println!(
            "Library at {} already has games, use --force to replace them",
            config.store_path.display()
        );
    } else {
        println!("Seeded {} games into {}", written, config.store_path.display());
    }

    Ok(())
}
