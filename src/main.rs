use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tavern_ledger::{
    app::{App, View},
    credential::CredentialStore,
    logging,
    settings::{Settings, default_settings_path, get_data_dir},
};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// View shown once the roster is loaded
    #[arg(long, value_enum, default_value_t = View::Dashboard)]
    view: View,

    /// Settings file holding the token and the repository location
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let settings_path = cli.settings.unwrap_or_else(default_settings_path);
    // The logger needs `debug_mode`, so a settings failure is only logged once it is up.
    let (credentials, settings_error) = match CredentialStore::load(&settings_path) {
        Ok(credentials) => (credentials, None),
        Err(e) => (
            CredentialStore::with_settings(Settings::default(), &settings_path),
            Some(e),
        ),
    };

    if let Err(e) = logging::init(get_data_dir(), credentials.settings().debug_mode) {
        eprintln!("Failed to initialize logging: {e}");
    }
    if let Some(e) = settings_error {
        log::info!("No usable settings at {}: {e}", settings_path.display());
    }
    log::info!(
        "Tavern Ledger start: {} ({})",
        chrono::Local::now(),
        settings_path.display()
    );

    let mut app = App::new(credentials, cli.view);
    app.run().await
}
