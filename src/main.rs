// Entrypoint for the CLI application.
// - Keeps `main` small: init logging, resolve the database location, open
//   the store and hand it to the UI loop.
// - Returns `anyhow::Result` to simplify error handling at the top level.

use std::path::Path;

use campus_eats_cli::{config::Config, store::Database, ui::main_menu};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the interactive tables on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    let database_url = config.database_url();
    if let Some(parent) = Path::new(&database_url).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::open(&database_url)?;

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(db)?;
    Ok(())
}
