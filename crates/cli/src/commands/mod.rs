//! CLI command implementations.
//!
//! Every command opens the file store, runs one storefront command and then
//! reports the notifications it posted. A refused command is not a failure
//! of the CLI: its notification already says why.

pub mod account;
pub mod address;
pub mod cart;
pub mod location;
pub mod review;
pub mod status;
pub mod wishlist;

use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info, warn};

use tanish_arts_core::NotificationKind;
use tanish_arts_storefront::{
    ConfigError, DurableStore, FileStore, NavigationIntent, StoreError, Storefront,
    StorefrontConfig, models::Catalog,
};

/// Catalog used when no catalog file is configured.
const BUNDLED_CATALOG: &str = include_str!("../../catalog.json");

/// Errors that stop the CLI before or after a command runs.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The data directory could not be opened.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// The bundled catalog is malformed.
    #[error("Invalid bundled catalog: {0}")]
    Catalog(#[source] serde_json::Error),

    /// Output could not be rendered.
    #[error("Failed to render output: {0}")]
    Render(#[source] serde_json::Error),
}

/// Load configuration, apply command-line overrides and open the storefront.
///
/// # Errors
///
/// Returns `CliError` if configuration, the catalog or the data directory
/// cannot be loaded.
pub fn open(
    data_dir: Option<PathBuf>,
    catalog: Option<PathBuf>,
) -> Result<Storefront<FileStore>, CliError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir;
    }
    if catalog.is_some() {
        config.catalog_path = catalog;
    }

    let catalog = if config.catalog_path.is_some() {
        config.load_catalog()?
    } else {
        Catalog::from_json(BUNDLED_CATALOG).map_err(CliError::Catalog)?
    };

    let store = FileStore::open(&config.data_dir)?;
    info!(data_dir = %config.data_dir.display(), products = catalog.len(), "Opened storefront");
    Ok(Storefront::open(config, store, catalog))
}

/// Log every pending notification at a level matching its kind.
pub fn report_notifications<S: DurableStore>(storefront: &Storefront<S>) {
    for notification in storefront.notifications() {
        match notification.kind {
            NotificationKind::Error => error!("{}", notification.message),
            NotificationKind::Warning => warn!("{}", notification.message),
            NotificationKind::Info | NotificationKind::Success => {
                info!("{}", notification.message);
            }
        }
    }
}

/// Log where the presentation layer would go next.
pub fn report_navigation(intent: NavigationIntent) {
    info!(path = intent.path(), "Next: {intent}");
}
