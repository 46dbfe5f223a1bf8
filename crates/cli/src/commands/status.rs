//! Summary of the persisted state.

use tracing::info;

use tanish_arts_storefront::{DurableStore, Storefront};

use super::CliError;

/// Log the storefront summary as JSON.
///
/// # Errors
///
/// Returns `CliError::Render` if the summary cannot be serialized.
pub fn show<S: DurableStore>(storefront: &Storefront<S>) -> Result<(), CliError> {
    let summary = serde_json::to_string_pretty(&storefront.summary()).map_err(CliError::Render)?;
    info!("Status:\n{summary}");
    Ok(())
}
