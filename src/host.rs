//! Narrow interfaces onto the hosting application.
//!
//! The store never talks to the host directly; the plugin shell installs
//! implementations of these traits at load and the store calls through them.

use std::fmt::Debug;
use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

/// File surface of the host vault.
///
/// The store only checks for a file and deletes it; everything else the
/// vault can do stays with the host.
#[async_trait]
pub trait Vault: Send + Sync + Debug {
    /// Whether `path` currently resolves to a file inside the vault.
    fn contains(&self, path: &Path) -> bool;

    /// Delete the file at `path`.
    async fn delete(&self, path: &Path) -> Result<()>;
}

/// Scroll anchor for the plugin's main view.
pub trait ViewAnchor: Send + Sync + Debug {
    /// Bring the bound element into view.
    fn scroll_into_view(&self);
}
