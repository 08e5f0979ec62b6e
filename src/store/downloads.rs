use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::host::Vault;
use crate::models::models::{DownloadedEpisode, Episode};

/// Registry of episodes that exist as files in the vault, grouped by
/// podcast name.
#[derive(Debug)]
pub struct DownloadedEpisodes {
    cell: watch::Sender<HashMap<String, Vec<DownloadedEpisode>>>,
    vault: RwLock<Option<Arc<dyn Vault>>>,
}

impl DownloadedEpisodes {
    pub fn new() -> Self {
        Self {
            cell: watch::channel(HashMap::new()).0,
            vault: RwLock::new(None),
        }
    }

    /// Install the host vault used for file deletion.
    pub fn attach_vault(&self, vault: Arc<dyn Vault>) {
        *self.vault.write() = Some(vault);
    }

    /// Whether `episode` has a download on record under its own podcast.
    pub fn is_downloaded(&self, episode: &Episode) -> bool {
        self.cell
            .borrow()
            .get(&episode.podcast_name)
            .is_some_and(|eps| eps.iter().any(|e| e.episode.title == episode.title))
    }

    /// Download record for `episode`, if one exists.
    pub fn get(&self, episode: &Episode) -> Option<DownloadedEpisode> {
        self.cell
            .borrow()
            .get(&episode.podcast_name)
            .and_then(|eps| eps.iter().find(|e| e.episode.title == episode.title))
            .cloned()
    }

    /// Record a finished download.
    ///
    /// Duplicates are not screened here; callers gate on
    /// [`is_downloaded`](Self::is_downloaded) first.
    pub fn add(&self, episode: &Episode, file_path: impl Into<PathBuf>, size: u64) {
        let file_path = file_path.into();
        debug!(
            "registered download of \"{}\" at {} ({size} bytes)",
            episode.title,
            file_path.display()
        );
        self.cell.send_modify(|downloads| {
            downloads
                .entry(episode.podcast_name.clone())
                .or_default()
                .push(DownloadedEpisode {
                    episode: episode.clone(),
                    file_path,
                    size,
                });
        });
    }

    /// Detach `episode` from the registry, deleting its file when
    /// `remove_file` is set.
    ///
    /// File deletion is best-effort: a missing vault, a vanished file or a
    /// failed delete is logged and the registry entry stays removed.
    pub async fn remove(
        &self,
        episode: &Episode,
        remove_file: bool,
    ) -> Result<DownloadedEpisode, StoreError> {
        let mut removed = None;
        self.cell.send_modify(|downloads| {
            if let Some(eps) = downloads.get_mut(&episode.podcast_name) {
                if let Some(idx) = eps.iter().position(|e| e.episode.title == episode.title) {
                    removed = Some(eps.remove(idx));
                }
            }
        });

        let Some(removed) = removed else {
            return Err(StoreError::EpisodeNotDownloaded {
                title: episode.title.clone(),
            });
        };

        if remove_file {
            self.delete_file(&removed.file_path).await;
        }

        Ok(removed)
    }

    async fn delete_file(&self, path: &Path) {
        let vault = self.vault.read().clone();
        let Some(vault) = vault else {
            warn!("no vault attached; leaving {} in place", path.display());
            return;
        };

        if !vault.contains(path) {
            debug!("{} is already gone from the vault", path.display());
            return;
        }

        if let Err(e) = vault.delete(path).await {
            warn!("failed to delete {}: {e:#}", path.display());
        }
    }

    /// Clone of the whole registry.
    pub fn all(&self) -> HashMap<String, Vec<DownloadedEpisode>> {
        self.cell.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HashMap<String, Vec<DownloadedEpisode>>> {
        self.cell.subscribe()
    }

    /// Run `f` against the registry and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut HashMap<String, Vec<DownloadedEpisode>>)) {
        self.cell.send_modify(f);
    }

    /// Replace the registry wholesale.
    pub fn replace(&self, downloads: HashMap<String, Vec<DownloadedEpisode>>) {
        self.cell.send_replace(downloads);
    }
}

impl Default for DownloadedEpisodes {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::bail;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;

    #[derive(Debug, Default)]
    struct FakeVault {
        files: Mutex<Vec<PathBuf>>,
        deleted: Mutex<Vec<PathBuf>>,
        fail_delete: bool,
    }

    impl FakeVault {
        fn with_file(path: &str) -> Self {
            Self {
                files: Mutex::new(vec![PathBuf::from(path)]),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl Vault for FakeVault {
        fn contains(&self, path: &Path) -> bool {
            self.files.lock().iter().any(|p| p == path)
        }

        async fn delete(&self, path: &Path) -> anyhow::Result<()> {
            if self.fail_delete {
                bail!("host refused");
            }
            self.files.lock().retain(|p| p != path);
            self.deleted.lock().push(path.to_path_buf());
            Ok(())
        }
    }

    fn episode(title: &str, podcast: &str) -> Episode {
        Episode::new(title, podcast, "https://cdn.example.org/ep.mp3")
    }

    #[test]
    fn add_and_lookup_by_podcast_bucket() {
        let registry = DownloadedEpisodes::new();
        let ep = episode("Pilot", "First Pod");
        registry.add(&ep, "downloads/pilot.mp3", 1024);

        assert!(registry.is_downloaded(&ep));
        let record = registry.get(&ep).unwrap();
        assert_eq!(record.file_path, PathBuf::from("downloads/pilot.mp3"));
        assert_eq!(record.size, 1024);

        // Same title under another podcast lands in another bucket.
        assert!(!registry.is_downloaded(&episode("Pilot", "Second Pod")));
    }

    #[tokio::test]
    async fn remove_deletes_the_file_through_the_vault() {
        let registry = DownloadedEpisodes::new();
        let vault = Arc::new(FakeVault::with_file("downloads/pilot.mp3"));
        registry.attach_vault(vault.clone());

        let ep = episode("Pilot", "Pod");
        registry.add(&ep, "downloads/pilot.mp3", 1024);

        let removed = registry.remove(&ep, true).await.unwrap();
        assert_eq!(removed.episode.title, "Pilot");
        assert!(!registry.is_downloaded(&ep));
        assert_eq!(
            *vault.deleted.lock(),
            vec![PathBuf::from("downloads/pilot.mp3")]
        );
    }

    #[tokio::test]
    async fn remove_can_keep_the_file() {
        let registry = DownloadedEpisodes::new();
        let vault = Arc::new(FakeVault::with_file("downloads/pilot.mp3"));
        registry.attach_vault(vault.clone());

        let ep = episode("Pilot", "Pod");
        registry.add(&ep, "downloads/pilot.mp3", 1024);

        registry.remove(&ep, false).await.unwrap();
        assert!(!registry.is_downloaded(&ep));
        assert!(vault.deleted.lock().is_empty());
    }

    #[tokio::test]
    async fn removing_an_unknown_episode_is_an_error() {
        let registry = DownloadedEpisodes::new();

        let result = registry.remove(&episode("ghost", "Pod"), true).await;
        assert!(matches!(
            result,
            Err(StoreError::EpisodeNotDownloaded { title }) if title == "ghost"
        ));
    }

    #[tokio::test]
    async fn failed_deletion_still_removes_the_entry() {
        let registry = DownloadedEpisodes::new();
        let vault = Arc::new(FakeVault {
            files: Mutex::new(vec![PathBuf::from("downloads/pilot.mp3")]),
            deleted: Mutex::new(Vec::new()),
            fail_delete: true,
        });
        registry.attach_vault(vault);

        let ep = episode("Pilot", "Pod");
        registry.add(&ep, "downloads/pilot.mp3", 1024);

        assert!(registry.remove(&ep, true).await.is_ok());
        assert!(!registry.is_downloaded(&ep));
    }

    #[tokio::test]
    async fn missing_vault_or_file_is_tolerated() {
        let registry = DownloadedEpisodes::new();
        let ep = episode("Pilot", "Pod");
        registry.add(&ep, "downloads/pilot.mp3", 1024);

        // No vault attached at all.
        assert!(registry.remove(&ep, true).await.is_ok());

        // Vault attached but the file is not in it.
        registry.attach_vault(Arc::new(FakeVault::default()));
        registry.add(&ep, "downloads/pilot.mp3", 1024);
        assert!(registry.remove(&ep, true).await.is_ok());
        assert!(!registry.is_downloaded(&ep));
    }

    #[test]
    fn duplicate_records_are_allowed() {
        let registry = DownloadedEpisodes::new();
        let ep = episode("Pilot", "Pod");
        registry.add(&ep, "downloads/pilot.mp3", 1024);
        registry.add(&ep, "downloads/pilot (1).mp3", 2048);

        assert_eq!(registry.all().get("Pod").unwrap().len(), 2);
        // Lookup always finds the first record.
        assert_eq!(registry.get(&ep).unwrap().size, 1024);
    }
}
