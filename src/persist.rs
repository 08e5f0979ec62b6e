//! The JSON blob the host persists for the plugin.
//!
//! Every section is optional on the way in so blobs written by older plugin
//! versions still hydrate; missing playlists fall back to their built-in
//! shapes. Scalar playback cells (position, duration, paused) and the view
//! panel are session state and are not persisted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StoreError;
use crate::models::models::{DownloadedEpisode, Episode, PlayedEpisode, Playlist, PodcastFeed};
use crate::store::state::PlayerStore;

/// Snapshot of everything the host stores for the plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginData {
    pub current_episode: Option<Episode>,
    pub played_episodes: HashMap<String, PlayedEpisode>,
    pub saved_feeds: HashMap<String, PodcastFeed>,
    pub episode_cache: HashMap<String, Vec<Episode>>,
    pub downloaded_episodes: HashMap<String, Vec<DownloadedEpisode>>,
    pub queue: Playlist,
    pub favorites: Playlist,
    pub local_files: Playlist,
    pub playlists: HashMap<String, Playlist>,
}

impl Default for PluginData {
    fn default() -> Self {
        Self {
            current_episode: None,
            played_episodes: HashMap::new(),
            saved_feeds: HashMap::new(),
            episode_cache: HashMap::new(),
            downloaded_episodes: HashMap::new(),
            queue: Playlist::queue(),
            favorites: Playlist::favorites(),
            local_files: Playlist::local_files(),
            playlists: HashMap::new(),
        }
    }
}

impl PluginData {
    /// Parse the blob the host hands back at plugin load.
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serialize for the host to store.
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl PlayerStore {
    /// Load a persisted blob into the store.
    ///
    /// Each container is replaced wholesale and notifies its subscribers
    /// once. The current episode is the exception: it is restored without
    /// the archiving step a regular transition performs, and a blob that
    /// carries no episode leaves whatever is already loaded in the player
    /// alone.
    pub fn hydrate(&self, data: PluginData) {
        info!(
            "hydrating store: {} feeds, {} played episodes, {} playlists",
            data.saved_feeds.len(),
            data.played_episodes.len(),
            data.playlists.len()
        );

        self.played_episodes.replace(data.played_episodes);
        self.saved_feeds.send_replace(data.saved_feeds);
        self.episode_cache.send_replace(data.episode_cache);
        self.downloaded_episodes.replace(data.downloaded_episodes);
        self.queue.replace(data.queue);
        self.favorites.replace(data.favorites);
        self.local_files.replace(data.local_files);
        self.playlists.send_replace(data.playlists);

        if let Some(episode) = data.current_episode {
            self.current_episode.update(|current| *current = Some(episode));
        }
    }

    /// Clone out everything the host should persist.
    pub fn snapshot(&self) -> PluginData {
        PluginData {
            current_episode: self.current_episode.get(),
            played_episodes: self.played_episodes.entries(),
            saved_feeds: self.saved_feeds.borrow().clone(),
            episode_cache: self.episode_cache.borrow().clone(),
            downloaded_episodes: self.downloaded_episodes.all(),
            queue: self.queue.get(),
            favorites: self.favorites.get(),
            local_files: self.local_files.get(),
            playlists: self.playlists.borrow().clone(),
        }
    }
}
