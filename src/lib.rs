//! Shared playback state for the castnotes podcast plugin.
//!
//! Everything the plugin's views and commands observe lives here: the
//! current episode and its scalar playback cells, the played-episodes
//! ledger, saved feeds and the fetched-episode cache, the downloaded-file
//! registry, the queue/favorites/local-files playlists, and the active view
//! panel. Cells are `tokio::sync::watch` channels, so any part of the
//! plugin can subscribe and react to changes.
//!
//! The host application stays behind two narrow traits ([`host::Vault`] and
//! [`host::ViewAnchor`]); persistence is one JSON blob
//! ([`persist::PluginData`]) the host stores and hands back at load.

pub mod bridge;
pub mod error;
pub mod host;
pub mod models;
pub mod persist;
pub mod store;
pub mod utils;

pub use crate::error::StoreError;
pub use crate::models::models::{
    DownloadedEpisode, Episode, PlayedEpisode, Playlist, PodcastFeed, ViewState,
};
pub use crate::persist::PluginData;
pub use crate::store::state::PlayerStore;
