use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::host::{Vault, ViewAnchor};
use crate::models::models::{Episode, Playlist, PodcastFeed, ViewState};
use crate::store::downloads::DownloadedEpisodes;
use crate::store::history::PlayedEpisodes;
use crate::store::playlist::PlaylistCell;

/// The plugin's observable state graph.
///
/// Scalar playback cells are bare watch senders; compound containers wrap
/// theirs with domain operations. Every mutation notifies subscribers.
/// Shared across the plugin behind an [`Arc`].
#[derive(Debug)]
pub struct PlayerStore {
    /// Playback position of the current episode, in seconds.
    pub current_time: watch::Sender<f64>,

    /// Length of the current episode as reported by the player, in seconds.
    pub duration: watch::Sender<f64>,

    pub is_paused: watch::Sender<bool>,

    pub current_episode: CurrentEpisode,

    pub played_episodes: PlayedEpisodes,

    /// Subscribed feeds, keyed by podcast name.
    pub saved_feeds: watch::Sender<HashMap<String, PodcastFeed>>,

    /// Fetched episode lists, keyed by podcast name.
    pub episode_cache: watch::Sender<HashMap<String, Vec<Episode>>>,

    pub downloaded_episodes: DownloadedEpisodes,

    pub queue: PlaylistCell,

    pub favorites: PlaylistCell,

    pub local_files: PlaylistCell,

    /// User-defined playlists, keyed by playlist name.
    pub playlists: watch::Sender<HashMap<String, Playlist>>,

    pub view_state: ViewStateCell,
}

impl PlayerStore {
    pub fn new() -> Self {
        Self {
            current_time: watch::channel(0.0).0,
            duration: watch::channel(0.0).0,
            is_paused: watch::channel(true).0,
            current_episode: CurrentEpisode::new(),
            played_episodes: PlayedEpisodes::new(),
            saved_feeds: watch::channel(HashMap::new()).0,
            episode_cache: watch::channel(HashMap::new()).0,
            downloaded_episodes: DownloadedEpisodes::new(),
            queue: PlaylistCell::new(Playlist::queue()),
            favorites: PlaylistCell::new(Playlist::favorites()),
            local_files: PlaylistCell::new(Playlist::local_files()),
            playlists: watch::channel(HashMap::new()).0,
            view_state: ViewStateCell::new(),
        }
    }

    /// Make `episode` the current episode.
    ///
    /// The episode playing until now is archived first: its position,
    /// duration and finished flag (position exactly equal to duration) go
    /// into the played-episodes ledger, and it is prepended to the queue
    /// unless `add_prev_to_queue` is off. Playback cells are left alone;
    /// the player resets them when it loads the new audio.
    pub fn set_current_episode(&self, episode: Episode, add_prev_to_queue: bool) {
        if let Some(previous) = self.current_episode.get() {
            if add_prev_to_queue {
                self.queue.prepend(previous.clone());
            }

            let time = *self.current_time.borrow();
            let duration = *self.duration.borrow();
            let finished = time == duration;
            self.played_episodes
                .set_episode_time(&previous, time, duration, finished);
        }

        info!("now playing \"{}\" ({})", episode.title, episode.podcast_name);
        self.current_episode.cell.send_replace(Some(episode));
    }

    /// Pop the queue head and make it the current episode.
    ///
    /// The outgoing episode is archived but not re-enqueued, so playing
    /// through the queue consumes it front to back.
    pub fn play_next(&self) -> Option<Episode> {
        let next = self.queue.pop_front()?;
        debug!("queue advanced to \"{}\"", next.title);
        self.set_current_episode(next.clone(), false);
        Some(next)
    }

    /// Install the host vault backing downloaded-file deletion.
    pub fn attach_vault(&self, vault: Arc<dyn Vault>) {
        self.downloaded_episodes.attach_vault(vault);
    }

    /// Bind the host element that scrolls into view on panel changes.
    pub fn bind_view(&self, anchor: Arc<dyn ViewAnchor>) {
        self.view_state.bind(anchor);
    }
}

impl Default for PlayerStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The episode loaded in the player, if any.
#[derive(Debug)]
pub struct CurrentEpisode {
    cell: watch::Sender<Option<Episode>>,
}

impl CurrentEpisode {
    fn new() -> Self {
        Self {
            cell: watch::channel(None).0,
        }
    }

    /// Snapshot of the current episode.
    pub fn get(&self) -> Option<Episode> {
        self.cell.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Episode>> {
        self.cell.subscribe()
    }

    /// Adjust the current episode in place, e.g. after a metadata refresh.
    ///
    /// Use [`PlayerStore::set_current_episode`] to switch episodes; this
    /// skips the archiving step entirely.
    pub fn update(&self, f: impl FnOnce(&mut Option<Episode>)) {
        self.cell.send_modify(f);
    }
}

/// Which panel the plugin view is presenting.
#[derive(Debug)]
pub struct ViewStateCell {
    cell: watch::Sender<ViewState>,
    anchor: RwLock<Option<Arc<dyn ViewAnchor>>>,
}

impl ViewStateCell {
    fn new() -> Self {
        Self {
            cell: watch::channel(ViewState::default()).0,
            anchor: RwLock::new(None),
        }
    }

    /// Bind the host element to scroll on panel changes.
    pub fn bind(&self, anchor: Arc<dyn ViewAnchor>) {
        *self.anchor.write() = Some(anchor);
    }

    pub fn get(&self) -> ViewState {
        *self.cell.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.cell.subscribe()
    }

    /// Switch panels and scroll the bound element into view.
    pub fn set(&self, state: ViewState) {
        self.cell.send_replace(state);
        let anchor = self.anchor.read().clone();
        if let Some(anchor) = anchor {
            anchor.scroll_into_view();
        }
    }
}
