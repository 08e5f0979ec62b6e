use std::collections::HashMap;

use tokio::sync::watch;
use tracing::debug;

use crate::models::models::{Episode, PlayedEpisode};

/// Ledger of playback progress, keyed by episode title.
///
/// Keying is by title alone, so two podcasts sharing an episode title share
/// one record; the last writer wins.
#[derive(Debug)]
pub struct PlayedEpisodes {
    cell: watch::Sender<HashMap<String, PlayedEpisode>>,
}

impl PlayedEpisodes {
    pub fn new() -> Self {
        Self {
            cell: watch::channel(HashMap::new()).0,
        }
    }

    /// Record `episode`'s playback position, inserting or overwriting its
    /// ledger entry.
    pub fn set_episode_time(&self, episode: &Episode, time: f64, duration: f64, finished: bool) {
        debug!(
            "ledger: \"{}\" at {:.0}/{:.0}s (finished: {finished})",
            episode.title, time, duration
        );
        self.cell.send_modify(|played| {
            played.insert(
                episode.title.clone(),
                PlayedEpisode {
                    title: episode.title.clone(),
                    podcast_name: episode.podcast_name.clone(),
                    time,
                    duration,
                    finished,
                },
            );
        });
    }

    /// Jump the record to its full duration and flag it finished.
    ///
    /// Episodes without a ledger entry are left alone; there is no duration
    /// to jump to yet.
    pub fn mark_as_played(&self, episode: &Episode) {
        self.cell.send_modify(|played| {
            if let Some(entry) = played.get_mut(&episode.title) {
                entry.time = entry.duration;
                entry.finished = true;
            }
        });
    }

    /// Rewind the record to the beginning and clear the finished flag.
    ///
    /// Episodes without a ledger entry are left alone.
    pub fn mark_as_unplayed(&self, episode: &Episode) {
        self.cell.send_modify(|played| {
            if let Some(entry) = played.get_mut(&episode.title) {
                entry.time = 0.0;
                entry.finished = false;
            }
        });
    }

    /// Ledger entry for `episode`, if one exists.
    pub fn get(&self, episode: &Episode) -> Option<PlayedEpisode> {
        self.cell.borrow().get(&episode.title).cloned()
    }

    /// Clone of the whole ledger.
    pub fn entries(&self) -> HashMap<String, PlayedEpisode> {
        self.cell.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HashMap<String, PlayedEpisode>> {
        self.cell.subscribe()
    }

    /// Run `f` against the ledger and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut HashMap<String, PlayedEpisode>)) {
        self.cell.send_modify(f);
    }

    /// Replace the ledger wholesale.
    pub fn replace(&self, entries: HashMap<String, PlayedEpisode>) {
        self.cell.send_replace(entries);
    }
}

impl Default for PlayedEpisodes {
    fn default() -> Self {
        Self::new()
    }
}
