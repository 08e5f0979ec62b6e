use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry of a podcast feed.
///
/// Episodes carry no dedicated id; the (`title`, `podcast_name`) pair is the
/// de-facto identity everywhere in the store, and several containers key on
/// the title alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub title: String,

    /// Name of the podcast this episode belongs to.
    pub podcast_name: String,

    /// URL of the audio enclosure.
    pub stream_url: String,

    /// Web page of the episode, if the feed names one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Full show notes (HTML), when the feed carries them separately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artwork_url: Option<String>,

    /// Publish date of the episode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub itunes_title: Option<String>,
}

impl Episode {
    /// Episode with the identity fields and enclosure set, everything else
    /// left for the feed layer to fill in.
    pub fn new(
        title: impl Into<String>,
        podcast_name: impl Into<String>,
        stream_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            podcast_name: podcast_name.into(),
            stream_url: stream_url.into(),
            url: None,
            description: None,
            content: None,
            artwork_url: None,
            episode_date: None,
            feed_url: None,
            itunes_title: None,
        }
    }
}

/// Playback record of one episode in the played-episodes ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayedEpisode {
    pub title: String,

    pub podcast_name: String,

    /// Last known playback position, in seconds.
    pub time: f64,

    /// Episode length as last reported by the player, in seconds.
    pub duration: f64,

    pub finished: bool,
}

/// An episode that exists as a file in the host vault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadedEpisode {
    #[serde(flatten)]
    pub episode: Episode,

    /// Vault-relative path of the audio file.
    pub file_path: PathBuf,

    /// File size in bytes.
    pub size: u64,
}

/// A subscribed podcast feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastFeed {
    pub title: String,

    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artwork_url: Option<String>,

    /// iTunes collection id, when the feed was added through search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<i64>,
}

impl PodcastFeed {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            artwork_url: None,
            collection_id: None,
        }
    }
}

/// A named, ordered list of episodes with playback-behavior flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Host icon id shown next to the playlist name.
    pub icon: String,

    pub name: String,

    pub episodes: Vec<Episode>,

    /// Drop an episode from the list once it has been played.
    pub should_episode_remove_after_play: bool,

    pub should_repeat: bool,
}

impl Playlist {
    /// Empty playlist with both behavior flags off.
    pub fn new(icon: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            name: name.into(),
            episodes: Vec::new(),
            should_episode_remove_after_play: false,
            should_repeat: false,
        }
    }

    /// The playback queue; episodes leave it once played.
    pub fn queue() -> Self {
        Self {
            should_episode_remove_after_play: true,
            ..Self::new("list-ordered", "Queue")
        }
    }

    pub fn favorites() -> Self {
        Self::new("lucide-star", "Favorites")
    }

    pub fn local_files() -> Self {
        Self::new("folder", "Local Files")
    }
}

/// Panel the plugin's main view is presenting.
///
/// The host persists this as a plain integer, hence the `u8` bridging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ViewState {
    #[default]
    PodcastGrid,
    EpisodeList,
    Player,
}

impl From<ViewState> for u8 {
    fn from(state: ViewState) -> Self {
        match state {
            ViewState::PodcastGrid => 0,
            ViewState::EpisodeList => 1,
            ViewState::Player => 2,
        }
    }
}

impl TryFrom<u8> for ViewState {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(ViewState::PodcastGrid),
            1 => Ok(ViewState::EpisodeList),
            2 => Ok(ViewState::Player),
            other => Err(format!("unknown view state: {other}")),
        }
    }
}
