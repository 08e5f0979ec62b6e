use tokio::sync::watch;

use crate::models::models::{Episode, Playlist};

/// Observable holder for one [`Playlist`].
///
/// Every mutation goes through the watch channel, so subscribers are
/// notified on each call whether or not the episode list actually changed.
#[derive(Debug)]
pub struct PlaylistCell {
    cell: watch::Sender<Playlist>,
}

impl PlaylistCell {
    pub fn new(initial: Playlist) -> Self {
        Self {
            cell: watch::channel(initial).0,
        }
    }

    /// Snapshot of the whole playlist.
    pub fn get(&self) -> Playlist {
        self.cell.borrow().clone()
    }

    /// Episodes currently on the list, in order.
    pub fn episodes(&self) -> Vec<Episode> {
        self.cell.borrow().episodes.clone()
    }

    /// Whether any entry shares `episode`'s title.
    pub fn contains(&self, episode: &Episode) -> bool {
        self.cell
            .borrow()
            .episodes
            .iter()
            .any(|e| e.title == episode.title)
    }

    /// Receiver that sees every later mutation.
    pub fn subscribe(&self) -> watch::Receiver<Playlist> {
        self.cell.subscribe()
    }

    /// Append `episode` at the end of the list.
    pub fn add(&self, episode: Episode) {
        self.cell
            .send_modify(|playlist| playlist.episodes.push(episode));
    }

    /// Put `episode` at the front, ahead of everything queued so far.
    pub fn prepend(&self, episode: Episode) {
        self.cell
            .send_modify(|playlist| playlist.episodes.insert(0, episode));
    }

    /// Drop every entry sharing `episode`'s title.
    ///
    /// Matching is by title alone, so a same-titled episode from another
    /// podcast leaves the list too.
    pub fn remove(&self, episode: &Episode) {
        self.cell
            .send_modify(|playlist| playlist.episodes.retain(|e| e.title != episode.title));
    }

    /// Detach and return the head of the list, if any.
    ///
    /// Subscribers are notified even when the list was already empty.
    pub fn pop_front(&self) -> Option<Episode> {
        let mut popped = None;
        self.cell.send_modify(|playlist| {
            if !playlist.episodes.is_empty() {
                popped = Some(playlist.episodes.remove(0));
            }
        });
        popped
    }

    /// Run `f` against the playlist and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut Playlist)) {
        self.cell.send_modify(f);
    }

    /// Replace the playlist wholesale.
    pub fn replace(&self, playlist: Playlist) {
        self.cell.send_replace(playlist);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(title: &str, podcast: &str) -> Episode {
        Episode::new(title, podcast, "https://cdn.example.org/ep.mp3")
    }

    #[test]
    fn add_appends_and_prepend_fronts() {
        let cell = PlaylistCell::new(Playlist::queue());
        cell.add(episode("a", "pod"));
        cell.add(episode("b", "pod"));
        cell.prepend(episode("c", "pod"));

        let titles: Vec<String> = cell.episodes().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, ["c", "a", "b"]);
    }

    #[test]
    fn remove_drops_every_match_by_title() {
        let cell = PlaylistCell::new(Playlist::queue());
        cell.add(episode("shared", "first pod"));
        cell.add(episode("other", "first pod"));
        cell.add(episode("shared", "second pod"));

        cell.remove(&episode("shared", "first pod"));

        let titles: Vec<String> = cell.episodes().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, ["other"]);
    }

    #[test]
    fn pop_front_walks_the_list_in_order() {
        let cell = PlaylistCell::new(Playlist::queue());
        cell.add(episode("one", "pod"));
        cell.add(episode("two", "pod"));

        assert_eq!(cell.pop_front().unwrap().title, "one");
        assert_eq!(cell.pop_front().unwrap().title, "two");
        assert!(cell.pop_front().is_none());
    }

    #[test]
    fn every_mutation_notifies_subscribers() {
        let cell = PlaylistCell::new(Playlist::favorites());
        let mut rx = cell.subscribe();

        cell.add(episode("a", "pod"));
        assert!(rx.has_changed().unwrap());
        rx.mark_unchanged();

        // Removing a title that is not on the list still counts as a write.
        cell.remove(&episode("missing", "pod"));
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn contains_matches_on_title_only() {
        let cell = PlaylistCell::new(Playlist::favorites());
        cell.add(episode("shared", "first pod"));

        assert!(cell.contains(&episode("shared", "second pod")));
        assert!(!cell.contains(&episode("unknown", "first pod")));
    }
}
