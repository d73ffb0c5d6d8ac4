use super::state::{PlaybackState, PlayerStatus};
use crate::models::Track;

/// Tracks what is playing and what plays next over an ordered playlist.
///
/// Invalid transitions are no-ops, never errors: the view layer may call any
/// operation at any time (double clicks, stale buttons).
#[derive(Debug, Default)]
pub struct PlaybackSequencer {
    state: PlaybackState,
}

impl PlaybackSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.state.has_previous()
    }

    /// Start playing `track`, optionally replacing the playlist.
    ///
    /// Tracks without a preview are rejected and leave the state untouched.
    /// With a new playlist the index points at `track` (or 0 if it is not in
    /// the list). Without one, the index follows `track` if the retained
    /// playlist contains it.
    pub fn play(&mut self, track: Track, playlist: Option<Vec<Track>>) -> bool {
        if !track.is_playable() {
            tracing::debug!(id = %track.id, "Ignoring play request for track without preview");
            return false;
        }

        match playlist {
            Some(playlist) => {
                self.state.current_index = position_of(&playlist, &track.id).unwrap_or(0);
                self.state.playlist = playlist;
            }
            None => {
                if let Some(index) = position_of(&self.state.playlist, &track.id) {
                    self.state.current_index = index;
                }
            }
        }

        tracing::debug!(
            id = %track.id,
            index = self.state.current_index,
            playlist_len = self.state.playlist.len(),
            "Playing"
        );
        self.state.current_track = Some(track);
        self.state.status = PlayerStatus::Playing;
        true
    }

    /// Load `playlist` and start on `track`, or on the first playable entry
    /// when `track` has no preview.
    ///
    /// If nothing in the playlist can play, it is still loaded so entries can
    /// be listed, and the player stays idle.
    pub fn start(&mut self, track: Track, playlist: Vec<Track>) -> bool {
        let first = if track.is_playable() {
            Some(track)
        } else {
            playlist.iter().find(|t| t.is_playable()).cloned()
        };

        match first {
            Some(first) => self.play(first, Some(playlist)),
            None => {
                tracing::debug!(playlist_len = playlist.len(), "No playable track in playlist");
                self.state = PlaybackState {
                    playlist,
                    ..Default::default()
                };
                false
            }
        }
    }

    /// Jump to a playlist position
    pub fn play_at(&mut self, index: usize) -> bool {
        match self.state.playlist.get(index) {
            Some(track) if track.is_playable() => {
                self.load(index);
                true
            }
            _ => false,
        }
    }

    pub fn pause(&mut self) {
        if self.state.status == PlayerStatus::Playing {
            self.state.status = PlayerStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state.current_track.is_some() {
            self.state.status = PlayerStatus::Playing;
        }
    }

    /// Advance to the next playable track. Gated on `has_next`.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }

        let start = self.state.current_index + 1;
        let target = (start..self.state.playlist.len())
            .find(|&index| self.state.playlist[index].is_playable());

        match target {
            Some(index) => {
                self.load(index);
                true
            }
            None => false,
        }
    }

    /// Step back to the previous playable track. Gated on `has_previous`.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }

        let target = (0..self.state.current_index)
            .rev()
            .find(|&index| self.state.playlist[index].is_playable());

        match target {
            Some(index) => {
                self.load(index);
                true
            }
            None => false,
        }
    }

    /// Clear the current track. The playlist is kept, the position starts over.
    pub fn stop(&mut self) {
        self.state.current_track = None;
        self.state.current_index = 0;
        self.state.status = PlayerStatus::Idle;
    }

    /// The audio clip finished: move on if possible, otherwise pause on the
    /// same track so it can be resumed from the start.
    pub fn track_ended(&mut self) {
        if self.state.current_track.is_none() {
            return;
        }
        if !self.next() {
            self.state.status = PlayerStatus::Paused;
        }
    }

    fn load(&mut self, index: usize) {
        let track = self.state.playlist[index].clone();
        tracing::debug!(id = %track.id, index, "Moving to playlist position");
        self.state.current_index = index;
        self.state.current_track = Some(track);
        self.state.status = PlayerStatus::Playing;
    }
}

fn position_of(playlist: &[Track], id: &str) -> Option<usize> {
    playlist.iter().position(|t| t.id == id)
}
