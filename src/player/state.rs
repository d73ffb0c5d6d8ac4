use crate::models::Track;

/// Coarse player status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    /// No current track
    #[default]
    Idle,
    Paused,
    Playing,
}

/// Snapshot of what the player is doing. Only `PlaybackSequencer` mutates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    pub(super) current_track: Option<Track>,
    pub(super) playlist: Vec<Track>,
    pub(super) current_index: usize,
    pub(super) status: PlayerStatus,
}

impl PlaybackState {
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    /// Position in the playlist; meaningless while the playlist is empty
    pub fn current_index(&self) -> Option<usize> {
        if self.playlist.is_empty() {
            None
        } else {
            Some(self.current_index)
        }
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlayerStatus::Playing
    }

    pub fn has_next(&self) -> bool {
        !self.playlist.is_empty() && self.current_index + 1 < self.playlist.len()
    }

    pub fn has_previous(&self) -> bool {
        !self.playlist.is_empty() && self.current_index > 0
    }
}
