//! The session's track list.
//!
//! Enumerated once at startup from a directory, filtered by audio
//! extension, sorted lexicographically, then immutable for the session.
//! Only the cursor moves, with wraparound in both directions.

use std::path::{Path, PathBuf};

/// Extensions the playback engine can decode.
const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "ogg", "wav", "flac"];

pub struct Playlist {
    tracks: Vec<PathBuf>,
    index: usize,
}

impl Playlist {
    /// Scan `dir` for audio files.  An empty result is a fatal startup
    /// condition, reported as an error here.
    pub fn scan(dir: &Path) -> Result<Self, String> {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| format!("cannot read track directory {}: {}", dir.display(), e))?;

        let mut tracks: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| {
                        let ext = ext.to_ascii_lowercase();
                        AUDIO_EXTENSIONS.iter().any(|&a| a == ext)
                    })
                    .unwrap_or(false)
            })
            .collect();
        tracks.sort();

        Self::from_tracks(tracks)
    }

    /// Build directly from a track list (startup validation included).
    pub fn from_tracks(tracks: Vec<PathBuf>) -> Result<Self, String> {
        if tracks.is_empty() {
            return Err("no audio tracks found — nothing to play".to_string());
        }
        Ok(Playlist { tracks, index: 0 })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &Path {
        &self.tracks[self.index]
    }

    /// Move the cursor by `step` positions with wraparound, returning the
    /// track now under the cursor.
    pub fn advance(&mut self, step: isize) -> &Path {
        let len = self.tracks.len() as isize;
        self.index = (self.index as isize + step).rem_euclid(len) as usize;
        self.current()
    }
}
