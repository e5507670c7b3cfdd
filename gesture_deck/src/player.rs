//! Playback engine abstraction and the rodio backend.
//!
//! The session only ever talks to [`PlaybackEngine`]; tests use
//! [`NullPlayer`], the binary uses [`RodioPlayer`] over a shared
//! `rodio::Sink`.  `is_busy` is the single source of truth the session
//! queries before toggling — the engine never guesses.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rodio::{Decoder, OutputStream, Sink};

pub trait PlaybackEngine {
    /// Replace the queued audio with `path`.  Does not start playback.
    fn load(&mut self, path: &Path) -> Result<(), String>;
    /// Start (or restart) playing whatever is loaded.
    fn play(&mut self);
    /// Pause if playing; no-op otherwise.
    fn pause(&mut self);
    /// Resume if paused; no-op otherwise.
    fn resume(&mut self);
    /// True while audio is actively playing.
    fn is_busy(&self) -> bool;
    /// Stop playback and drop queued audio (session shutdown).
    fn stop(&mut self);
}

// ════════════════════════════════════════════════════════════════════════════
// Audio output — one stream + shared sink for player and volume
// ════════════════════════════════════════════════════════════════════════════

/// Open the default audio device.
///
/// The returned `OutputStream` must stay alive for as long as the sink is
/// used; the caller keeps it in the run scope.  Failure here is fatal at
/// startup.
pub fn open_output() -> Result<(OutputStream, Arc<Sink>), String> {
    let (stream, handle) =
        OutputStream::try_default().map_err(|e| format!("no audio output device: {}", e))?;
    let sink = Sink::try_new(&handle).map_err(|e| format!("cannot open audio sink: {}", e))?;
    sink.pause();
    Ok((stream, Arc::new(sink)))
}

// ════════════════════════════════════════════════════════════════════════════
// RodioPlayer — the real backend
// ════════════════════════════════════════════════════════════════════════════

pub struct RodioPlayer {
    sink: Arc<Sink>,
}

impl RodioPlayer {
    pub fn new(sink: Arc<Sink>) -> Self {
        RodioPlayer { sink }
    }
}

impl PlaybackEngine for RodioPlayer {
    fn load(&mut self, path: &Path) -> Result<(), String> {
        let file =
            File::open(path).map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| format!("cannot decode {}: {}", path.display(), e))?;
        // clear() also pauses, so the new track waits for play().
        self.sink.clear();
        self.sink.append(source);
        Ok(())
    }

    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn resume(&mut self) {
        self.sink.play();
    }

    fn is_busy(&self) -> bool {
        !self.sink.is_paused() && !self.sink.empty()
    }

    fn stop(&mut self) {
        self.sink.stop();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// NullPlayer — recording fake for tests
// ════════════════════════════════════════════════════════════════════════════

/// Playback engine that records every call instead of making sound.
#[derive(Default)]
pub struct NullPlayer {
    pub loaded: Vec<PathBuf>,
    pub busy: bool,
    pub calls: Vec<&'static str>,
}

impl PlaybackEngine for NullPlayer {
    fn load(&mut self, path: &Path) -> Result<(), String> {
        self.loaded.push(path.to_path_buf());
        self.calls.push("load");
        Ok(())
    }

    fn play(&mut self) {
        self.busy = true;
        self.calls.push("play");
    }

    fn pause(&mut self) {
        self.busy = false;
        self.calls.push("pause");
    }

    fn resume(&mut self) {
        self.busy = true;
        self.calls.push("resume");
    }

    fn is_busy(&self) -> bool {
        self.busy
    }

    fn stop(&mut self) {
        self.busy = false;
        self.calls.push("stop");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_player_tracks_busy_state() {
        let mut p = NullPlayer::default();
        assert!(!p.is_busy());
        p.play();
        assert!(p.is_busy());
        p.pause();
        assert!(!p.is_busy());
        p.resume();
        assert!(p.is_busy());
    }

    #[test]
    fn null_player_records_loads() {
        let mut p = NullPlayer::default();
        p.load(Path::new("a.mp3")).unwrap();
        p.load(Path::new("b.mp3")).unwrap();
        assert_eq!(p.loaded, [PathBuf::from("a.mp3"), PathBuf::from("b.mp3")]);
    }
}
