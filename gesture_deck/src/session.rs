//! Session state and the frame loop.
//!
//! `Session` owns the playlist, the playback engine, the volume sink and
//! the gesture arbiter, and exposes a single `step(frame, now)`
//! transition: arbitrate the frame's hands, dispatch whatever fired,
//! update the transient message and volume readout.  All side effects go
//! through the two collaborator traits, so the whole session runs under
//! test with fakes and an injected clock.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use hand_pose::classify::ClassifierConfig;

use crate::arbiter::{Command, FrameDecision, GestureArbiter};
use crate::player::{open_output, PlaybackEngine, RodioPlayer};
use crate::playlist::Playlist;
use crate::tracker::{Frame, HandSource, SimHandSource};
use crate::visualizer::Visualizer;
use crate::volume::{remap, SoftVolume, VolumeSink};

// ════════════════════════════════════════════════════════════════════════════
// SessionConfig — every tunable in one place
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    pub classifier: ClassifierConfig,
    /// Cooldown for each wave class (left and right tracked separately).
    pub wave_cooldown: Duration,
    /// Cooldown for the play/pause class, independent of the waves.
    pub toggle_cooldown: Duration,
    /// Thumb–index pixel span mapped onto the device volume range.
    pub pinch_range_px: (f32, f32),
    /// How long a transport message stays on screen.
    pub message_duration: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            classifier: ClassifierConfig::default(),
            wave_cooldown: Duration::from_secs(1),
            toggle_cooldown: Duration::from_secs(1),
            pinch_range_px: (30.0, 250.0),
            message_duration: Duration::from_secs(1),
        }
    }
}

/// What one `step` call did, for tests and the render loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    pub fired: Option<Command>,
    pub pinch_px: Option<f32>,
}

// ════════════════════════════════════════════════════════════════════════════
// Session
// ════════════════════════════════════════════════════════════════════════════

pub struct Session<P: PlaybackEngine, V: VolumeSink> {
    playlist: Playlist,
    player: P,
    sink: V,
    arbiter: GestureArbiter,
    cfg: SessionConfig,
    message: Option<(String, Instant)>,
    volume_percent: u8,
}

impl<P: PlaybackEngine, V: VolumeSink> Session<P, V> {
    /// Load the first track and seed the volume readout from the device.
    /// Startup failures (unloadable first track) abort here, before the
    /// frame loop ever runs.
    pub fn new(playlist: Playlist, mut player: P, sink: V, cfg: SessionConfig) -> Result<Self, String> {
        player.load(playlist.current())?;
        let percent = remap(sink.level(), sink.range(), (0.0, 100.0)).round() as u8;
        Ok(Session {
            playlist,
            player,
            sink,
            arbiter: GestureArbiter::new(cfg.classifier, cfg.wave_cooldown, cfg.toggle_cooldown),
            cfg,
            message: None,
            volume_percent: percent,
        })
    }

    // ── one frame ─────────────────────────────────────────────────────────

    /// Arbitrate and dispatch one frame's detections.
    pub fn step(&mut self, frame: &Frame, now: Instant) -> StepReport {
        let decision: FrameDecision = self.arbiter.decide(
            &frame.hands,
            frame.width as f32,
            frame.height as f32,
            now,
        );

        if let Some(command) = decision.command {
            self.dispatch(command, now);
        }
        if let Some(px) = decision.pinch_px {
            self.adjust_volume(px);
        }

        StepReport {
            fired: decision.command,
            pinch_px: decision.pinch_px,
        }
    }

    // ── discrete commands ─────────────────────────────────────────────────

    pub fn dispatch(&mut self, command: Command, now: Instant) {
        match command {
            Command::NextTrack => {
                self.change_track(1, "Next Song", now);
            }
            Command::PreviousTrack => {
                self.change_track(-1, "Previous Song", now);
            }
            Command::PlayPauseToggle => {
                if self.player.is_busy() {
                    self.player.pause();
                    self.set_message("Paused", now);
                } else {
                    self.player.resume();
                    self.set_message("Playing", now);
                }
            }
        }
    }

    fn change_track(&mut self, step: isize, message: &str, now: Instant) {
        let track = self.playlist.advance(step).to_path_buf();
        match self.player.load(&track) {
            Ok(()) => {
                self.player.play();
                self.set_message(message, now);
            }
            Err(e) => {
                // Keep the session alive; the user just sees no feedback.
                eprintln!("[session] skipping unplayable track: {}", e);
            }
        }
    }

    // ── continuous volume ─────────────────────────────────────────────────

    pub fn adjust_volume(&mut self, pinch_px: f32) {
        let level = remap(pinch_px, self.cfg.pinch_range_px, self.sink.range());
        self.sink.set_level(level);
        self.volume_percent =
            remap(pinch_px, self.cfg.pinch_range_px, (0.0, 100.0)).round() as u8;
    }

    // ── UI state ──────────────────────────────────────────────────────────

    fn set_message(&mut self, text: &str, now: Instant) {
        self.message = Some((text.to_string(), now));
    }

    /// The transient transport message, if it has not expired.
    pub fn message(&self, now: Instant) -> Option<&str> {
        self.message
            .as_ref()
            .filter(|(_, fired)| now.duration_since(*fired) < self.cfg.message_duration)
            .map(|(text, _)| text.as_str())
    }

    pub fn volume_percent(&self) -> u8 {
        self.volume_percent
    }

    pub fn track_index(&self) -> usize {
        self.playlist.index()
    }

    /// Display name of the current track.
    pub fn track_name(&self) -> String {
        self.playlist
            .current()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn is_busy(&self) -> bool {
        self.player.is_busy()
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn sink(&self) -> &V {
        &self.sink
    }

    /// Stop playback on the way out.
    pub fn shutdown(&mut self) {
        self.player.stop();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main frame loop
// ════════════════════════════════════════════════════════════════════════════

pub struct RunOptions {
    pub songs_dir: PathBuf,
    /// Helper command for the live tracker (feature `tracker`).
    pub tracker_cmd: Option<String>,
}

fn make_source(opts: &RunOptions) -> Result<Box<dyn HandSource>, String> {
    #[cfg(feature = "tracker")]
    if let Some(cmd) = &opts.tracker_cmd {
        let source = crate::tracker::MediaPipeSource::spawn(cmd)?;
        return Ok(Box::new(source));
    }
    #[cfg(not(feature = "tracker"))]
    if opts.tracker_cmd.is_some() {
        eprintln!("[tracker] built without the `tracker` feature — using keyboard simulation");
    }
    Ok(Box::new(SimHandSource::new()))
}

/// Run the controller until the quit key, window close, or frame-source
/// exhaustion.  One loop iteration = acquire, classify, arbitrate,
/// dispatch, render — single-threaded, no buffering across frames.
///
/// The audio stream, window and frame source are all scoped to this
/// function, so every exit path (quit, closed window, `None` frame)
/// releases them.
pub fn run(opts: RunOptions, cfg: SessionConfig) -> Result<(), String> {
    let playlist = Playlist::scan(&opts.songs_dir)?;
    let (_stream, sink) = open_output()?;

    let engine = RodioPlayer::new(sink.clone());
    let volume = SoftVolume::new(sink);
    let mut session = Session::new(playlist, engine, volume, cfg)?;

    let mut vis = Visualizer::new()?;
    let mut source = make_source(&opts)?;

    while vis.is_open() {
        let input = vis.poll_input();
        if input.quit {
            break;
        }
        let frame = match source.next_frame(&input) {
            Some(frame) => frame,
            None => break,
        };

        let now = Instant::now();
        session.step(&frame, now);
        vis.render(&frame, &session, now);
    }

    session.shutdown();
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::NullPlayer;
    use crate::volume::FakeSink;
    use hand_pose::{synthetic, DetectedHand, Handedness};

    fn session(tracks: &[&str]) -> Session<NullPlayer, FakeSink> {
        let playlist =
            Playlist::from_tracks(tracks.iter().map(PathBuf::from).collect()).unwrap();
        Session::new(
            playlist,
            NullPlayer::default(),
            FakeSink::new(-65.25, 0.0, -65.25),
            SessionConfig::default(),
        )
        .unwrap()
    }

    fn wave_left_frame() -> Frame {
        Frame {
            width: 640,
            height: 480,
            hands: vec![DetectedHand::new(synthetic::wave_left(), Handedness::Right)],
        }
    }

    #[test]
    fn startup_loads_first_track_without_playing() {
        let s = session(&["a.mp3", "b.mp3"]);
        assert_eq!(s.player().loaded, [PathBuf::from("a.mp3")]);
        assert!(!s.is_busy());
    }

    #[test]
    fn startup_seeds_percent_from_device_level() {
        let s = session(&["a.mp3"]);
        assert_eq!(s.volume_percent(), 0);
    }

    #[test]
    fn next_track_wraps_and_plays() {
        let mut s = session(&["a.mp3", "b.mp3", "c.mp3"]);
        let now = Instant::now();
        s.dispatch(Command::NextTrack, now);
        assert_eq!(s.track_index(), 1);
        assert!(s.is_busy());

        s.dispatch(Command::NextTrack, now);
        s.dispatch(Command::NextTrack, now);
        assert_eq!(s.track_index(), 0);
    }

    #[test]
    fn previous_from_zero_wraps_to_last() {
        let mut s = session(&["a.mp3", "b.mp3", "c.mp3"]);
        s.dispatch(Command::PreviousTrack, Instant::now());
        assert_eq!(s.track_index(), 2);
        assert_eq!(s.message(Instant::now()), Some("Previous Song"));
    }

    #[test]
    fn toggle_alternates_with_busy_state() {
        let mut s = session(&["a.mp3"]);
        let now = Instant::now();

        s.dispatch(Command::PlayPauseToggle, now);
        assert!(s.is_busy());
        assert_eq!(s.message(now), Some("Playing"));

        s.dispatch(Command::PlayPauseToggle, now);
        assert!(!s.is_busy());
        assert_eq!(s.message(now), Some("Paused"));
    }

    #[test]
    fn message_expires_after_duration() {
        let mut s = session(&["a.mp3"]);
        let t0 = Instant::now();
        s.dispatch(Command::NextTrack, t0);
        assert_eq!(s.message(t0 + Duration::from_millis(500)), Some("Next Song"));
        assert_eq!(s.message(t0 + Duration::from_millis(1100)), None);
    }

    #[test]
    fn pinch_endpoints_hit_device_range() {
        let mut s = session(&["a.mp3"]);
        s.adjust_volume(30.0);
        assert_eq!(s.sink().current, -65.25);
        assert_eq!(s.volume_percent(), 0);

        s.adjust_volume(250.0);
        assert_eq!(s.sink().current, 0.0);
        assert_eq!(s.volume_percent(), 100);
    }

    #[test]
    fn pinch_outside_range_clamps_to_endpoints() {
        let mut s = session(&["a.mp3"]);
        s.adjust_volume(10.0);
        let low = s.sink().current;
        s.adjust_volume(30.0);
        assert_eq!(s.sink().current, low);

        s.adjust_volume(500.0);
        let high = s.sink().current;
        s.adjust_volume(250.0);
        assert_eq!(s.sink().current, high);
    }

    #[test]
    fn wave_sequence_end_to_end() {
        let mut s = session(&["a.mp3", "b.mp3", "c.mp3"]);
        let t0 = Instant::now();
        let frame = wave_left_frame();

        // t = 0: fires.
        let r = s.step(&frame, t0);
        assert_eq!(r.fired, Some(Command::NextTrack));
        assert_eq!(s.track_index(), 1);
        assert_eq!(s.message(t0), Some("Next Song"));

        // t = 0.5 s: inside the cooldown, dropped.
        let r = s.step(&frame, t0 + Duration::from_millis(500));
        assert_eq!(r.fired, None);
        assert_eq!(s.track_index(), 1);

        // t = 1.2 s: armed again.
        let r = s.step(&frame, t0 + Duration::from_millis(1200));
        assert_eq!(r.fired, Some(Command::NextTrack));
        assert_eq!(s.track_index(), 2);
        assert_eq!(
            s.message(t0 + Duration::from_millis(1200)),
            Some("Next Song")
        );
    }

    #[test]
    fn volume_and_wave_fire_in_the_same_frame() {
        let mut s = session(&["a.mp3", "b.mp3"]);
        let frame = Frame {
            width: 640,
            height: 480,
            hands: vec![
                DetectedHand::new(synthetic::wave_left(), Handedness::Right),
                DetectedHand::new(synthetic::volume_pose(0.3), Handedness::Left),
            ],
        };
        let r = s.step(&frame, Instant::now());
        assert_eq!(r.fired, Some(Command::NextTrack));
        assert!(r.pinch_px.is_some());
        assert!(s.sink().set_calls > 0);
    }

    #[test]
    fn empty_hands_change_nothing() {
        let mut s = session(&["a.mp3"]);
        let before = s.track_index();
        let frame = Frame {
            width: 640,
            height: 480,
            hands: Vec::new(),
        };
        let r = s.step(&frame, Instant::now());
        assert_eq!(r, StepReport::default());
        assert_eq!(s.track_index(), before);
    }

    #[test]
    fn shutdown_stops_the_engine() {
        let mut s = session(&["a.mp3"]);
        s.dispatch(Command::PlayPauseToggle, Instant::now());
        s.shutdown();
        assert!(!s.is_busy());
        assert!(s.player().calls.contains(&"stop"));
    }
}
