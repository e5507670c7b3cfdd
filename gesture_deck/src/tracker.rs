//! Frame sources — where hands come from.
//!
//! The session pulls one [`Frame`] per loop iteration through
//! [`HandSource`]; `None` means the source is exhausted and the session
//! ends (no retries — the intended source is an always-on webcam, not a
//! flaky stream).
//!
//! Two sources exist:
//!
//! * [`SimHandSource`] (default) — synthesizes canonical landmark sets
//!   from keyboard state, so every gesture path is drivable without a
//!   camera.
//! * `MediaPipeSource` (feature `tracker`) — reads JSON-lines landmark
//!   frames from a helper process that owns the webcam and the MediaPipe
//!   hand landmarker.  Frame mirroring is the helper's responsibility.

use hand_pose::{synthetic, DetectedHand, Handedness};

/// One acquired frame: dimensions plus zero or more detected hands.
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub hands: Vec<DetectedHand>,
}

/// Keyboard state polled from the window each frame.  Hardware sources
/// ignore everything except the loop's own quit handling.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputSnapshot {
    pub quit: bool,
    pub pose: Option<SimPose>,
    /// −1 / 0 / +1: narrow or widen the simulated pinch.
    pub pinch_step: i32,
}

/// Pose the simulated hand should strike this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPose {
    WaveLeft,
    WaveRight,
    PlayPause,
    Volume,
}

pub trait HandSource {
    /// Produce the next frame, or `None` when the source is exhausted.
    fn next_frame(&mut self, input: &InputSnapshot) -> Option<Frame>;
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandSource — keyboard-driven synthetic hands (always available)
// ════════════════════════════════════════════════════════════════════════════

const SIM_WIDTH: u32 = 640;
const SIM_HEIGHT: u32 = 480;
const SPAN_MIN_PX: f32 = 20.0;
const SPAN_MAX_PX: f32 = 280.0;
const SPAN_STEP_PX: f32 = 8.0;

/// Synthesizes one hand per frame from the polled keyboard state.
///
/// The pinch span persists across frames so holding `Up`/`Down` sweeps
/// the volume smoothly, just like moving real fingers apart.
pub struct SimHandSource {
    span_px: f32,
}

impl SimHandSource {
    pub fn new() -> Self {
        SimHandSource { span_px: 140.0 }
    }

    /// Current simulated thumb–index span in pixels.
    pub fn span_px(&self) -> f32 {
        self.span_px
    }
}

impl Default for SimHandSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HandSource for SimHandSource {
    fn next_frame(&mut self, input: &InputSnapshot) -> Option<Frame> {
        let mut hands = Vec::new();

        if let Some(pose) = input.pose {
            let set = match pose {
                SimPose::WaveLeft => synthetic::wave_left(),
                SimPose::WaveRight => synthetic::wave_right(),
                SimPose::PlayPause => synthetic::play_pause(),
                SimPose::Volume => {
                    self.span_px = (self.span_px + input.pinch_step as f32 * SPAN_STEP_PX)
                        .clamp(SPAN_MIN_PX, SPAN_MAX_PX);
                    // Tips are vertically separated in the template, so the
                    // normalized gap maps through the frame height.
                    synthetic::volume_pose(self.span_px / SIM_HEIGHT as f32)
                }
            };
            hands.push(DetectedHand::new(set, Handedness::Right));
        }

        Some(Frame {
            width: SIM_WIDTH,
            height: SIM_HEIGHT,
            hands,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MediaPipeSource — helper-process landmark feed (feature = "tracker")
// ════════════════════════════════════════════════════════════════════════════

/// Reads landmark frames from a helper process, one JSON object per line:
///
/// ```json
/// {"width":640,"height":480,
///  "hands":[{"handedness":"Right","landmarks":[[0.51,0.83], …21 pairs]}]}
/// ```
///
/// The helper owns the webcam, runs the MediaPipe hand landmarker, and
/// applies the selfie flip before printing.  EOF or a malformed line ends
/// the session.
#[cfg(feature = "tracker")]
pub struct MediaPipeSource {
    child: std::process::Child,
    lines: std::io::Lines<std::io::BufReader<std::process::ChildStdout>>,
}

#[cfg(feature = "tracker")]
impl MediaPipeSource {
    /// Spawn `command` (whitespace-split program + args) and attach to
    /// its stdout.
    pub fn spawn(command: &str) -> Result<Self, String> {
        use std::io::BufRead;
        use std::process::{Command, Stdio};

        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| "empty tracker command".to_string())?;

        let mut child = Command::new(program)
            .args(parts)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| format!("cannot spawn tracker {:?}: {}", program, e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| "tracker stdout not captured".to_string())?;

        Ok(MediaPipeSource {
            child,
            lines: std::io::BufReader::new(stdout).lines(),
        })
    }
}

#[cfg(feature = "tracker")]
impl Drop for MediaPipeSource {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(feature = "tracker")]
mod wire {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct WireFrame {
        pub width: u32,
        pub height: u32,
        pub hands: Vec<WireHand>,
    }

    #[derive(Deserialize)]
    pub struct WireHand {
        pub handedness: String,
        pub landmarks: Vec<[f32; 2]>,
    }
}

#[cfg(feature = "tracker")]
impl HandSource for MediaPipeSource {
    fn next_frame(&mut self, _input: &InputSnapshot) -> Option<Frame> {
        use hand_pose::{Landmark, LandmarkSet};

        let line = match self.lines.next()? {
            Ok(l) => l,
            Err(e) => {
                eprintln!("[tracker] read error: {}", e);
                return None;
            }
        };

        let wire: wire::WireFrame = match serde_json::from_str(&line) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("[tracker] malformed frame: {}", e);
                return None;
            }
        };

        let hands = wire
            .hands
            .into_iter()
            .filter_map(|h| {
                let points: Vec<Landmark> = h
                    .landmarks
                    .iter()
                    .map(|&[x, y]| Landmark::new(x, y))
                    .collect();
                let landmarks = LandmarkSet::from_slice(&points)?;
                let handedness = if h.handedness.eq_ignore_ascii_case("left") {
                    Handedness::Left
                } else {
                    Handedness::Right
                };
                Some(DetectedHand::new(landmarks, handedness))
            })
            .collect();

        Some(Frame {
            width: wire.width,
            height: wire.height,
            hands,
        })
    }
}
