//! # gesture_deck
//!
//! A hand-gesture music controller.  A frame source delivers 21-point
//! hand landmarks every frame; pure classifiers turn them into pose
//! verdicts; a debounce state machine arbitrates them into at most one
//! transport command per frame plus an independent continuous volume
//! signal; the session dispatches commands against the playback engine
//! and volume sink.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Wave left (all fingertips left of the wrist) | Next track |
//! | Wave right (all fingertips right of the wrist) | Previous track |
//! | OK sign (thumb+index touching, others up) | Play / Pause toggle |
//! | Pinch pose (index up, thumb in, others down) | Volume ∝ thumb–index span |
//!
//! The volume channel is deliberately parallel to the discrete commands:
//! one hand can pinch-adjust loudness while another waves to skip.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: keyboard keys synthesize landmark
//!   sets, no camera needed.
//! * `tracker` — **Live mode**: reads JSON-lines landmark frames from a
//!   MediaPipe helper process that owns the webcam.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Pose |
//! |---|---|
//! | `Left` | Wave left (next track) |
//! | `Right` | Wave right (previous track) |
//! | `P` | OK sign (play/pause) |
//! | `V` (hold) | Volume pinch pose |
//! | `Up` / `Down` | Widen / narrow the pinch while holding `V` |
//! | `Q` / close window | Quit |

pub mod arbiter;
pub mod player;
pub mod playlist;
pub mod session;
pub mod tracker;
pub mod visualizer;
pub mod volume;
