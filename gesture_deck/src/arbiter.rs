//! Gesture arbitration and per-class debounce.
//!
//! Each discrete gesture class is a tiny two-state machine: `Armed`
//! until it fires, then `Cooling` until its cooldown elapses.  A verdict
//! arriving while the class is cooling is dropped, never queued.  The
//! continuous volume channel bypasses arbitration entirely: a pinch pose
//! is measured every frame it appears, independent of any discrete fire
//! in the same frame.
//!
//! `decide` takes an explicit `now` so the whole state machine is
//! deterministic under test — no hidden clock reads.

use std::time::{Duration, Instant};

use hand_pose::classify::{discrete_pose, is_volume_pose, ClassifierConfig, Pose};
use hand_pose::geometry::pixel_distance;
use hand_pose::landmark::{INDEX_TIP, THUMB_TIP};
use hand_pose::DetectedHand;

/// A transport command accepted by the arbiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    NextTrack,
    PreviousTrack,
    PlayPauseToggle,
}

/// Debounced gesture classes, each with its own last-fire timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Class {
    WaveLeft,
    WaveRight,
    Toggle,
}

/// What one frame of hands produced.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameDecision {
    /// At most one discrete command per frame, across all hands.
    pub command: Option<Command>,
    /// Thumb–index span in pixels, present whenever some hand holds the
    /// pinch pose.  Independent of `command`.
    pub pinch_px: Option<f32>,
}

pub struct GestureArbiter {
    classifier: ClassifierConfig,
    wave_cooldown: Duration,
    toggle_cooldown: Duration,
    last_wave_left: Option<Instant>,
    last_wave_right: Option<Instant>,
    last_toggle: Option<Instant>,
}

impl GestureArbiter {
    pub fn new(
        classifier: ClassifierConfig,
        wave_cooldown: Duration,
        toggle_cooldown: Duration,
    ) -> Self {
        GestureArbiter {
            classifier,
            wave_cooldown,
            toggle_cooldown,
            last_wave_left: None,
            last_wave_right: None,
            last_toggle: None,
        }
    }

    fn armed(&self, class: Class, now: Instant) -> bool {
        let (last, cooldown) = match class {
            Class::WaveLeft => (self.last_wave_left, self.wave_cooldown),
            Class::WaveRight => (self.last_wave_right, self.wave_cooldown),
            Class::Toggle => (self.last_toggle, self.toggle_cooldown),
        };
        match last {
            None => true,
            Some(t) => now.duration_since(t) > cooldown,
        }
    }

    fn record_fire(&mut self, class: Class, now: Instant) {
        match class {
            Class::WaveLeft => self.last_wave_left = Some(now),
            Class::WaveRight => self.last_wave_right = Some(now),
            Class::Toggle => self.last_toggle = Some(now),
        }
    }

    /// Arbitrate one frame's detections.
    ///
    /// Discrete slot: the first hand (in detector order) whose pose
    /// classifies takes the slot; if its class is cooling the verdict is
    /// dropped and later hands may still claim the slot.  Volume slot:
    /// the first hand holding the pinch pose, measured in pixel space.
    pub fn decide(
        &mut self,
        hands: &[DetectedHand],
        frame_width: f32,
        frame_height: f32,
        now: Instant,
    ) -> FrameDecision {
        let mut decision = FrameDecision::default();

        for hand in hands {
            if decision.command.is_none() {
                if let Some(pose) = discrete_pose(&hand.landmarks, &self.classifier) {
                    let (class, command) = match pose {
                        Pose::WaveLeft => (Class::WaveLeft, Command::NextTrack),
                        Pose::WaveRight => (Class::WaveRight, Command::PreviousTrack),
                        Pose::PlayPause => (Class::Toggle, Command::PlayPauseToggle),
                    };
                    if self.armed(class, now) {
                        self.record_fire(class, now);
                        decision.command = Some(command);
                    }
                }
            }

            if decision.pinch_px.is_none() && is_volume_pose(&hand.landmarks) {
                let span = pixel_distance(
                    hand.landmarks[THUMB_TIP],
                    hand.landmarks[INDEX_TIP],
                    frame_width,
                    frame_height,
                );
                decision.pinch_px = Some(span);
            }
        }

        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_pose::{synthetic, DetectedHand, Handedness};

    const W: f32 = 640.0;
    const H: f32 = 480.0;

    fn hand(set: hand_pose::LandmarkSet) -> DetectedHand {
        DetectedHand::new(set, Handedness::Right)
    }

    fn arbiter() -> GestureArbiter {
        GestureArbiter::new(
            ClassifierConfig::default(),
            Duration::from_secs(1),
            Duration::from_secs(1),
        )
    }

    #[test]
    fn wave_within_cooldown_fires_once() {
        let mut arb = arbiter();
        let t0 = Instant::now();
        let hands = [hand(synthetic::wave_left())];

        let d1 = arb.decide(&hands, W, H, t0);
        assert_eq!(d1.command, Some(Command::NextTrack));

        let d2 = arb.decide(&hands, W, H, t0 + Duration::from_millis(500));
        assert_eq!(d2.command, None);
    }

    #[test]
    fn wave_past_cooldown_fires_twice() {
        let mut arb = arbiter();
        let t0 = Instant::now();
        let hands = [hand(synthetic::wave_left())];

        assert_eq!(
            arb.decide(&hands, W, H, t0).command,
            Some(Command::NextTrack)
        );
        assert_eq!(
            arb.decide(&hands, W, H, t0 + Duration::from_millis(1500))
                .command,
            Some(Command::NextTrack)
        );
    }

    #[test]
    fn wave_and_toggle_cooldowns_are_independent() {
        let mut arb = arbiter();
        let t0 = Instant::now();

        let wave = [hand(synthetic::wave_left())];
        assert_eq!(arb.decide(&wave, W, H, t0).command, Some(Command::NextTrack));

        // The wave is cooling, but the toggle class is still armed.
        let ok = [hand(synthetic::play_pause())];
        let d = arb.decide(&ok, W, H, t0 + Duration::from_millis(100));
        assert_eq!(d.command, Some(Command::PlayPauseToggle));
    }

    #[test]
    fn one_discrete_command_per_frame_across_hands() {
        let mut arb = arbiter();
        let hands = [hand(synthetic::wave_left()), hand(synthetic::play_pause())];
        let d = arb.decide(&hands, W, H, Instant::now());
        // First hand in iteration order takes the slot.
        assert_eq!(d.command, Some(Command::NextTrack));
    }

    #[test]
    fn cooling_verdict_is_dropped_not_queued() {
        let mut arb = arbiter();
        let t0 = Instant::now();
        let hands = [hand(synthetic::wave_left())];

        arb.decide(&hands, W, H, t0);
        arb.decide(&hands, W, H, t0 + Duration::from_millis(900));
        // Past the cooldown now: the dropped frame must not replay.
        let d = arb.decide(&[], W, H, t0 + Duration::from_millis(1200));
        assert_eq!(d.command, None);
    }

    #[test]
    fn cooling_first_hand_leaves_slot_for_second() {
        let mut arb = arbiter();
        let t0 = Instant::now();

        arb.decide(&[hand(synthetic::wave_left())], W, H, t0);
        let hands = [hand(synthetic::wave_left()), hand(synthetic::play_pause())];
        let d = arb.decide(&hands, W, H, t0 + Duration::from_millis(200));
        assert_eq!(d.command, Some(Command::PlayPauseToggle));
    }

    #[test]
    fn pinch_measured_in_pixel_space() {
        let mut arb = arbiter();
        // Tips share an x column, so the span is gap × frame height.
        let hands = [hand(synthetic::volume_pose(0.25))];
        let d = arb.decide(&hands, W, H, Instant::now());
        let span = d.pinch_px.expect("pinch pose should gate the channel");
        assert!((span - 0.25 * H).abs() < 1e-3);
    }

    #[test]
    fn volume_channel_is_parallel_to_discrete_fire() {
        let mut arb = arbiter();
        let hands = [hand(synthetic::wave_left()), hand(synthetic::volume_pose(0.2))];
        let d = arb.decide(&hands, W, H, Instant::now());
        assert_eq!(d.command, Some(Command::NextTrack));
        assert!(d.pinch_px.is_some());
    }

    #[test]
    fn volume_channel_ignores_cooldowns() {
        let mut arb = arbiter();
        let t0 = Instant::now();
        let hands = [hand(synthetic::volume_pose(0.2))];
        for i in 0..5 {
            let d = arb.decide(&hands, W, H, t0 + Duration::from_millis(i * 33));
            assert!(d.pinch_px.is_some(), "frame {} lost the signal", i);
        }
    }

    #[test]
    fn empty_frame_decides_nothing() {
        let mut arb = arbiter();
        assert_eq!(arb.decide(&[], W, H, Instant::now()), FrameDecision::default());
    }
}
