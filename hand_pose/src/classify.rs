//! Gesture-pose classifiers.
//!
//! Each classifier is a pure predicate over one hand's landmark set.
//! Discrete poses (waves, the play/pause "OK" sign) are ranked by
//! [`discrete_pose`] in a fixed precedence order so ambiguous frames
//! resolve deterministically.  The volume pinch pose is a separate,
//! parallel channel: it gates a continuous signal rather than a one-shot
//! command, so it is never arbitrated against the discrete poses.
//!
//! Disambiguation between the two thumb–index poses is structural: the
//! volume pinch requires middle/ring/pinky *down*, the OK sign requires
//! them *up*, so a single hand can never satisfy both.

use crate::geometry::{euclidean_distance, is_extended_vertically, lateral_offset};
use crate::landmark::*;
use crate::LandmarkSet;

/// Thresholds for the pose predicates, hoisted into one place.
#[derive(Clone, Copy, Debug)]
pub struct ClassifierConfig {
    /// Horizontal margin past the wrist a fingertip must clear before a
    /// wave counts.  Guards against a loosely-closed hand near the wrist.
    pub wave_margin: f32,
    /// Normalized thumb–index distance below which the two tips count as
    /// touching (the OK sign).
    pub touch_distance: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            wave_margin: 0.1,
            touch_distance: 0.05,
        }
    }
}

/// A discrete pose verdict for one hand in one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    WaveLeft,
    WaveRight,
    PlayPause,
}

/// All five fingertips left of the wrist by at least the wave margin.
pub fn is_wave_left(set: &LandmarkSet, cfg: &ClassifierConfig) -> bool {
    FINGERTIPS
        .iter()
        .all(|&tip| lateral_offset(set, tip, WRIST) <= -cfg.wave_margin)
}

/// All five fingertips right of the wrist by at least the wave margin.
pub fn is_wave_right(set: &LandmarkSet, cfg: &ClassifierConfig) -> bool {
    FINGERTIPS
        .iter()
        .all(|&tip| lateral_offset(set, tip, WRIST) >= cfg.wave_margin)
}

/// The pinch-ready volume pose: index up, thumb folded inward toward the
/// centerline, middle/ring/pinky down.
///
/// This is only the *gate*; the continuous signal is the thumb–index span
/// measured separately each frame.
pub fn is_volume_pose(set: &LandmarkSet) -> bool {
    let index_up = is_extended_vertically(set, INDEX_TIP, INDEX_PIP);
    let thumb_in = set[THUMB_TIP].x < set[THUMB_IP].x;
    let middle_down = !is_extended_vertically(set, MIDDLE_TIP, MIDDLE_PIP);
    let ring_down = !is_extended_vertically(set, RING_TIP, RING_PIP);
    let pinky_down = !is_extended_vertically(set, PINKY_TIP, PINKY_PIP);
    index_up && thumb_in && middle_down && ring_down && pinky_down
}

/// The OK sign: thumb and index tips touching, other three fingers up.
pub fn is_play_pause(set: &LandmarkSet, cfg: &ClassifierConfig) -> bool {
    let touching = euclidean_distance(set[THUMB_TIP], set[INDEX_TIP]) < cfg.touch_distance;
    let middle_up = is_extended_vertically(set, MIDDLE_TIP, MIDDLE_PIP);
    let ring_up = is_extended_vertically(set, RING_TIP, RING_PIP);
    let pinky_up = is_extended_vertically(set, PINKY_TIP, PINKY_PIP);
    touching && middle_up && ring_up && pinky_up
}

/// Evaluate the discrete classifiers in fixed precedence order:
/// WaveLeft, WaveRight, PlayPause.  First match wins.
pub fn discrete_pose(set: &LandmarkSet, cfg: &ClassifierConfig) -> Option<Pose> {
    if is_wave_left(set, cfg) {
        Some(Pose::WaveLeft)
    } else if is_wave_right(set, cfg) {
        Some(Pose::WaveRight)
    } else if is_play_pause(set, cfg) {
        Some(Pose::PlayPause)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic;
    use crate::{Landmark, NUM_LANDMARKS};

    fn cfg() -> ClassifierConfig {
        ClassifierConfig::default()
    }

    #[test]
    fn wave_left_when_all_tips_clear_the_margin() {
        assert!(is_wave_left(&synthetic::wave_left(), &cfg()));
    }

    #[test]
    fn wave_left_fails_if_one_tip_violates_the_bound() {
        for &tip in FINGERTIPS.iter() {
            let mut pts = *synthetic::wave_left().points();
            // Drag a single fingertip back inside the margin.
            pts[tip] = Landmark::new(pts[WRIST].x - 0.05, pts[tip].y);
            let set = crate::LandmarkSet::new(pts);
            assert!(!is_wave_left(&set, &cfg()), "tip {} should break it", tip);
        }
    }

    #[test]
    fn wave_right_mirrors_wave_left() {
        let set = synthetic::wave_right();
        assert!(is_wave_right(&set, &cfg()));
        assert!(!is_wave_left(&set, &cfg()));
    }

    #[test]
    fn volume_pose_requires_three_fingers_down() {
        let set = synthetic::volume_pose(0.15);
        assert!(is_volume_pose(&set));

        // Raise the middle finger: pose breaks.
        let mut pts = *set.points();
        pts[MIDDLE_TIP] = Landmark::new(pts[MIDDLE_TIP].x, pts[MIDDLE_PIP].y - 0.1);
        assert!(!is_volume_pose(&crate::LandmarkSet::new(pts)));
    }

    #[test]
    fn volume_pose_requires_thumb_inward() {
        let mut pts = *synthetic::volume_pose(0.15).points();
        pts[THUMB_TIP] = Landmark::new(pts[THUMB_IP].x + 0.05, pts[THUMB_TIP].y);
        assert!(!is_volume_pose(&crate::LandmarkSet::new(pts)));
    }

    #[test]
    fn play_pause_requires_touching_tips() {
        assert!(is_play_pause(&synthetic::play_pause(), &cfg()));

        let mut pts = *synthetic::play_pause().points();
        pts[THUMB_TIP] = Landmark::new(pts[INDEX_TIP].x - 0.2, pts[THUMB_TIP].y);
        assert!(!is_play_pause(&crate::LandmarkSet::new(pts), &cfg()));
    }

    #[test]
    fn ok_sign_and_pinch_pose_are_mutually_exclusive() {
        assert!(!is_volume_pose(&synthetic::play_pause()));
        assert!(!is_play_pause(&synthetic::volume_pose(0.15), &cfg()));
    }

    #[test]
    fn wave_hands_do_not_gate_the_volume_channel() {
        assert!(!is_volume_pose(&synthetic::wave_left()));
        assert!(!is_volume_pose(&synthetic::wave_right()));
    }

    #[test]
    fn neutral_hand_matches_nothing() {
        let set = synthetic::neutral();
        assert_eq!(discrete_pose(&set, &cfg()), None);
        assert!(!is_volume_pose(&set));
    }

    #[test]
    fn precedence_is_wave_left_first() {
        // A degenerate set satisfying both waves is impossible with a
        // nonzero margin, but precedence is still observable: a wave-left
        // hand must classify as WaveLeft even if other predicates were
        // permissive.
        assert_eq!(
            discrete_pose(&synthetic::wave_left(), &cfg()),
            Some(Pose::WaveLeft)
        );
        assert_eq!(
            discrete_pose(&synthetic::wave_right(), &cfg()),
            Some(Pose::WaveRight)
        );
        assert_eq!(
            discrete_pose(&synthetic::play_pause(), &cfg()),
            Some(Pose::PlayPause)
        );
    }

    #[test]
    fn all_zero_landmarks_are_no_pose() {
        let set = crate::LandmarkSet::new([Landmark::default(); NUM_LANDMARKS]);
        assert_eq!(discrete_pose(&set, &cfg()), None);
        assert!(!is_volume_pose(&set));
    }
}
