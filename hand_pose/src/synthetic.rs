//! Canonical synthetic landmark sets, one per recognizable pose.
//!
//! Used by the keyboard-simulation hand source and by unit tests: each
//! constructor yields a hand that satisfies exactly one classifier (or
//! none, for [`neutral`]), so gesture logic can be exercised without a
//! camera or detector.
//!
//! All sets share the same anatomical template: wrist at (0.50, 0.85),
//! finger columns spread left-to-right, joints stacked with image-y
//! growing downward.

use crate::landmark::*;
use crate::{Landmark, LandmarkSet, NUM_LANDMARKS};

fn lm(x: f32, y: f32) -> Landmark {
    Landmark::new(x, y)
}

/// An upright open hand that matches no classifier.
///
/// The thumb tip sits slightly *outside* its IP joint so the volume pinch
/// gate stays closed even when fingers are later folded down.
pub fn neutral() -> LandmarkSet {
    let mut p = [Landmark::default(); NUM_LANDMARKS];
    p[WRIST] = lm(0.50, 0.85);
    // thumb chain
    p[1] = lm(0.44, 0.78);
    p[2] = lm(0.42, 0.72);
    p[THUMB_IP] = lm(0.38, 0.66);
    p[THUMB_TIP] = lm(0.40, 0.60);
    // index
    p[5] = lm(0.44, 0.70);
    p[INDEX_PIP] = lm(0.44, 0.60);
    p[7] = lm(0.44, 0.52);
    p[INDEX_TIP] = lm(0.44, 0.45);
    // middle
    p[9] = lm(0.50, 0.70);
    p[MIDDLE_PIP] = lm(0.50, 0.60);
    p[11] = lm(0.50, 0.52);
    p[MIDDLE_TIP] = lm(0.50, 0.44);
    // ring
    p[13] = lm(0.56, 0.70);
    p[RING_PIP] = lm(0.56, 0.60);
    p[15] = lm(0.56, 0.52);
    p[RING_TIP] = lm(0.56, 0.45);
    // pinky
    p[17] = lm(0.62, 0.72);
    p[PINKY_PIP] = lm(0.62, 0.63);
    p[19] = lm(0.62, 0.56);
    p[PINKY_TIP] = lm(0.62, 0.50);
    LandmarkSet::new(p)
}

/// Every fingertip swept well left of the wrist; curled fingers keep the
/// volume and play/pause gates closed.
pub fn wave_left() -> LandmarkSet {
    let mut p = *neutral().points();
    p[THUMB_IP] = lm(0.34, 0.66);
    p[THUMB_TIP] = lm(0.30, 0.62);
    p[INDEX_TIP] = lm(0.32, 0.66);
    p[MIDDLE_TIP] = lm(0.34, 0.68);
    p[RING_TIP] = lm(0.36, 0.68);
    p[PINKY_TIP] = lm(0.38, 0.70);
    LandmarkSet::new(p)
}

/// Mirror of [`wave_left`].
pub fn wave_right() -> LandmarkSet {
    let mut p = *neutral().points();
    p[THUMB_IP] = lm(0.66, 0.66);
    p[THUMB_TIP] = lm(0.70, 0.62);
    p[INDEX_TIP] = lm(0.68, 0.66);
    p[MIDDLE_TIP] = lm(0.66, 0.68);
    p[RING_TIP] = lm(0.64, 0.68);
    p[PINKY_TIP] = lm(0.62, 0.70);
    LandmarkSet::new(p)
}

/// The pinch-ready volume pose with the thumb and index tips separated
/// vertically by `gap` (normalized units, must exceed 0.02 so the index
/// still counts as extended).
///
/// The two tips share an x column, so the normalized thumb–index distance
/// equals `gap` exactly and the pixel span is `gap × frame height`.
pub fn volume_pose(gap: f32) -> LandmarkSet {
    let mut p = *neutral().points();
    p[THUMB_IP] = lm(0.50, 0.66);
    p[THUMB_TIP] = lm(0.44, 0.62);
    p[INDEX_TIP] = lm(0.44, 0.62 - gap);
    p[MIDDLE_TIP] = lm(0.50, 0.68);
    p[RING_TIP] = lm(0.56, 0.68);
    p[PINKY_TIP] = lm(0.62, 0.70);
    LandmarkSet::new(p)
}

/// The OK sign: thumb touching the index tip, other fingers up.
pub fn play_pause() -> LandmarkSet {
    let mut p = *neutral().points();
    p[THUMB_TIP] = lm(0.44, 0.47);
    LandmarkSet::new(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::euclidean_distance;

    #[test]
    fn volume_pose_gap_is_exact() {
        let set = volume_pose(0.25);
        let d = euclidean_distance(set[THUMB_TIP], set[INDEX_TIP]);
        assert!((d - 0.25).abs() < 1e-6);
    }

    #[test]
    fn template_has_wrist_at_anchor() {
        assert_eq!(neutral()[WRIST], lm(0.50, 0.85));
    }
}
