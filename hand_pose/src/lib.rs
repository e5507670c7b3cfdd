//! # hand_pose
//!
//! Data model and pure classification logic for 21-point hand landmarks,
//! following the MediaPipe hand-landmarker index convention:
//!
//! ```text
//!          8   12  16  20          tips
//!          7   11  15  19
//!      4   6   10  14  18          proximal (PIP) joints
//!      3   5   9   13  17
//!      2
//!        1
//!          0                       wrist
//! ```
//!
//! Coordinates are normalized to `[0, 1]` relative to the source frame
//! (image convention: y grows downward, so a raised fingertip has a
//! *smaller* y than its joint).  The index order is a contract with the
//! detector and is never reordered.
//!
//! The crate is deliberately free of I/O and dependencies: every function
//! here is a pure computation over immutable landmark sets, so the gesture
//! layer can be unit-tested without a camera or a detector.

use std::ops::Index;

pub mod classify;
pub mod geometry;
pub mod synthetic;

/// Number of landmarks per detected hand.
pub const NUM_LANDMARKS: usize = 21;

/// Landmark indices (MediaPipe hand-landmarker convention).
pub mod landmark {
    pub const WRIST: usize = 0;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_PIP: usize = 14;
    pub const RING_TIP: usize = 16;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_TIP: usize = 20;

    /// The five fingertip indices, thumb first.
    pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];
}

/// One tracked point on a hand, in normalized frame coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Landmark { x, y }
    }
}

/// An ordered set of exactly [`NUM_LANDMARKS`] points for one hand.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkSet {
    points: [Landmark; NUM_LANDMARKS],
}

impl LandmarkSet {
    pub fn new(points: [Landmark; NUM_LANDMARKS]) -> Self {
        LandmarkSet { points }
    }

    /// Build from a slice; returns `None` unless exactly 21 points are given.
    pub fn from_slice(points: &[Landmark]) -> Option<Self> {
        let points: [Landmark; NUM_LANDMARKS] = points.try_into().ok()?;
        Some(LandmarkSet { points })
    }

    pub fn point(&self, index: usize) -> Landmark {
        self.points[index]
    }

    pub fn points(&self) -> &[Landmark; NUM_LANDMARKS] {
        &self.points
    }
}

impl Index<usize> for LandmarkSet {
    type Output = Landmark;
    fn index(&self, index: usize) -> &Landmark {
        &self.points[index]
    }
}

/// Left/Right label reported by the detector.
///
/// Subject to mirroring: a selfie-flipped frame swaps the apparent side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// One detection result: a landmark set plus its handedness tag.
///
/// A fresh value arrives every frame; no identity persists across frames.
#[derive(Clone, Debug)]
pub struct DetectedHand {
    pub landmarks: LandmarkSet,
    pub handedness: Handedness,
}

impl DetectedHand {
    pub fn new(landmarks: LandmarkSet, handedness: Handedness) -> Self {
        DetectedHand {
            landmarks,
            handedness,
        }
    }
}
