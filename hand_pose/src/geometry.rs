//! Pure numeric helpers over landmark sets.
//!
//! Classification works in normalized coordinates; the continuous volume
//! channel measures the thumb–index span in *pixel* space for stable
//! screen-relative scaling, hence the two distance variants.

use crate::{Landmark, LandmarkSet};

/// Signed horizontal offset of `tip` from `reference` (usually the wrist),
/// in normalized coordinates.  Negative means left of the reference.
pub fn lateral_offset(set: &LandmarkSet, tip: usize, reference: usize) -> f32 {
    set[tip].x - set[reference].x
}

/// Whether `tip` sits above `joint` on screen.
///
/// Image y grows downward, so "pointing up" means a smaller y.
pub fn is_extended_vertically(set: &LandmarkSet, tip: usize, joint: usize) -> bool {
    set[tip].y < set[joint].y
}

/// Euclidean distance between two landmarks in normalized coordinates.
pub fn euclidean_distance(a: Landmark, b: Landmark) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Euclidean distance between two landmarks after scaling to a
/// `width × height` pixel frame.
pub fn pixel_distance(a: Landmark, b: Landmark, width: f32, height: f32) -> f32 {
    let dx = (a.x - b.x) * width;
    let dy = (a.y - b.y) * height;
    (dx * dx + dy * dy).sqrt()
}
