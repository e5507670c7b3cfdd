//! Volume sink abstraction and the linear remapping used to drive it.
//!
//! The device reports its own level range once at startup; the session
//! pre-clamps before calling `set_level`.  [`remap`] is the single
//! mapping primitive, used both for pixel-span → device level and for
//! the 0–100 display percentage.

use std::sync::Arc;

use rodio::Sink;

pub trait VolumeSink {
    /// Device level range `(min, max)`, in device-defined units.
    fn range(&self) -> (f32, f32);
    /// Current level, within `range()`.
    fn level(&self) -> f32;
    /// Set the level.  Callers clamp; backends may clamp again.
    fn set_level(&mut self, level: f32);
}

/// Linear interpolation of `value` from `input` to `output`, clamped at
/// both endpoints (the behavior of numpy's `interp` on a two-point grid).
pub fn remap(value: f32, input: (f32, f32), output: (f32, f32)) -> f32 {
    let (in_lo, in_hi) = input;
    let (out_lo, out_hi) = output;
    let t = ((value - in_lo) / (in_hi - in_lo)).clamp(0.0, 1.0);
    out_lo + t * (out_hi - out_lo)
}

// ════════════════════════════════════════════════════════════════════════════
// SoftVolume — gain on the playback sink
// ════════════════════════════════════════════════════════════════════════════

/// Volume backend that scales the playback sink's own gain, range 0–1.
///
/// Used when no system mixer is available; loudness still tracks the
/// pinch, just scoped to this process's audio.
pub struct SoftVolume {
    sink: Arc<Sink>,
}

impl SoftVolume {
    pub fn new(sink: Arc<Sink>) -> Self {
        SoftVolume { sink }
    }
}

impl VolumeSink for SoftVolume {
    fn range(&self) -> (f32, f32) {
        (0.0, 1.0)
    }

    fn level(&self) -> f32 {
        self.sink.volume()
    }

    fn set_level(&mut self, level: f32) {
        self.sink.set_volume(level.clamp(0.0, 1.0));
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FakeSink — remembered-level fake for tests
// ════════════════════════════════════════════════════════════════════════════

/// Test sink with an arbitrary (possibly negative, decibel-like) range.
pub struct FakeSink {
    pub min: f32,
    pub max: f32,
    pub current: f32,
    pub set_calls: usize,
}

impl FakeSink {
    pub fn new(min: f32, max: f32, current: f32) -> Self {
        FakeSink {
            min,
            max,
            current,
            set_calls: 0,
        }
    }
}

impl VolumeSink for FakeSink {
    fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    fn level(&self) -> f32 {
        self.current
    }

    fn set_level(&mut self, level: f32) {
        self.current = level.clamp(self.min, self.max);
        self.set_calls += 1;
    }
}
