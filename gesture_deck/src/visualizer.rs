//! Software-rendered overlay using `minifb`.
//!
//! Layout (640×480, matching the camera frame):
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  [transient message]                         │
//! │  ┌──┐                                        │
//! │  │██│   hand skeleton(s)                     │
//! │  │██│◄ volume bar                            │
//! │  └──┘                                        │
//! │  Volume: 57%      track + play state         │
//! │  key legend                                  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Purely cosmetic: nothing here feeds back into gesture logic except
//! the polled keyboard snapshot.

use std::time::Instant;

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use hand_pose::classify::is_volume_pose;
use hand_pose::landmark::{INDEX_TIP, THUMB_TIP};
use hand_pose::{DetectedHand, NUM_LANDMARKS};

use crate::player::PlaybackEngine;
use crate::session::Session;
use crate::tracker::{Frame, InputSnapshot, SimPose};
use crate::volume::{remap, VolumeSink};

pub const WIN_W: usize = 640;
pub const WIN_H: usize = 480;

// Volume bar geometry, top-left anchored.
const BAR_X: usize = 50;
const BAR_TOP: usize = 150;
const BAR_BOTTOM: usize = 400;
const BAR_W: usize = 35;

const BG_COLOR: u32 = 0xFF101820;
const BONE_COLOR: u32 = 0xFF3FD07F;
const JOINT_COLOR: u32 = 0xFFE8F0E8;
const PINCH_COLOR: u32 = 0xFFCC44CC;
const BAR_COLOR: u32 = 0xFF00C850;
const MESSAGE_COLOR: u32 = 0xFF00E060;
const TEXT_COLOR: u32 = 0xFFD8D8D8;
const DIM_COLOR: u32 = 0xFF707070;

/// Landmark pairs forming the hand skeleton (MediaPipe convention).
const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4), // thumb
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8), // index
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12), // middle
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16), // ring
    (13, 17),
    (17, 18),
    (18, 19),
    (19, 20), // pinky
    (0, 17), // palm edge
];

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
}

impl Visualizer {
    pub fn new() -> Result<Self, String> {
        let mut window = Window::new(
            "Gesture Deck — Hand-Controlled Music Player",
            WIN_W,
            WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Snapshot the keyboard for this frame.
    ///
    /// Held keys map to held poses (a real hand holds its pose across
    /// frames; the debounce layer decides what refires).
    pub fn poll_input(&mut self) -> InputSnapshot {
        if !self.window.is_open() || self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            return InputSnapshot {
                quit: true,
                ..InputSnapshot::default()
            };
        }

        let pose = if self.window.is_key_down(Key::V) {
            Some(SimPose::Volume)
        } else if self.window.is_key_down(Key::Left) {
            Some(SimPose::WaveLeft)
        } else if self.window.is_key_down(Key::Right) {
            Some(SimPose::WaveRight)
        } else if self.window.is_key_down(Key::P) {
            Some(SimPose::PlayPause)
        } else {
            None
        };

        let pinch_step = match (
            self.window.is_key_down(Key::Up),
            self.window.is_key_down(Key::Down),
        ) {
            (true, false) => 1,
            (false, true) => -1,
            _ => 0,
        };

        InputSnapshot {
            quit: false,
            pose,
            pinch_step,
        }
    }

    /// Render one frame of overlay state.
    pub fn render<P: PlaybackEngine, V: VolumeSink>(
        &mut self,
        frame: &Frame,
        session: &Session<P, V>,
        now: Instant,
    ) {
        self.buf.fill(BG_COLOR);

        for hand in &frame.hands {
            self.draw_skeleton(hand);
        }

        self.draw_volume_bar(session.volume_percent());

        let volume_line = format!("Volume: {}%", session.volume_percent());
        self.draw_text(&volume_line, 40, 448, 2, TEXT_COLOR);

        let state = if session.is_busy() { "playing" } else { "paused" };
        let track_line = format!("{} [{}]", session.track_name(), state);
        self.draw_text(&track_line, 180, 448, 1, DIM_COLOR);

        if let Some(message) = session.message(now) {
            self.draw_text(message, 40, 64, 3, MESSAGE_COLOR);
        }

        self.draw_text(
            "Left/Right=wave  P=ok sign  V+Up/Down=pinch  Q=quit",
            40,
            468,
            1,
            DIM_COLOR,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── skeleton ──────────────────────────────────────────────────────────

    fn draw_skeleton(&mut self, hand: &DetectedHand) {
        let px = |i: usize| {
            let p = hand.landmarks[i];
            (
                (p.x * WIN_W as f32) as isize,
                (p.y * WIN_H as f32) as isize,
            )
        };

        for &(a, b) in HAND_CONNECTIONS.iter() {
            let (x0, y0) = px(a);
            let (x1, y1) = px(b);
            self.draw_line(x0, y0, x1, y1, BONE_COLOR);
        }
        for i in 0..NUM_LANDMARKS {
            let (x, y) = px(i);
            self.fill_rect_clipped(x - 1, y - 1, 3, 3, JOINT_COLOR);
        }

        // Highlight the active pinch, thumb tip to index tip.
        if is_volume_pose(&hand.landmarks) {
            let (tx, ty) = px(THUMB_TIP);
            let (ix, iy) = px(INDEX_TIP);
            self.draw_line(tx, ty, ix, iy, PINCH_COLOR);
            self.fill_rect_clipped(tx - 3, ty - 3, 7, 7, PINCH_COLOR);
            self.fill_rect_clipped(ix - 3, iy - 3, 7, 7, PINCH_COLOR);
        }
    }

    // ── volume bar ────────────────────────────────────────────────────────

    fn draw_volume_bar(&mut self, percent: u8) {
        let fill_top = remap(
            percent as f32,
            (0.0, 100.0),
            (BAR_BOTTOM as f32, BAR_TOP as f32),
        ) as usize;

        // Outline
        self.fill_rect_clipped(BAR_X as isize, BAR_TOP as isize, BAR_W, 2, BAR_COLOR);
        self.fill_rect_clipped(BAR_X as isize, BAR_BOTTOM as isize, BAR_W, 2, BAR_COLOR);
        self.fill_rect_clipped(BAR_X as isize, BAR_TOP as isize, 2, BAR_BOTTOM - BAR_TOP, BAR_COLOR);
        self.fill_rect_clipped(
            (BAR_X + BAR_W) as isize,
            BAR_TOP as isize,
            2,
            BAR_BOTTOM - BAR_TOP + 2,
            BAR_COLOR,
        );
        // Fill grows upward from the bottom.
        self.fill_rect_clipped(
            BAR_X as isize + 2,
            fill_top as isize,
            BAR_W - 2,
            BAR_BOTTOM.saturating_sub(fill_top),
            BAR_COLOR,
        );
    }

    // ── primitives ────────────────────────────────────────────────────────

    fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < WIN_H {
            self.buf[y as usize * WIN_W + x as usize] = color;
        }
    }

    fn fill_rect_clipped(&mut self, x: isize, y: isize, w: usize, h: usize, color: u32) {
        for row in 0..h as isize {
            for col in 0..w as isize {
                self.set_pixel(x + col, y + row, color);
            }
        }
    }

    fn draw_line(&mut self, x0: isize, y0: isize, x1: isize, y1: isize, color: u32) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs()).max(1);
        for s in 0..=steps {
            let x = x0 + dx * s / steps;
            let y = y0 + dy * s / steps;
            self.set_pixel(x, y, color);
        }
    }

    /// Draw `text` with the built-in 3×5 bitmap font at integer `scale`.
    fn draw_text(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let mut cx = x as isize;
        let cy = y as isize;
        for ch in text.chars() {
            let rows = glyph(ch);
            for (r, bits) in rows.iter().enumerate() {
                for c in 0..3usize {
                    if bits & (0b100 >> c) != 0 {
                        self.fill_rect_clipped(
                            cx + (c * scale) as isize,
                            cy + (r * scale) as isize,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
            cx += (4 * scale) as isize;
            if cx >= WIN_W as isize {
                break;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b110, 0b001, 0b010, 0b100, 0b111],
        '3' => [0b110, 0b001, 0b010, 0b001, 0b110],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b110, 0b001, 0b110],
        '6' => [0b011, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b110],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b011, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b110, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b010, 0b010, 0b010, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '[' => [0b110, 0b100, 0b100, 0b100, 0b110],
        ']' => [0b011, 0b001, 0b001, 0b001, 0b011],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],
        ' ' => [0b000; 5],
        _ => [0b000, 0b010, 0b000, 0b010, 0b000], // unknown → faint colon-ish mark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_cover_the_status_strings() {
        for ch in "Volume: 57% Next Song Previous Paused Playing [playing]".chars() {
            // Every character used by the UI must render something or be a space.
            let g = glyph(ch);
            if ch != ' ' {
                assert!(g.iter().any(|&row| row != 0), "glyph missing for {:?}", ch);
            }
        }
    }

    #[test]
    fn connections_stay_in_bounds() {
        for &(a, b) in HAND_CONNECTIONS.iter() {
            assert!(a < NUM_LANDMARKS && b < NUM_LANDMARKS);
        }
    }
}
