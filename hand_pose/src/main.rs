//! pose_probe — print what the classifiers make of each canonical pose.
//!
//! Handy sanity check when tuning thresholds.

use hand_pose::classify::{discrete_pose, is_play_pause, is_volume_pose, ClassifierConfig};
use hand_pose::{synthetic, LandmarkSet};

fn probe(name: &str, set: &LandmarkSet, cfg: &ClassifierConfig) {
    println!(
        "  {:<16} discrete={:<12} volume-gate={:<5} ok-sign={}",
        name,
        match discrete_pose(set, cfg) {
            Some(p) => format!("{:?}", p),
            None => "-".to_string(),
        },
        is_volume_pose(set),
        is_play_pause(set, cfg),
    );
}

fn main() {
    let cfg = ClassifierConfig::default();
    println!("pose_probe — classifier verdicts for the canonical poses");
    println!(
        "  (wave margin {:.2}, touch distance {:.2})\n",
        cfg.wave_margin, cfg.touch_distance
    );

    probe("neutral", &synthetic::neutral(), &cfg);
    probe("wave left", &synthetic::wave_left(), &cfg);
    probe("wave right", &synthetic::wave_right(), &cfg);
    probe("volume (wide)", &synthetic::volume_pose(0.40), &cfg);
    probe("volume (narrow)", &synthetic::volume_pose(0.06), &cfg);
    probe("ok sign", &synthetic::play_pause(), &cfg);
}
