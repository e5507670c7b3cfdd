//! gesture_deck — interactive entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use gesture_deck::session::{run, RunOptions, SessionConfig};

fn main() -> ExitCode {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║        Gesture Deck — Hand-Controlled Music Player        ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let opts = match parse_args() {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::FAILURE;
        }
    };

    #[cfg(feature = "tracker")]
    match &opts.tracker_cmd {
        Some(cmd) => println!("  Mode: live hand tracking  ({})", cmd),
        None => println!("  Mode: keyboard simulation  (use --tracker-cmd for a camera)"),
    }
    #[cfg(not(feature = "tracker"))]
    println!("  Mode: keyboard simulation  (build with --features tracker for a camera)");
    println!();

    println!("  Gestures:");
    println!("   - Wave left  → Next song");
    println!("   - Wave right → Previous song");
    println!("   - Pinch pose (index up, others down) → Control volume");
    println!("   - OK sign (thumb+index touch) → Play/Pause");
    println!();
    println!("  Tracks: {}", opts.songs_dir.display());
    println!();

    if let Err(e) = run(opts, SessionConfig::default()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn parse_args() -> Result<RunOptions, String> {
    let mut songs_dir = PathBuf::from("songs");
    let mut tracker_cmd = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--songs" => {
                songs_dir = args
                    .next()
                    .map(PathBuf::from)
                    .ok_or("--songs needs a directory")?;
            }
            "--tracker-cmd" => {
                tracker_cmd = Some(args.next().ok_or("--tracker-cmd needs a command")?);
            }
            "--help" | "-h" => {
                println!("usage: gesture_deck [--songs DIR] [--tracker-cmd CMD]");
                std::process::exit(0);
            }
            other => {
                return Err(format!("unknown argument {:?} (try --help)", other));
            }
        }
    }

    Ok(RunOptions {
        songs_dir,
        tracker_cmd,
    })
}
