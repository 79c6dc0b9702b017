//! RK Particles entry point
//!
//! Headless native host: drives the simulation on a fixed tick with a
//! scripted pointer, feeds key commands from the command line and logs what
//! the renderer would draw.
//!
//! Run with `--help` for options.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use rk_particles::sim::{ModeCommand, Simulation, TickInput};
use rk_particles::{PointerTracker, Settings};

const KEY_HELP: &str = "Keypresses to change simulation types:
's' or 'S' - Freeze simulation (particles won't age or move)
'g' or 'G' - Standard gravity with Euler
'b' or 'B' - Blackhole with Euler
'r' or 'R' - Standard gravity with RK4
'k' or 'K' - Blackhole with RK4
'o' or 'O' - Clear all the particles off the screen
'+' or '-' - Make the particles larger or smaller";

/// Headless particle fountain driven by a scripted pointer
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Key presses spread evenly over the run
    #[arg(long, default_value = "gRkB")]
    keys: String,
    /// Sleep the configured tick interval between ticks
    #[arg(long)]
    realtime: bool,
    /// Print the final snapshot as JSON
    #[arg(long)]
    dump: bool,
}

fn main() {
    let args = Args::parse();

    env_logger::init();
    println!("{KEY_HELP}");

    let mut settings = match &args.config {
        Some(path) => Settings::load(path).unwrap_or_else(|e| {
            log::warn!("{e}; using default settings");
            Settings::default()
        }),
        None => Settings::default(),
    };

    let mut sim = match Simulation::from_settings(&settings) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    log::info!("RK Particles (native) starting, seed {}", sim.seed);

    run(&args, &mut settings, &mut sim);

    let snapshot = sim.snapshot();
    log::info!(
        "Finished after {} ticks: {} live particles, mode {:?}/{}",
        sim.time_ticks,
        snapshot.len(),
        sim.mode().model,
        sim.mode().integrator.as_str()
    );

    if args.dump {
        let views: Vec<_> = snapshot.iter().collect();
        match serde_json::to_string_pretty(&views) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize snapshot: {e}"),
        }
    }
}

/// Drive the scripted session: the pointer circles the screen with the button
/// held, and the keys are spread evenly over the run.
fn run(args: &Args, settings: &mut Settings, sim: &mut Simulation) {
    let keys: Vec<char> = args.keys.chars().collect();
    let key_every = (args.ticks / (keys.len() as u64 + 1)).max(1);
    let mut next_key = keys.iter();

    let size = settings.screen_size;
    let mut pointer = PointerTracker::new(size);
    pointer.press(size * 0.5, size * 0.25);

    for t in 0..args.ticks {
        let mut command = None;
        if t > 0 && t % key_every == 0 {
            if let Some(&key) = next_key.next() {
                command = ModeCommand::from_key(key);
                if command.is_none() {
                    log::debug!("Ignoring key {key:?}");
                }
            }
        }

        // Point size is consumed by the render side
        if let Some(ModeCommand::PointSize(step)) = command {
            settings.adjust_point_size(step);
            command = None;
        }

        let angle = t as f32 * 0.05;
        pointer.motion(size * (0.5 + 0.3 * angle.cos()), size * (0.5 - 0.3 * angle.sin()));

        let input = TickInput {
            spawn: pointer.spawn_request(),
            command,
        };
        sim.advance(&input);

        let snapshot = sim.snapshot();
        log::trace!("tick {} live {} point size {}", t, snapshot.len(), settings.point_size);

        if args.realtime {
            std::thread::sleep(Duration::from_millis(settings.tick_interval_ms));
        }
    }

    pointer.release();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["rk-particles"]).unwrap();
        assert_eq!(args.ticks, 600);
        assert_eq!(args.keys, "gRkB");
        assert!(args.config.is_none());
        assert!(!args.realtime && !args.dump);
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::try_parse_from([
            "rk-particles",
            "--config",
            "sim.json",
            "--ticks",
            "5",
            "--keys",
            "bK",
            "--dump",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("sim.json")));
        assert_eq!(args.ticks, 5);
        assert_eq!(args.keys, "bK");
        assert!(args.dump);
    }

    #[test]
    fn test_args_rejects_unknown_flag() {
        assert!(Args::try_parse_from(["rk-particles", "--ticks", "5", "--bogus"]).is_err());
        assert!(Args::try_parse_from(["rk-particles", "--ticks", "many"]).is_err());
    }
}
