//! Rockfall headless runner
//!
//! Plays the game on autopilot without a window and prints the final render
//! snapshot as JSON. Handy for soak-testing tuning files.
//!
//! Usage: `rockfall [FRAMES] [TUNING.json]`

use rockfall::Tuning;
use rockfall::consts::SIM_DT;
use rockfall::sim::{FixedStep, GameEvent, World, autopilot_input};

/// Default run length (one minute of game time)
const DEFAULT_FRAMES: u64 = 3600;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rockfall (headless) starting...");

    let mut args = std::env::args().skip(1);
    let frames = match args.next().map(|a| a.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid frame count: {}", e);
            std::process::exit(2);
        }
        None => DEFAULT_FRAMES,
    };

    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::error!("{}; falling back to default tuning", e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    let mut world = World::new(tuning);
    log::info!("Game initialized with seed: {}", world.seed);

    let mut stepper = FixedStep::new();
    let mut deaths = 0u32;
    while world.frame < frames {
        let input = autopilot_input(&world);
        stepper.advance(&mut world, SIM_DT, &input);

        for event in world.drain_events() {
            match event {
                GameEvent::WaveStarted { wave } => log::info!("Wave {} (score {})", wave, world.score),
                GameEvent::WorldReset => log::info!("Game over, world reset"),
                GameEvent::Explosion {
                    kind: rockfall::sim::ExplosionKind::Ship,
                    ..
                } => deaths += 1,
                _ => {}
            }
        }
    }

    log::info!(
        "Finished {} frames: score {}, wave {}, {} ship losses",
        world.frame,
        world.score,
        world.wave,
        deaths
    );

    match serde_json::to_string_pretty(&world.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to serialize snapshot: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives the simulation directly through the library
}
