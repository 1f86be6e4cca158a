//! Lunar Lander headless runner
//!
//! Flies one session with a simple demo pilot at a simulated 60 Hz frame
//! rate and reports how it ended. Rendering is left to a real frontend.
//!
//! Usage: `lunar-lander [seed] [tuning.json]`

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use lunar_lander::consts::SIM_DT;
use lunar_lander::sim::{InputIntent, SimulationSnapshot, TickEvent};
use lunar_lander::{SimulationClock, Tuning};

/// Two minutes of flight
const FRAME_LIMIT: u32 = 60 * 120;

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);

    let seed = match args.next() {
        Some(raw) => match raw.parse::<u64>() {
            Ok(seed) => seed,
            Err(e) => {
                log::error!("Invalid seed {:?}: {}", raw, e);
                return ExitCode::FAILURE;
            }
        },
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(1),
    };

    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    log::info!("Lunar Lander (headless) starting with seed {}", seed);
    let mut clock = SimulationClock::new(seed, tuning);

    let mut outcome = None;
    for _ in 0..FRAME_LIMIT {
        let input = demo_pilot(&clock.snapshot(), clock.tuning());
        if let (_, Some(TickEvent::Touchdown(state))) = clock.advance(SIM_DT, &input) {
            outcome = Some(state);
            break;
        }
    }

    let snap = clock.snapshot();
    match outcome.and_then(|state| state.message()) {
        Some(message) => println!(
            "{} tick={} x={:.1} fuel={} speed={}",
            message,
            snap.tick,
            snap.position.x,
            snap.fuel_readout(),
            snap.speed_readout()
        ),
        None => println!("Still flying after {} ticks", snap.tick),
    }

    ExitCode::SUCCESS
}

/// Drift over the nearest pad, then come down upright and slow
fn demo_pilot(snap: &SimulationSnapshot<'_>, tuning: &Tuning) -> InputIntent {
    let ground = snap
        .terrain
        .height_at(snap.position.x)
        .unwrap_or(tuning.world_height);
    let altitude = ground - (snap.position.y + tuning.half_height);
    let max_descent = if altitude > 150.0 { 2.0 } else { 0.6 };

    // Cruise toward the pad while high, null horizontal speed when low
    let target_vx = match snap.terrain.nearest_pad(snap.position.x) {
        Some(pad) if altitude > 150.0 => ((pad - snap.position.x) * 0.01).clamp(-1.5, 1.5),
        _ => 0.0,
    };
    let vx_error = target_vx - snap.velocity.x;
    let target_angle = (vx_error * 0.3).clamp(-0.3, 0.3);

    InputIntent {
        thrust: snap.velocity.y > max_descent || (vx_error.abs() > 0.2 && snap.velocity.y > -0.5),
        rotate_left: snap.angle > target_angle + 0.02,
        rotate_right: snap.angle < target_angle - 0.02,
    }
}
