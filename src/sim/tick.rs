//! Fixed timestep simulation tick
//!
//! One tick: integrate, resolve ground contact, age and emit particles.

use super::collision::resolve;
use super::physics::integrate;
use super::state::{InputIntent, Session, TerminalState};
use crate::consts::SIM_DT;

/// Something the frontend may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// The vehicle reached the ground this tick
    Touchdown(TerminalState),
}

/// Advance the session by one fixed timestep.
///
/// After touchdown the vehicle is frozen; ticks still count and particles
/// keep fading.
pub fn tick(session: &mut Session, input: &InputIntent, dt: f32) -> Option<TickEvent> {
    session.time_ticks += 1;

    let was_flying = session.vehicle.is_flying();
    let moved = integrate(&session.vehicle, input, dt, &session.tuning);
    session.vehicle = resolve(&moved, &session.terrain, &session.tuning);

    session.particles.update(dt / SIM_DT);
    if session.vehicle.is_flying() && session.vehicle.thrust > 0.0 {
        session.emit_exhaust();
    }

    if was_flying && !session.vehicle.is_flying() {
        Some(TickEvent::Touchdown(session.vehicle.terminal))
    } else {
        None
    }
}
