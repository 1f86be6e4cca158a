//! Vehicle kinematics
//!
//! Explicit Euler over per-tick constants. The constants are tuned for a
//! 60 Hz step; a different `dt` scales them linearly.

use super::state::{InputIntent, Vehicle};
use crate::consts::SIM_DT;
use crate::tuning::Tuning;

/// Advance a vehicle by one tick. Pure: same inputs, same output.
///
/// Order: gravity, thrust, rotation, position, horizontal wrap. A vehicle
/// that has landed or crashed is returned unchanged.
pub fn integrate(vehicle: &Vehicle, intent: &InputIntent, dt: f32, tuning: &Tuning) -> Vehicle {
    if !vehicle.is_flying() {
        return *vehicle;
    }

    let steps = dt / SIM_DT;
    let mut next = *vehicle;

    // Gravity always applies, thrusting or not
    next.vel.y += tuning.gravity * steps;

    if intent.thrust && next.fuel > 0.0 {
        next.thrust = tuning.thrust_power;
        let (sin, cos) = next.angle.sin_cos();
        next.vel.x += sin * next.thrust * steps;
        next.vel.y -= cos * next.thrust * steps;
        next.fuel = (next.fuel - tuning.fuel_burn * steps).max(0.0);
    } else {
        next.thrust = 0.0;
    }

    if intent.rotate_left {
        next.angle -= tuning.rotation_speed * steps;
    }
    if intent.rotate_right {
        next.angle += tuning.rotation_speed * steps;
    }

    next.pos += next.vel * steps;
    next.pos.x = wrap_horizontal(next.pos.x, tuning.world_width);

    next
}

/// Teleport to the opposite edge when leaving `[0, width]`
#[inline]
pub fn wrap_horizontal(x: f32, width: f32) -> f32 {
    if x < 0.0 {
        width
    } else if x > width {
        0.0
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::state::TerminalState;

    fn vehicle() -> Vehicle {
        Vehicle::spawn(&Tuning::default())
    }

    #[test]
    fn test_gravity_only() {
        let tuning = Tuning::default();
        let next = integrate(&vehicle(), &InputIntent::NONE, SIM_DT, &tuning);
        assert_eq!(next.vel, Vec2::new(0.0, 0.025));
        assert!((next.pos - Vec2::new(400.0, 100.025)).length() < 1e-4);
        assert_eq!(next.fuel, 150.0);
        assert_eq!(next.thrust, 0.0);
    }

    #[test]
    fn test_upright_thrust_counters_gravity() {
        let tuning = Tuning::default();
        let next = integrate(&vehicle(), &InputIntent::thrusting(), SIM_DT, &tuning);
        assert!((next.vel.y - (0.025 - 0.08)).abs() < 1e-6);
        assert!(next.vel.x.abs() < 1e-6);
        assert_eq!(next.fuel, 149.5);
        assert_eq!(next.thrust, 0.08);
    }

    #[test]
    fn test_tilted_thrust_pushes_sideways() {
        let tuning = Tuning::default();
        let mut tilted = vehicle();
        tilted.angle = std::f32::consts::FRAC_PI_2;
        let next = integrate(&tilted, &InputIntent::thrusting(), SIM_DT, &tuning);
        assert!((next.vel.x - 0.08).abs() < 1e-6);
        assert!((next.vel.y - 0.025).abs() < 1e-6);
    }

    #[test]
    fn test_no_fuel_no_thrust() {
        let tuning = Tuning::default();
        let mut empty = vehicle();
        empty.fuel = 0.0;
        let next = integrate(&empty, &InputIntent::thrusting(), SIM_DT, &tuning);
        assert_eq!(next.vel, Vec2::new(0.0, 0.025));
        assert_eq!(next.fuel, 0.0);
        assert_eq!(next.thrust, 0.0);
    }

    #[test]
    fn test_fuel_never_negative() {
        let tuning = Tuning::default();
        let mut low = vehicle();
        low.fuel = 0.2;
        let next = integrate(&low, &InputIntent::thrusting(), SIM_DT, &tuning);
        assert_eq!(next.fuel, 0.0);
    }

    #[test]
    fn test_rotation_unclamped() {
        let tuning = Tuning::default();
        let right = InputIntent {
            rotate_right: true,
            ..Default::default()
        };
        let mut v = vehicle();
        for _ in 0..200 {
            v = integrate(&v, &right, SIM_DT, &tuning);
        }
        assert!((v.angle - 10.0).abs() < 1e-3);

        let both = InputIntent {
            rotate_left: true,
            rotate_right: true,
            ..Default::default()
        };
        let next = integrate(&v, &both, SIM_DT, &tuning);
        assert!((next.angle - v.angle).abs() < 1e-5);
    }

    #[test]
    fn test_wraps_right_edge() {
        let tuning = Tuning::default();
        let mut v = vehicle();
        v.pos.x = 800.5;
        v.vel.x = 0.5;
        let next = integrate(&v, &InputIntent::NONE, SIM_DT, &tuning);
        assert_eq!(next.pos.x, 0.0);
        assert_eq!(next.vel.x, 0.5);
        assert_eq!(next.angle, v.angle);
    }

    #[test]
    fn test_wraps_left_edge() {
        let tuning = Tuning::default();
        let mut v = vehicle();
        v.pos.x = 0.5;
        v.vel.x = -1.5;
        v.angle = 0.3;
        let next = integrate(&v, &InputIntent::NONE, SIM_DT, &tuning);
        assert_eq!(next.pos.x, 800.0);
        assert_eq!(next.vel.x, -1.5);
        assert_eq!(next.angle, 0.3);
    }

    #[test]
    fn test_wrap_helper() {
        assert_eq!(wrap_horizontal(801.0, 800.0), 0.0);
        assert_eq!(wrap_horizontal(-1.0, 800.0), 800.0);
        assert_eq!(wrap_horizontal(800.0, 800.0), 800.0);
        assert_eq!(wrap_horizontal(0.0, 800.0), 0.0);
    }

    #[test]
    fn test_terminal_vehicle_is_frozen() {
        let tuning = Tuning::default();
        for terminal in [TerminalState::Landed, TerminalState::Crashed] {
            let mut v = vehicle();
            v.terminal = terminal;
            v.angle = 0.4;
            let next = integrate(&v, &InputIntent::thrusting(), SIM_DT, &tuning);
            assert_eq!(next, v);
        }
    }

    #[test]
    fn test_half_step_scales() {
        let tuning = Tuning::default();
        let next = integrate(&vehicle(), &InputIntent::thrusting(), SIM_DT * 0.5, &tuning);
        assert!((next.fuel - 149.75).abs() < 1e-4);
    }
}
