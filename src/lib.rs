//! Lunar Lander - a descending-vehicle simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, physics, touchdown, particles)
//! - `clock`: Fixed timestep driver that owns the session
//! - `tuning`: Data-driven physics constants
//!
//! Rendering and input capture live outside this crate. A frontend feeds
//! [`sim::InputIntent`] into the [`SimulationClock`] and draws the
//! [`sim::SimulationSnapshot`] it hands back.

pub mod clock;
pub mod sim;
pub mod tuning;

pub use clock::SimulationClock;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the rate the per-tick constants are tuned for)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest render frame the accumulator will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play area
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Per-tick kinematics (pixels/tick, radians/tick)
    pub const GRAVITY: f32 = 0.025;
    pub const THRUST_POWER: f32 = 0.08;
    pub const ROTATION_SPEED: f32 = 0.05;
    /// Fuel spent per tick of thrust
    pub const FUEL_BURN: f32 = 0.5;
    pub const INITIAL_FUEL: f32 = 150.0;

    /// Spawn pose
    pub const SPAWN_X: f32 = 400.0;
    pub const SPAWN_Y: f32 = 100.0;
    /// Distance from the vehicle centre to its landing feet
    pub const LANDER_HALF_HEIGHT: f32 = 10.0;

    /// Touchdown limits: anything at or above these is a crash
    pub const SAFE_VX: f32 = 1.0;
    pub const SAFE_VY: f32 = 1.0;
    pub const SAFE_ANGLE: f32 = 0.1;

    /// Terrain generation
    pub const TERRAIN_BASELINE: f32 = 500.0;
    pub const TERRAIN_MIN_Y: f32 = 400.0;
    pub const TERRAIN_MAX_Y: f32 = 550.0;
    pub const TERRAIN_MIN_STEP: f32 = 50.0;
    pub const TERRAIN_MAX_STEP: f32 = 100.0;
    pub const TERRAIN_MAX_DELTA: f32 = 50.0;
    pub const FLAT_SPOTS: usize = 4;
    /// Widest play area tuning accepts; f32 still resolves sub-pixel steps below this
    pub const MAX_WORLD_WIDTH: f32 = 1.0e6;
    /// Hard cap on generated profile length
    pub const MAX_TERRAIN_POINTS: usize = 1 << 16;

    /// Background
    pub const STAR_COUNT: usize = 100;
    pub const MAX_STAR_SIZE: f32 = 2.0;

    /// Thruster flame particles
    pub const MAX_PARTICLES: usize = 256;
    pub const PARTICLE_LIFE: u32 = 20;
    /// Distance from the vehicle centre to the engine nozzle
    pub const NOZZLE_OFFSET: f32 = 15.0;
}
