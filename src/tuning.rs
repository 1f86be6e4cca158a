//! Data-driven physics tuning
//!
//! Every constant the simulation reads comes through [`Tuning`]. The default
//! reproduces the classic game; a JSON file can override any subset of fields.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Velocity and attitude limits for a safe touchdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingLimits {
    /// Horizontal speed must stay strictly below this
    pub max_vx: f32,
    /// Vertical speed must stay strictly below this
    pub max_vy: f32,
    /// Tilt (radians, either direction) must stay strictly below this
    pub max_angle: f32,
}

impl Default for LandingLimits {
    fn default() -> Self {
        Self {
            max_vx: SAFE_VX,
            max_vy: SAFE_VY,
            max_angle: SAFE_ANGLE,
        }
    }
}

/// Terrain generator parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainTuning {
    /// Height of the first terrain point
    pub baseline: f32,
    /// Highest ground allowed (smallest y, screen coordinates grow down)
    pub min_y: f32,
    /// Lowest ground allowed
    pub max_y: f32,
    /// Horizontal step range `[min_step, max_step)`
    pub min_step: f32,
    pub max_step: f32,
    /// Vertical perturbation range `[-max_delta, max_delta)`
    pub max_delta: f32,
    /// Number of landing pads to flatten (reduced when the profile is too short)
    pub flat_spots: usize,
}

impl Default for TerrainTuning {
    fn default() -> Self {
        Self {
            baseline: TERRAIN_BASELINE,
            min_y: TERRAIN_MIN_Y,
            max_y: TERRAIN_MAX_Y,
            min_step: TERRAIN_MIN_STEP,
            max_step: TERRAIN_MAX_STEP,
            max_delta: TERRAIN_MAX_DELTA,
            flat_spots: FLAT_SPOTS,
        }
    }
}

/// Complete simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Kinematics (per 60 Hz tick) ===
    pub gravity: f32,
    pub thrust_power: f32,
    pub rotation_speed: f32,
    pub fuel_burn: f32,

    // === Vehicle ===
    pub initial_fuel: f32,
    pub spawn: Vec2,
    pub half_height: f32,
    pub landing: LandingLimits,

    // === Terrain ===
    pub terrain: TerrainTuning,

    // === Presentation data ===
    pub star_count: usize,
    pub max_star_size: f32,
    pub particle_life: u32,
    pub nozzle_offset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            gravity: GRAVITY,
            thrust_power: THRUST_POWER,
            rotation_speed: ROTATION_SPEED,
            fuel_burn: FUEL_BURN,

            initial_fuel: INITIAL_FUEL,
            spawn: Vec2::new(SPAWN_X, SPAWN_Y),
            half_height: LANDER_HALF_HEIGHT,
            landing: LandingLimits::default(),

            terrain: TerrainTuning::default(),

            star_count: STAR_COUNT,
            max_star_size: MAX_STAR_SIZE,
            particle_life: PARTICLE_LIFE,
            nozzle_offset: NOZZLE_OFFSET,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for writing a starter config)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let finite = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("gravity", self.gravity),
            ("thrust_power", self.thrust_power),
            ("rotation_speed", self.rotation_speed),
            ("fuel_burn", self.fuel_burn),
            ("initial_fuel", self.initial_fuel),
            ("spawn.x", self.spawn.x),
            ("spawn.y", self.spawn.y),
            ("half_height", self.half_height),
            ("landing.max_vx", self.landing.max_vx),
            ("landing.max_vy", self.landing.max_vy),
            ("landing.max_angle", self.landing.max_angle),
            ("terrain.baseline", self.terrain.baseline),
            ("terrain.min_y", self.terrain.min_y),
            ("terrain.max_y", self.terrain.max_y),
            ("terrain.min_step", self.terrain.min_step),
            ("terrain.max_step", self.terrain.max_step),
            ("terrain.max_delta", self.terrain.max_delta),
            ("max_star_size", self.max_star_size),
            ("nozzle_offset", self.nozzle_offset),
        ];
        if let Some((field, _)) = finite.into_iter().find(|(_, v)| !v.is_finite()) {
            return invalid(field, "must be finite");
        }

        if self.world_width <= 0.0 || self.world_width > MAX_WORLD_WIDTH {
            return invalid("world_width", "must be positive and at most 1e6");
        }
        if self.world_height <= 0.0 {
            return invalid("world_height", "must be positive");
        }
        if self.initial_fuel < 0.0 {
            return invalid("initial_fuel", "must not be negative");
        }
        if self.fuel_burn < 0.0 {
            return invalid("fuel_burn", "must not be negative");
        }
        if self.half_height < 0.0 {
            return invalid("half_height", "must not be negative");
        }

        let terrain = &self.terrain;
        if terrain.min_step <= 0.0 {
            return invalid("terrain.min_step", "must be positive");
        }
        if terrain.max_step < terrain.min_step {
            return invalid("terrain.max_step", "must be at least terrain.min_step");
        }
        if self.world_width / terrain.min_step > MAX_TERRAIN_POINTS as f32 {
            return invalid("terrain.min_step", "too small for world_width");
        }
        if terrain.max_y < terrain.min_y {
            return invalid("terrain.max_y", "must be at least terrain.min_y");
        }
        if terrain.max_delta < 0.0 {
            return invalid("terrain.max_delta", "must not be negative");
        }

        Ok(())
    }
}
