//! Session state and core simulation types
//!
//! Everything a session owns lives in [`Session`]; there is no module-level
//! mutable state anywhere in the crate.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::ParticlePool;
use super::snapshot::SimulationSnapshot;
use super::terrain::{self, TerrainError, TerrainProfile};
use crate::tuning::Tuning;

/// Terminal state of the vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TerminalState {
    /// Still in the air; the only non-terminal value
    #[default]
    Flying,
    /// Soft, level, slow touchdown
    Landed,
    /// Any other ground contact
    Crashed,
}

impl TerminalState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        *self != TerminalState::Flying
    }

    /// Overlay text for the end-of-flight banner
    pub fn message(&self) -> Option<&'static str> {
        match self {
            TerminalState::Flying => None,
            TerminalState::Landed => Some("Landed Safely!"),
            TerminalState::Crashed => Some("Crashed!"),
        }
    }
}

/// Pilot controls for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntent {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl InputIntent {
    pub const NONE: Self = Self {
        thrust: false,
        rotate_left: false,
        rotate_right: false,
    };

    pub const fn thrusting() -> Self {
        Self {
            thrust: true,
            rotate_left: false,
            rotate_right: false,
        }
    }
}

/// The lander
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    /// Radians, 0 = upright, positive = clockwise. Never normalized.
    pub angle: f32,
    /// Thrust applied on the last tick (0 or the tuned thrust power)
    pub thrust: f32,
    pub fuel: f32,
    pub terminal: TerminalState,
}

impl Vehicle {
    /// Fresh vehicle at the tuned spawn pose
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.spawn,
            vel: Vec2::ZERO,
            angle: 0.0,
            thrust: 0.0,
            fuel: tuning.initial_fuel,
            terminal: TerminalState::Flying,
        }
    }

    #[inline]
    pub fn is_flying(&self) -> bool {
        !self.terminal.is_terminal()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Engine nozzle position (where flame particles are emitted)
    pub fn nozzle(&self, offset: f32) -> Vec2 {
        let (sin, cos) = self.angle.sin_cos();
        Vec2::new(self.pos.x - sin * offset, self.pos.y + cos * offset)
    }
}

/// A background star
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
}

/// Scatter the static starfield across the play area
pub fn generate_stars<R: Rng>(rng: &mut R, tuning: &Tuning) -> Vec<Star> {
    (0..tuning.star_count)
        .map(|_| Star {
            pos: Vec2::new(
                rng.random::<f32>() * tuning.world_width,
                rng.random::<f32>() * tuning.world_height,
            ),
            size: rng.random::<f32>() * tuning.max_star_size,
        })
        .collect()
}

/// Everything one play session owns
#[derive(Debug, Clone)]
pub struct Session {
    /// Seed the session was built from
    pub seed: u64,
    pub tuning: Tuning,
    pub vehicle: Vehicle,
    pub terrain: TerrainProfile,
    pub stars: Vec<Star>,
    pub particles: ParticlePool,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
}

impl Session {
    /// Build a session with generated terrain
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let terrain = terrain::generate_with(&mut rng, tuning.world_width, &tuning.terrain);
        Self::assemble(seed, tuning, terrain, rng)
    }

    /// Build a session over caller-supplied terrain.
    ///
    /// The terrain must have ground under the whole play area.
    pub fn with_terrain(
        seed: u64,
        tuning: Tuning,
        terrain: TerrainProfile,
    ) -> Result<Self, TerrainError> {
        terrain.covers(tuning.world_width)?;
        let rng = Pcg32::seed_from_u64(seed);
        Ok(Self::assemble(seed, tuning, terrain, rng))
    }

    fn assemble(seed: u64, tuning: Tuning, terrain: TerrainProfile, mut rng: Pcg32) -> Self {
        let stars = generate_stars(&mut rng, &tuning);
        log::info!(
            "Session {} ready: {} terrain points, {} stars",
            seed,
            terrain.len(),
            stars.len()
        );
        Self {
            seed,
            vehicle: Vehicle::spawn(&tuning),
            terrain,
            stars,
            particles: ParticlePool::new(),
            time_ticks: 0,
            tuning,
            rng,
        }
    }

    /// Emit one flame particle from the engine nozzle.
    ///
    /// Draws from the session RNG, which has already produced terrain and stars.
    pub fn emit_exhaust(&mut self) -> Option<usize> {
        let origin = self.vehicle.nozzle(self.tuning.nozzle_offset);
        self.particles
            .emit_exhaust(&mut self.rng, origin, self.tuning.particle_life)
    }

    /// Read-only projection for the presentation layer
    pub fn snapshot(&self) -> SimulationSnapshot<'_> {
        SimulationSnapshot::new(self)
    }
}
