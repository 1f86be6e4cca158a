//! Read-only view handed to the presentation layer

use glam::Vec2;

use super::particles::{Particle, ParticlePool};
use super::state::{Session, Star, TerminalState};
use super::terrain::TerrainProfile;

/// Per-tick projection of the session. Borrowed, so it cannot outlive or
/// mutate the state it was taken from.
#[derive(Debug, Clone, Copy)]
pub struct SimulationSnapshot<'a> {
    pub tick: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub thrust: f32,
    pub fuel: f32,
    /// Magnitude of the velocity vector
    pub speed: f32,
    pub terminal: TerminalState,
    pub terrain: &'a TerrainProfile,
    pub stars: &'a [Star],
    particles: &'a ParticlePool,
    particle_life: u32,
}

impl<'a> SimulationSnapshot<'a> {
    pub fn new(session: &'a Session) -> Self {
        let vehicle = &session.vehicle;
        Self {
            tick: session.time_ticks,
            position: vehicle.pos,
            velocity: vehicle.vel,
            angle: vehicle.angle,
            thrust: vehicle.thrust,
            fuel: vehicle.fuel,
            speed: vehicle.speed(),
            terminal: vehicle.terminal,
            terrain: &session.terrain,
            stars: &session.stars,
            particles: &session.particles,
            particle_life: session.tuning.particle_life,
        }
    }

    /// Live flame particles
    pub fn particles(&self) -> impl Iterator<Item = &'a Particle> + 'a {
        let pool: &'a ParticlePool = self.particles;
        pool.iter()
    }

    /// Fade factor for a particle from this snapshot
    pub fn particle_alpha(&self, particle: &Particle) -> f32 {
        particle.alpha(self.particle_life)
    }

    /// Whole fuel units, as the HUD shows them
    pub fn fuel_readout(&self) -> u32 {
        self.fuel.max(0.0).floor() as u32
    }

    /// Whole speed units, as the HUD shows them
    pub fn speed_readout(&self) -> u32 {
        self.speed.floor() as u32
    }

    /// Overlay text once the flight is over
    pub fn status_message(&self) -> Option<&'static str> {
        self.terminal.message()
    }

    pub fn is_over(&self) -> bool {
        self.terminal.is_terminal()
    }
}
