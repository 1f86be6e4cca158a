//! Thruster flame particles
//!
//! A fixed slot pool: spawning reuses dead slots, nothing is allocated after
//! construction. Particles are visual only and never feed back into physics.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_PARTICLES;

/// A single flame particle. `life == 0` marks a free slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Fade factor for rendering (1 = fresh, 0 = expired)
    pub fn alpha(&self, max_life: u32) -> f32 {
        if max_life == 0 {
            0.0
        } else {
            (self.life as f32 / max_life as f32).min(1.0)
        }
    }
}

/// Fixed-capacity particle arena indexed by slot
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    live: usize,
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::with_capacity(MAX_PARTICLES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Particle::default(); capacity],
            live: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live particles
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Place a particle in the first free slot. Dropped when the pool is full.
    pub fn spawn(&mut self, particle: Particle) -> Option<usize> {
        if !particle.is_alive() {
            return None;
        }
        let slot = self.slots.iter().position(|p| !p.is_alive())?;
        self.slots[slot] = particle;
        self.live += 1;
        Some(slot)
    }

    /// Emit one exhaust particle at `origin` with a randomized downward drift
    pub fn emit_exhaust<R: Rng>(&mut self, rng: &mut R, origin: Vec2, life: u32) -> Option<usize> {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0,
            rng.random::<f32>() * 2.0 + 1.0,
        );
        self.spawn(Particle {
            pos: origin,
            vel,
            life,
        })
    }

    /// Move every live particle and age it by one tick
    pub fn update(&mut self, steps: f32) {
        for p in self.slots.iter_mut().filter(|p| p.is_alive()) {
            p.pos += p.vel * steps;
            p.life -= 1;
            if p.life == 0 {
                self.live -= 1;
            }
        }
    }

    /// Live particles in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().filter(|p| p.is_alive())
    }

    pub fn get(&self, slot: usize) -> Option<&Particle> {
        self.slots.get(slot).filter(|p| p.is_alive())
    }

    pub fn clear(&mut self) {
        self.slots.fill(Particle::default());
        self.live = 0;
    }
}
