//! Deterministic simulation module
//!
//! All flight logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod physics;
pub mod snapshot;
pub mod state;
pub mod terrain;
pub mod tick;

pub use collision::{CollisionResult, classify, ground_contact, resolve};
pub use particles::{Particle, ParticlePool};
pub use physics::{integrate, wrap_horizontal};
pub use snapshot::SimulationSnapshot;
pub use state::{InputIntent, Session, Star, TerminalState, Vehicle};
pub use terrain::{TerrainError, TerrainProfile, generate as generate_terrain};
pub use tick::{TickEvent, tick};
