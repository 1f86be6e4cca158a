//! Fixed timestep driver
//!
//! The frontend calls [`SimulationClock::advance`] once per rendered frame
//! with however much wall time passed. The clock turns that into whole
//! `SIM_DT` ticks so physics never depends on the display refresh rate.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{
    InputIntent, Session, SimulationSnapshot, TerrainError, TerrainProfile, TickEvent, Vehicle, tick,
};
use crate::tuning::Tuning;

/// Owns the session and the frame-time accumulator
#[derive(Debug, Clone)]
pub struct SimulationClock {
    session: Session,
    accumulator: f32,
}

impl SimulationClock {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::from_session(Session::new(seed, tuning))
    }

    /// Start from a prepared session (custom terrain, tests)
    pub fn from_session(session: Session) -> Self {
        Self {
            session,
            accumulator: 0.0,
        }
    }

    /// Session over caller-supplied terrain
    pub fn with_terrain(
        seed: u64,
        tuning: Tuning,
        terrain: TerrainProfile,
    ) -> Result<Self, TerrainError> {
        let session = Session::with_terrain(seed, tuning, terrain)?;
        Ok(Self::from_session(session))
    }

    /// Throw the whole session away and build a fresh one
    pub fn reset(&mut self, seed: u64) {
        let tuning = self.session.tuning.clone();
        self.session = Session::new(seed, tuning);
        self.accumulator = 0.0;
        log::info!("Session reset with seed {}", seed);
    }

    /// Run exactly one fixed tick
    pub fn tick(&mut self, input: &InputIntent) -> Option<TickEvent> {
        let event = tick(&mut self.session, input, SIM_DT);
        if let Some(TickEvent::Touchdown(state)) = event {
            let v = &self.session.vehicle;
            log::info!(
                "Touchdown at tick {}: {:?} at x={:.1} (fuel {:.1})",
                self.session.time_ticks,
                state,
                v.pos.x,
                v.fuel
            );
        }
        event
    }

    /// Feed one render frame's elapsed time.
    ///
    /// Returns how many ticks ran and the first event among them.
    /// `input` is held for every tick run this frame. Backlog beyond
    /// `MAX_SUBSTEPS` ticks is dropped.
    pub fn advance(&mut self, frame_dt: f32, input: &InputIntent) -> (u32, Option<TickEvent>) {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut substeps = 0;
        let mut event = None;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            event = event.or(self.tick(input));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if self.accumulator >= SIM_DT {
            log::warn!(
                "Simulation fell behind; dropping {:.3}s of backlog",
                self.accumulator
            );
            self.accumulator %= SIM_DT;
        }

        (substeps, event)
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }

    pub fn snapshot(&self) -> SimulationSnapshot<'_> {
        self.session.snapshot()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.session.vehicle
    }

    pub fn tuning(&self) -> &Tuning {
        &self.session.tuning
    }
}
