//! Fixed-timestep driver
//!
//! Hosts with a variable frame clock feed wall-clock deltas here; the world
//! only ever advances in whole `SIM_DT` steps.

use super::state::World;
use super::tick::{TickInput, tick};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Accumulates frame time and runs whole simulation steps
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
    /// Fire pressed on a frame that has not reached a step yet
    pending_fire: bool,
    /// Hyperspace pressed on a frame that has not reached a step yet
    pending_hyperspace: bool,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run as many steps as `frame_dt` pays for (capped at `MAX_SUBSTEPS`).
    ///
    /// Edge-triggered actions in `input` stay latched until a step runs and
    /// then apply to that step only. A press on a short frame waits for the
    /// next step; a slow frame never fires twice. Returns the number of steps
    /// taken.
    pub fn advance(&mut self, world: &mut World, frame_dt: f32, input: &TickInput) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.pending_fire |= input.fire;
        self.pending_hyperspace |= input.hyperspace;

        let held = input.held_only();
        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            let step_input = TickInput {
                fire: self.pending_fire,
                hyperspace: self.pending_hyperspace,
                ..held
            };
            tick(world, &step_input, SIM_DT);
            self.accumulator -= SIM_DT;
            steps += 1;

            // Clear one-shot inputs after processing
            self.pending_fire = false;
            self.pending_hyperspace = false;
        }
        if steps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::trace!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        steps
    }

    /// Fraction of a step left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}
