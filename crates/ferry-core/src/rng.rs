//! Randomness for the agents: arrival delays, crossing times, origin ports.
//!
//! Every agent owns a `SmallRng` derived from the run seed and its
//! [`AgentId`]:
//!
//! ```text
//! agent_seed = seed ^ (agent_id * 0x9e37_79b9_7f4a_7c15)
//! ```
//!
//! The multiplier (the golden ratio in 64-bit fixed point) scatters adjacent
//! ids across the seed space.  No generator is shared between threads, so a
//! draw never blocks and one agent's draws do not depend on another's.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Port};

const SEED_MULTIPLIER: u64 = 0x9e37_79b9_7f4a_7c15;

/// One agent's random source.  Moved into the agent's thread at spawn.
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        let agent_seed = run_seed ^ u64::from(agent.0).wrapping_mul(SEED_MULTIPLIER);
        Self(SmallRng::seed_from_u64(agent_seed))
    }

    /// A delay drawn uniformly from `[0, max_us]` microseconds.
    ///
    /// `max_us == 0` always yields `Duration::ZERO` without touching the RNG.
    pub fn delay_up_to(&mut self, max_us: u32) -> Duration {
        if max_us == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(self.0.gen_range(0..=max_us as u64))
    }

    /// Either port with equal probability.
    pub fn pick_port(&mut self) -> Port {
        if self.0.r#gen::<bool>() { Port::SECOND } else { Port::FIRST }
    }
}
