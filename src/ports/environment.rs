//! Environment port - abstraction over the emulator boundary.
//!
//! The learning core never inspects raw observations itself; it hands them
//! to a state encoder and works with the resulting keys. This port is the
//! full contract the episode driver needs from an emulator: reset, step,
//! and the size of the discrete action space.

use crate::Result;

/// Result of taking one environment step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Raw observation buffer after the step (RAM image).
    pub ram: Vec<u8>,
    /// Reward accrued by the step.
    pub reward: f64,
    /// Whether the episode ended on this step.
    pub terminal: bool,
}

/// Environment trait - emulator-side contract consumed by the episode driver
///
/// Implementations produce raw observation buffers and consume discrete
/// action indices in `[0, action_count)`.
pub trait Environment: Send {
    /// Start a new episode and return the initial observation.
    fn reset(&mut self) -> Result<Vec<u8>>;

    /// Apply an action and advance the environment by one step.
    ///
    /// # Errors
    ///
    /// Returns an error if `action` is outside the action space.
    fn step(&mut self, action: usize) -> Result<StepOutcome>;

    /// Size of the fixed discrete action space.
    fn action_count(&self) -> usize;
}
