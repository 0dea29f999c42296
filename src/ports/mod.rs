//! Ports - boundary abstractions between the learning core and its
//! collaborators (environments and training observers).

pub mod environment;
pub mod observer;

pub use environment::{Environment, StepOutcome};
pub use observer::{EpisodeObserver, EpisodeStats};
