//! Celebration effects
//!
//! Plans timed confetti bursts; actual drawing belongs to whatever
//! implements [`Emitter`]. Nothing here can affect round state.

pub mod burst;
pub mod curve;
pub mod scheduler;

pub use burst::{BurstConfig, Direction, EmissionRequest, Shape};
pub use curve::Range;
pub use scheduler::{BurstHandle, Emitter, ScheduledEmission, cancel, dispatch, plan, schedule};
