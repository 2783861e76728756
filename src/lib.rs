//! Alchemiz.ing - daily four-ingredient deduction puzzle
//!
//! Core modules:
//! - `game`: Round state machine, guess scoring, share text
//! - `effects`: Timed confetti burst planning and dispatch
//! - `timeline`: Cooperative timers with group cancellation
//! - `session`: Single owner tying a round to its timers and emitter
//! - `puzzle`: Daily puzzle data and validation
//! - `settings`: Data-driven configuration

pub mod effects;
pub mod error;
pub mod game;
pub mod puzzle;
pub mod session;
pub mod settings;
pub mod timeline;

pub use error::{ConfigError, EmitError, PuzzleError, RoundError};
pub use puzzle::Puzzle;
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Items in the answer key, and in every valid submission
    pub const PICK_COUNT: usize = 4;
    /// Guesses per round unless configured otherwise
    pub const DEFAULT_ATTEMPTS: u32 = 3;
    /// Per-item feedback display window
    pub const FEEDBACK_CLEAR_MS: u64 = 1000;
}
