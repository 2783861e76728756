//! Round logic
//!
//! Everything here is synchronous and free of timers or rendering:
//! - `state`: items, answer key, selection, guesses
//! - `evaluate`: scoring a selection
//! - `round`: the Loading/Playing/Over state machine
//! - `results`: share text and per-attempt breakdowns

pub mod evaluate;
pub mod results;
pub mod round;
pub mod state;

pub use evaluate::{Evaluation, evaluate};
pub use results::{AttemptBreakdown, detailed_view, emoji_line, share_header, shareable_text};
pub use round::{Round, RoundSnapshot, SubmitOptions, Submission};
pub use state::{
    AnswerKey, Guess, Item, ItemFeedback, Outcome, Phase, Prompt, RoundEvent, Selection, Toggle,
};
