//! Guess scoring
//!
//! Pure partition of a selection against the answer key. No state.

use super::state::{AnswerKey, Item};
use crate::consts::PICK_COUNT;

/// Correct/wrong split of a selection, both halves in selection order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: Vec<Item>,
    pub wrong: Vec<Item>,
}

impl Evaluation {
    /// True when every one of the four answers was picked
    pub fn is_solved(&self) -> bool {
        self.correct.len() == PICK_COUNT
    }
}

/// Split `selection` into items in the key and items not in it
///
/// Accepts selections of any size.
pub fn evaluate(selection: &[Item], key: &AnswerKey) -> Evaluation {
    let (correct, wrong) = selection
        .iter()
        .cloned()
        .partition(|item| key.contains(item));
    Evaluation { correct, wrong }
}
