//! Round value types
//!
//! Items, the answer key, the live selection and the immutable guess record.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::PICK_COUNT;
use crate::error::PuzzleError;

/// A selectable candidate label from the day's pool
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(String);

impl Item {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Item {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Item {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Item {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// The four correct items for a round
///
/// Only queried through [`AnswerKey::contains`]; its contents never reach a
/// snapshot, and `Debug` prints the size only.
#[derive(Clone, PartialEq, Eq)]
pub struct AnswerKey {
    items: BTreeSet<Item>,
}

impl AnswerKey {
    /// Build a key from exactly [`PICK_COUNT`] distinct items
    pub fn new(items: impl IntoIterator<Item = Item>) -> Result<Self, PuzzleError> {
        let mut set = BTreeSet::new();
        let mut actual = 0;
        for item in items {
            actual += 1;
            if set.contains(&item) {
                return Err(PuzzleError::DuplicateAnswer(item));
            }
            set.insert(item);
        }
        if actual != PICK_COUNT {
            return Err(PuzzleError::AnswerKeySize {
                expected: PICK_COUNT,
                actual,
            });
        }
        Ok(Self { items: set })
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.items.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}

impl fmt::Debug for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnswerKey({} items)", self.items.len())
    }
}

/// Result of toggling one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// Already holding four items; the new one was ignored
    Full,
}

/// Currently chosen items, in the order they were picked (at most four)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    items: Vec<Item>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `item` if chosen, otherwise add it while there is room
    pub fn toggle(&mut self, item: &Item) -> Toggle {
        if let Some(pos) = self.items.iter().position(|i| i == item) {
            self.items.remove(pos);
            Toggle::Removed
        } else if self.items.len() < PICK_COUNT {
            self.items.push(item.clone());
            Toggle::Added
        } else {
            Toggle::Full
        }
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.items.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == PICK_COUNT
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Hand back the chosen items and leave the selection empty
    pub fn take(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// One submitted, evaluated selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    /// Items in submission order
    submitted: Vec<Item>,
    correct: Vec<Item>,
    wrong: Vec<Item>,
}

impl Guess {
    pub(crate) fn new(submitted: Vec<Item>, correct: Vec<Item>, wrong: Vec<Item>) -> Self {
        Self {
            submitted,
            correct,
            wrong,
        }
    }

    pub fn submitted(&self) -> &[Item] {
        &self.submitted
    }

    pub fn correct(&self) -> &[Item] {
        &self.correct
    }

    pub fn wrong(&self) -> &[Item] {
        &self.wrong
    }

    pub fn is_correct(&self, item: &Item) -> bool {
        self.correct.contains(item)
    }

    pub fn is_solved(&self) -> bool {
        self.correct.len() == PICK_COUNT
    }
}

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for puzzle data
    Loading,
    /// Accepting selections and submissions
    Playing,
    /// Outcome decided (terminal)
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Undetermined,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_determined(&self) -> bool {
        *self != Outcome::Undetermined
    }
}

/// Transient per-item marker shown right after a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemFeedback {
    Correct,
    Wrong,
    #[default]
    Neutral,
}

/// Status line shown above the item list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prompt {
    Intro { attempts: u32 },
    SelectFour,
    Tally { correct: usize, wrong: usize },
    Won,
    Lost,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::Intro { attempts } => write!(
                f,
                "YOU HAVE {attempts} GUESSES TO IDENTIFY THE FOUR ITEMS THAT ARE FOUND IN THIS."
            ),
            Prompt::SelectFour => f.write_str("PLEASE SELECT FOUR ITEMS."),
            Prompt::Tally { correct, wrong } => {
                write!(f, "There were {correct} correct and {wrong} wrong.")
            }
            Prompt::Won => f.write_str("Nice job!"),
            Prompt::Lost => f.write_str("You lost!"),
        }
    }
}

/// Side effects requested by the round, drained by the owning session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    /// Feedback for submission `stamp` is visible and should be cleared later
    FeedbackShown { stamp: u64 },
    /// Outcome was just decided
    Finished(Outcome),
    /// Fire the celebratory burst
    Celebrate,
}
