//! Daily puzzle data
//!
//! Delivered by an outside loader (network, file, bundled sample). The round
//! only starts once this validates.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;
use crate::game::{AnswerKey, Item};

/// One day's puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Calendar date (YYYY-MM-DD) the puzzle belongs to
    #[serde(default)]
    pub date: Option<String>,
    /// What the items are found in, e.g. "Coca-Cola"
    pub prompt: String,
    /// Candidate pool, in display order
    pub items: Vec<Item>,
    /// The four correct items
    pub answer: Vec<Item>,
}

impl Puzzle {
    /// Bundled puzzle used when no data file is supplied
    pub fn sample() -> Self {
        let items = [
            "Phosphoric acid",
            "Caffeine",
            "Caramel Color",
            "Citric Acid",
            "Sodium Benzoate",
            "Aspertame",
            "Acacia Gum",
            "Potassium Sorbate",
        ];
        let answer = [
            "Phosphoric acid",
            "Caffeine",
            "Caramel Color",
            "Sodium Benzoate",
        ];
        Self {
            date: None,
            prompt: "Coca-Cola".to_string(),
            items: items.into_iter().map(Item::from).collect(),
            answer: answer.into_iter().map(Item::from).collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, PuzzleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a puzzle from a JSON file
    pub fn load(path: &Path) -> Result<Self, PuzzleError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| PuzzleError::Malformed(format!("{}: {e}", path.display())))?;
        let puzzle = Self::from_json(&json)?;
        log::info!(
            "Loaded puzzle {:?} ({} items) from {}",
            puzzle.prompt,
            puzzle.items.len(),
            path.display()
        );
        Ok(puzzle)
    }

    /// Check the data is playable with `attempts` guesses
    pub fn validate(&self, attempts: u32) -> Result<AnswerKey, PuzzleError> {
        validate_puzzle(&self.items, &self.answer, attempts)
    }
}

/// Validate a pool/answer pair and build the answer key
///
/// Rejects an empty pool, blank or repeated labels, a key that is not four
/// distinct items, answers missing from the pool, and zero attempts.
pub fn validate_puzzle(
    pool: &[Item],
    answer: &[Item],
    attempts: u32,
) -> Result<AnswerKey, PuzzleError> {
    if pool.is_empty() {
        return Err(PuzzleError::EmptyPool);
    }
    if attempts == 0 {
        return Err(PuzzleError::NoAttempts);
    }

    let mut seen = HashSet::with_capacity(pool.len());
    for item in pool {
        if item.label().trim().is_empty() {
            return Err(PuzzleError::EmptyLabel);
        }
        if !seen.insert(item) {
            return Err(PuzzleError::DuplicateItem(item.clone()));
        }
    }

    let key = AnswerKey::new(answer.iter().cloned())?;
    if let Some(missing) = key.iter().find(|item| !seen.contains(item)) {
        return Err(PuzzleError::AnswerNotInPool(missing.clone()));
    }
    Ok(key)
}
