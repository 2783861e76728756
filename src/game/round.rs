//! Round state machine
//!
//! Owns the selection, attempt counter, guess history and outcome for one
//! day's puzzle. Every command applies in full or not at all; side effects
//! that need timers (feedback clearing, celebration) are queued as
//! [`RoundEvent`]s for the owning session to drain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::evaluate::evaluate;
use super::state::{
    AnswerKey, Guess, Item, ItemFeedback, Outcome, Phase, Prompt, RoundEvent, Selection, Toggle,
};
use crate::error::RoundError;
use crate::puzzle::validate_puzzle;

/// Options for [`Round::submit`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitOptions {
    /// Debug bypass: win immediately without looking at the selection
    pub auto_win: bool,
}

/// What a submission did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Fewer than four items selected; selection cleared, no attempt used
    Rejected { selected: usize },
    /// Scored but not solved, attempts remain
    Incorrect {
        correct: usize,
        wrong: usize,
        attempts_remaining: u32,
    },
    Won,
    Lost,
}

/// Read-only view of a round for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub phase: Phase,
    pub pool: Vec<Item>,
    pub selection: Vec<Item>,
    pub attempts_allowed: u32,
    pub attempts_remaining: u32,
    pub history: Vec<Guess>,
    pub outcome: Outcome,
    pub feedback: BTreeMap<Item, ItemFeedback>,
    pub prompt: Prompt,
    /// Bumped whenever a prompt is (re)issued so repeats can re-flash
    pub prompt_serial: u64,
}

/// One play-through of a single puzzle
#[derive(Debug, Clone)]
pub struct Round {
    phase: Phase,
    pool: Vec<Item>,
    answer_key: Option<AnswerKey>,
    selection: Selection,
    attempts_allowed: u32,
    attempts_remaining: u32,
    history: Vec<Guess>,
    outcome: Outcome,
    feedback: BTreeMap<Item, ItemFeedback>,
    /// Identifies the submission that produced the current feedback
    feedback_stamp: u64,
    prompt: Prompt,
    prompt_serial: u64,
    events: Vec<RoundEvent>,
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

impl Round {
    /// A round waiting for puzzle data
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            pool: Vec::new(),
            answer_key: None,
            selection: Selection::new(),
            attempts_allowed: 0,
            attempts_remaining: 0,
            history: Vec::new(),
            outcome: Outcome::Undetermined,
            feedback: BTreeMap::new(),
            feedback_stamp: 0,
            prompt: Prompt::Intro { attempts: 0 },
            prompt_serial: 0,
            events: Vec::new(),
        }
    }

    /// Supply the day's pool and answers; moves `Loading` to `Playing`
    ///
    /// Invalid data leaves the round in `Loading`.
    pub fn initialize(
        &mut self,
        pool: Vec<Item>,
        answer: Vec<Item>,
        attempts_allowed: u32,
    ) -> Result<(), RoundError> {
        if self.phase != Phase::Loading {
            return Err(RoundError::AlreadyInitialized);
        }
        let key = validate_puzzle(&pool, &answer, attempts_allowed)?;

        self.pool = pool;
        self.answer_key = Some(key);
        self.attempts_allowed = attempts_allowed;
        self.attempts_remaining = attempts_allowed;
        self.prompt = Prompt::Intro {
            attempts: attempts_allowed,
        };
        self.phase = Phase::Playing;
        log::info!(
            "Round started: {} items, {} attempts",
            self.pool.len(),
            attempts_allowed
        );
        Ok(())
    }

    /// Discard everything and wait for new puzzle data
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Add or remove one item from the selection
    pub fn toggle_selection(&mut self, item: &Item) -> Result<Toggle, RoundError> {
        self.ensure_playing()?;
        if !self.pool.contains(item) {
            return Err(RoundError::UnknownItem(item.clone()));
        }

        let toggle = self.selection.toggle(item);
        if toggle == Toggle::Full {
            log::debug!("Ignoring {item}: already holding four items");
        }
        Ok(toggle)
    }

    /// Score the current selection
    pub fn submit(&mut self, options: SubmitOptions) -> Result<Submission, RoundError> {
        self.ensure_playing()?;

        if options.auto_win {
            log::info!("Auto-win requested");
            self.finish(Outcome::Won);
            return Ok(Submission::Won);
        }

        if !self.selection.is_full() {
            let selected = self.selection.len();
            self.selection.clear();
            self.set_prompt(Prompt::SelectFour);
            return Ok(Submission::Rejected { selected });
        }

        let Some(key) = self.answer_key.as_ref() else {
            return Err(RoundError::NotPlaying(self.phase));
        };
        let submitted = self.selection.take();
        let eval = evaluate(&submitted, key);
        let solved = eval.is_solved();
        let (correct, wrong) = (eval.correct.len(), eval.wrong.len());
        log::debug!(
            "Guess {}: {correct} correct, {wrong} wrong",
            self.history.len() + 1
        );

        self.feedback = eval
            .correct
            .iter()
            .map(|item| (item.clone(), ItemFeedback::Correct))
            .chain(eval.wrong.iter().map(|item| (item.clone(), ItemFeedback::Wrong)))
            .collect();
        self.feedback_stamp += 1;
        self.events.push(RoundEvent::FeedbackShown {
            stamp: self.feedback_stamp,
        });
        self.history
            .push(Guess::new(submitted, eval.correct, eval.wrong));

        if solved {
            self.finish(Outcome::Won);
            return Ok(Submission::Won);
        }

        // Loss is decided on the count before this attempt is spent
        let before = self.attempts_remaining;
        self.attempts_remaining = before.saturating_sub(1);
        self.set_prompt(Prompt::Tally { correct, wrong });

        if before == 1 {
            self.finish(Outcome::Lost);
            return Ok(Submission::Lost);
        }

        Ok(Submission::Incorrect {
            correct,
            wrong,
            attempts_remaining: self.attempts_remaining,
        })
    }

    /// Drop per-item feedback if it still belongs to submission `stamp`
    pub fn clear_feedback(&mut self, stamp: u64) -> bool {
        if stamp != self.feedback_stamp || self.feedback.is_empty() {
            return false;
        }
        self.feedback.clear();
        true
    }

    /// Take the side effects queued since the last drain
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            pool: self.pool.clone(),
            selection: self.selection.items().to_vec(),
            attempts_allowed: self.attempts_allowed,
            attempts_remaining: self.attempts_remaining,
            history: self.history.clone(),
            outcome: self.outcome,
            feedback: self.feedback.clone(),
            prompt: self.prompt,
            prompt_serial: self.prompt_serial,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn pool(&self) -> &[Item] {
        &self.pool
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn attempts_allowed(&self) -> u32 {
        self.attempts_allowed
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    pub fn history(&self) -> &[Guess] {
        &self.history
    }

    pub fn feedback_for(&self, item: &Item) -> ItemFeedback {
        self.feedback.get(item).copied().unwrap_or_default()
    }

    pub fn prompt(&self) -> Prompt {
        self.prompt
    }

    pub fn prompt_serial(&self) -> u64 {
        self.prompt_serial
    }

    fn ensure_playing(&self) -> Result<(), RoundError> {
        match self.phase {
            Phase::Playing => Ok(()),
            Phase::Over => Err(RoundError::RoundOver),
            Phase::Loading => Err(RoundError::NotPlaying(self.phase)),
        }
    }

    fn set_prompt(&mut self, prompt: Prompt) {
        self.prompt = prompt;
        self.prompt_serial += 1;
    }

    /// Decide the outcome; only ever runs once per round
    fn finish(&mut self, outcome: Outcome) {
        debug_assert!(!self.outcome.is_determined());
        self.outcome = outcome;
        self.phase = Phase::Over;
        self.selection.clear();
        self.feedback.clear();
        self.set_prompt(match outcome {
            Outcome::Won => Prompt::Won,
            _ => Prompt::Lost,
        });
        self.events.push(RoundEvent::Finished(outcome));
        if outcome == Outcome::Won {
            self.events.push(RoundEvent::Celebrate);
        }
        log::info!(
            "Round over: {:?} after {} guesses",
            outcome,
            self.history.len()
        );
    }
}
