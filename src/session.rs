//! Round session
//!
//! Single owner of one day's play: the round, its timers and the particle
//! emitter. Presentation code calls the command methods and reads
//! [`Session::snapshot`]; a frame loop calls [`Session::advance`] with the
//! elapsed time so feedback clears and confetti emissions go out.
//!
//! Timer ownership:
//! - feedback clears live in one group per round, voided when the round ends
//!   or is reset
//! - each celebration gets its own group, voided by
//!   [`Session::cancel_celebrations`] or [`Session::reset`]

use crate::effects::{self, BurstHandle, EmissionRequest, Emitter};
use crate::error::RoundError;
use crate::game::results::transcript;
use crate::game::{
    AttemptBreakdown, Item, Round, RoundEvent, RoundSnapshot, SubmitOptions, Submission, Toggle,
    detailed_view,
};
use crate::puzzle::Puzzle;
use crate::settings::Settings;
use crate::timeline::{Timeline, TimerGroup};

/// Work waiting on the session timeline
#[derive(Debug, Clone, PartialEq)]
pub enum TimerAction {
    /// Hide per-item markers from submission `stamp`
    ClearFeedback { stamp: u64 },
    Emit(EmissionRequest),
}

impl From<EmissionRequest> for TimerAction {
    fn from(request: EmissionRequest) -> Self {
        TimerAction::Emit(request)
    }
}

pub struct Session<E: Emitter> {
    settings: Settings,
    round: Round,
    timeline: Timeline<TimerAction>,
    emitter: E,
    feedback_group: TimerGroup,
    bursts: Vec<BurstHandle>,
    /// Prompt text of the loaded puzzle ("Coca-Cola")
    subject: Option<String>,
    /// Signed-in user id, supplied by the auth collaborator
    user: Option<String>,
}

impl<E: Emitter> Session<E> {
    pub fn new(settings: Settings, emitter: E) -> Self {
        let mut timeline = Timeline::new();
        let feedback_group = timeline.open_group();
        Self {
            settings,
            round: Round::new(),
            timeline,
            emitter,
            feedback_group,
            bursts: Vec::new(),
            subject: None,
            user: None,
        }
    }

    /// Start the round with the day's puzzle
    ///
    /// On error the session stays in `Loading`; retrying is up to the loader.
    pub fn initialize(&mut self, puzzle: Puzzle) -> Result<(), RoundError> {
        let Puzzle {
            prompt,
            items,
            answer,
            date,
        } = puzzle;
        if let Err(err) = self
            .round
            .initialize(items, answer, self.settings.attempts_allowed)
        {
            log::warn!("Puzzle rejected: {err}");
            return Err(err);
        }
        log::info!(
            "Puzzle ready: {prompt} ({})",
            date.as_deref().unwrap_or("undated")
        );
        self.subject = Some(prompt);
        Ok(())
    }

    pub fn toggle_selection(&mut self, item: &Item) -> Result<Toggle, RoundError> {
        let toggle = self.round.toggle_selection(item)?;
        self.process_events();
        Ok(toggle)
    }

    pub fn submit(&mut self, options: SubmitOptions) -> Result<Submission, RoundError> {
        let submission = self.round.submit(options)?;
        self.process_events();
        Ok(submission)
    }

    /// Schedule the configured celebration burst
    pub fn trigger_celebration(&mut self) -> BurstHandle {
        let handle = effects::schedule(&mut self.timeline, &self.settings.celebration);
        self.bursts.push(handle);
        handle
    }

    /// Void every pending emission from every burst; returns how many
    pub fn cancel_celebrations(&mut self) -> usize {
        let timeline = &mut self.timeline;
        self.bursts
            .drain(..)
            .map(|handle| effects::cancel(timeline, handle))
            .sum()
    }

    /// Move the clock forward, applying whatever came due
    ///
    /// Returns the number of emissions the emitter accepted.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        let mut dispatched = 0;
        for fired in self.timeline.advance(elapsed_ms) {
            match fired.payload {
                TimerAction::ClearFeedback { stamp } => {
                    self.round.clear_feedback(stamp);
                }
                TimerAction::Emit(request) => {
                    if effects::dispatch(&mut self.emitter, &request) {
                        dispatched += 1;
                    }
                }
            }
        }

        let timeline = &self.timeline;
        self.bursts
            .retain(|handle| timeline.pending_in(handle.group()) > 0);
        dispatched
    }

    /// Drop the round and every pending timer; back to `Loading`
    pub fn reset(&mut self) {
        let dropped = self.timeline.cancel_all();
        self.bursts.clear();
        self.round.reset();
        self.subject = None;
        self.feedback_group = self.timeline.open_group();
        log::info!("Session reset ({dropped} pending timers dropped)");
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        self.round.snapshot()
    }

    /// Clipboard text for the guesses so far
    pub fn share_text(&self) -> String {
        transcript(self.round.history(), &self.settings.site_name)
    }

    pub fn detailed_view(&self) -> impl Iterator<Item = AttemptBreakdown<'_>> + Clone {
        detailed_view(self.round.history())
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut E {
        &mut self.emitter
    }

    /// Celebration bursts with emissions still pending
    pub fn active_bursts(&self) -> usize {
        self.bursts.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timeline.pending()
    }

    /// Time until the next pending timer, if any
    pub fn until_next_timer_ms(&self) -> Option<u64> {
        let now = self.timeline.now_ms();
        self.timeline
            .next_due_ms()
            .map(|due| due.saturating_sub(now))
    }

    pub fn set_user(&mut self, user: Option<String>) {
        self.user = user;
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    fn process_events(&mut self) {
        for event in self.round.drain_events() {
            match event {
                RoundEvent::FeedbackShown { stamp } => {
                    self.timeline.schedule(
                        self.feedback_group,
                        self.settings.feedback_clear_ms,
                        TimerAction::ClearFeedback { stamp },
                    );
                }
                RoundEvent::Finished(_) => {
                    self.timeline.cancel_group(self.feedback_group);
                }
                RoundEvent::Celebrate => {
                    self.trigger_celebration();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::BurstConfig;
    use crate::error::EmitError;
    use crate::game::{ItemFeedback, Outcome, Phase};

    #[derive(Default)]
    struct Recorder {
        requests: Vec<EmissionRequest>,
        broken: bool,
    }

    impl Emitter for Recorder {
        fn emit(&mut self, request: &EmissionRequest) -> Result<(), EmitError> {
            if self.broken {
                return Err(EmitError::Unavailable);
            }
            self.requests.push(request.clone());
            Ok(())
        }
    }

    fn settings() -> Settings {
        Settings {
            celebration: BurstConfig {
                steps: 4,
                total_duration_ms: 8,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn session() -> Session<Recorder> {
        let mut session = Session::new(settings(), Recorder::default());
        session.initialize(Puzzle::sample()).unwrap();
        session
    }

    fn pick(session: &mut Session<Recorder>, labels: &[&str]) {
        for label in labels {
            session.toggle_selection(&Item::from(*label)).unwrap();
        }
    }

    const CORRECT: [&str; 4] = [
        "Phosphoric acid",
        "Caffeine",
        "Caramel Color",
        "Sodium Benzoate",
    ];
    const WRONG: [&str; 4] = [
        "Citric Acid",
        "Aspertame",
        "Acacia Gum",
        "Potassium Sorbate",
    ];

    #[test]
    fn test_invalid_puzzle_keeps_loading() {
        let mut session = Session::new(settings(), Recorder::default());
        let mut puzzle = Puzzle::sample();
        puzzle.answer.pop();
        assert!(session.initialize(puzzle).is_err());
        assert_eq!(session.snapshot().phase, Phase::Loading);
        assert!(session.subject().is_none());
    }

    #[test]
    fn test_win_fires_full_burst() {
        let mut session = session();
        pick(&mut session, &CORRECT);
        assert_eq!(session.submit(SubmitOptions::default()), Ok(Submission::Won));
        assert_eq!(session.active_bursts(), 1);

        assert_eq!(session.advance(0), 2);
        assert_eq!(session.advance(8), 8);
        assert_eq!(session.emitter().requests.len(), 10);
        assert_eq!(session.active_bursts(), 0);
        assert_eq!(session.pending_timers(), 0);
    }

    #[test]
    fn test_auto_win_celebrates_once() {
        let mut session = session();
        session.submit(SubmitOptions { auto_win: true }).unwrap();
        assert_eq!(session.active_bursts(), 1);
        assert!(session.snapshot().history.is_empty());

        // Late duplicate is refused and schedules nothing new
        assert_eq!(
            session.submit(SubmitOptions { auto_win: true }),
            Err(RoundError::RoundOver)
        );
        assert_eq!(session.active_bursts(), 1);
        assert_eq!(session.advance(100), 10);
    }

    #[test]
    fn test_feedback_clears_after_delay() {
        let mut session = session();
        pick(&mut session, &["Caffeine", WRONG[0], WRONG[1], WRONG[2]]);
        session.submit(SubmitOptions::default()).unwrap();

        let caffeine = Item::from("Caffeine");
        assert_eq!(session.round().feedback_for(&caffeine), ItemFeedback::Correct);
        session.advance(999);
        assert_eq!(session.round().feedback_for(&caffeine), ItemFeedback::Correct);
        session.advance(1);
        assert_eq!(session.round().feedback_for(&caffeine), ItemFeedback::Neutral);
    }

    #[test]
    fn test_loss_voids_feedback_timer() {
        let mut session = session();
        for _ in 0..3 {
            pick(&mut session, &WRONG);
            session.submit(SubmitOptions::default()).unwrap();
        }
        let snapshot = session.snapshot();
        assert_eq!(snapshot.outcome, Outcome::Lost);
        assert_eq!(snapshot.attempts_remaining, 0);
        assert!(snapshot.feedback.is_empty());
        assert_eq!(session.pending_timers(), 0);
        assert_eq!(session.active_bursts(), 0);
    }

    #[test]
    fn test_cancel_celebrations_stops_dispatch() {
        let mut session = session();
        session.submit(SubmitOptions { auto_win: true }).unwrap();
        assert_eq!(session.advance(2), 4);

        assert_eq!(session.cancel_celebrations(), 6);
        assert_eq!(session.cancel_celebrations(), 0);
        assert_eq!(session.advance(100), 0);
        assert_eq!(session.emitter().requests.len(), 4);
    }

    #[test]
    fn test_reset_voids_previous_round_timers() {
        let mut session = session();
        session.trigger_celebration();
        pick(&mut session, &WRONG);
        session.submit(SubmitOptions::default()).unwrap();
        assert!(session.pending_timers() > 0);

        session.reset();
        assert_eq!(session.pending_timers(), 0);
        assert_eq!(session.snapshot().phase, Phase::Loading);
        assert_eq!(session.advance(5000), 0);
        assert!(session.emitter().requests.is_empty());

        // Fresh round works normally afterwards
        session.initialize(Puzzle::sample()).unwrap();
        pick(&mut session, &WRONG);
        session.submit(SubmitOptions::default()).unwrap();
        assert_eq!(session.pending_timers(), 1);
    }

    #[test]
    fn test_emitter_failure_does_not_touch_round() {
        let mut session = session();
        session.emitter_mut().broken = true;
        pick(&mut session, &CORRECT);
        session.submit(SubmitOptions::default()).unwrap();
        let before = session.snapshot();

        assert_eq!(session.advance(100), 0);
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.pending_timers(), 0);
    }

    #[test]
    fn test_share_text_and_detailed_view() {
        let mut session = session();
        pick(&mut session, &[WRONG[0], CORRECT[0], WRONG[1], CORRECT[1]]);
        session.submit(SubmitOptions::default()).unwrap();
        pick(&mut session, &CORRECT);
        session.submit(SubmitOptions::default()).unwrap();

        assert_eq!(
            session.share_text(),
            "My Alchemiz.ing results from today:\n\n🧪🟥🟦🟥🟦\n🧪🟦🟦🟦🟦"
        );
        let view: Vec<_> = session.detailed_view().collect();
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].correct.len(), 2);
        assert_eq!(view[1].wrong.len(), 0);
    }

    #[test]
    fn test_user_survives_reset() {
        let mut session = session();
        session.set_user(Some("user-1".to_string()));
        session.reset();
        assert_eq!(session.user(), Some("user-1"));
    }
}
