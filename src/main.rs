//! Alchemiz.ing entry point
//!
//! Terminal driver for the round engine. Usage:
//!
//! ```text
//! alchemizing [PUZZLE.json] [SETTINGS.json]
//! ```
//!
//! Commands: `<n>` toggles item n, `s` submits, `w` auto-wins (dev mode),
//! `r` restarts (dev mode), `q` quits.

#[cfg(not(target_arch = "wasm32"))]
mod terminal {
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use alchemizing::effects::{EmissionRequest, Emitter};
    use alchemizing::game::{ItemFeedback, Outcome, Phase, SubmitOptions, Submission};
    use alchemizing::{EmitError, Puzzle, Session, Settings};

    /// Stands in for the canvas: logs every request as JSON
    struct LogEmitter {
        emitted: usize,
    }

    impl Emitter for LogEmitter {
        fn emit(&mut self, request: &EmissionRequest) -> Result<(), EmitError> {
            let json = request
                .to_json()
                .map_err(|e| EmitError::Rejected(e.to_string()))?;
            log::debug!("confetti {json}");
            self.emitted += 1;
            Ok(())
        }
    }

    /// Wall-clock driven session
    struct Game {
        session: Session<LogEmitter>,
        puzzle: Puzzle,
        last_tick: Instant,
    }

    impl Game {
        fn new(settings: Settings, puzzle: Puzzle) -> Self {
            Self {
                session: Session::new(settings, LogEmitter { emitted: 0 }),
                puzzle,
                last_tick: Instant::now(),
            }
        }

        fn start(&mut self) -> bool {
            match self.session.initialize(self.puzzle.clone()) {
                Ok(()) => true,
                Err(err) => {
                    eprintln!("Puzzle unavailable: {err}");
                    false
                }
            }
        }

        /// Apply timers that came due since the last call
        fn tick(&mut self) {
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_tick).as_millis() as u64;
            self.last_tick = now;
            self.session.advance(elapsed);
        }

        /// Block until every pending timer has fired
        fn drain(&mut self) {
            while let Some(wait) = self.session.until_next_timer_ms() {
                std::thread::sleep(Duration::from_millis(wait));
                self.tick();
            }
        }

        fn print_board(&self) {
            let snapshot = self.session.snapshot();
            if snapshot.phase != Phase::Playing {
                return;
            }
            println!();
            if let Some(subject) = self.session.subject() {
                println!("[ {} ]", subject.to_uppercase());
            }
            println!("{}", snapshot.prompt);
            for (i, item) in snapshot.pool.iter().enumerate() {
                let mark = if snapshot.selection.contains(item) { '*' } else { ' ' };
                let feedback = match snapshot.feedback.get(item) {
                    Some(ItemFeedback::Correct) => " (correct)",
                    Some(ItemFeedback::Wrong) => " (wrong)",
                    _ => "",
                };
                println!("{mark} {}. {}{feedback}", i + 1, item.label().to_uppercase());
            }
            println!(
                "SUBMIT ANSWER ({} Guesses Remaining)",
                snapshot.attempts_remaining
            );
        }

        fn print_results(&self) {
            let snapshot = self.session.snapshot();
            println!();
            println!("{}", snapshot.prompt);
            for attempt in self.session.detailed_view() {
                let correct: Vec<&str> = attempt.correct.iter().map(|i| i.label()).collect();
                let wrong: Vec<&str> = attempt.wrong.iter().map(|i| i.label()).collect();
                println!(
                    "  #{}: correct [{}] wrong [{}]",
                    attempt.attempt,
                    correct.join(", "),
                    wrong.join(", ")
                );
            }
            println!();
            println!("{}", self.session.share_text());
            if snapshot.outcome == Outcome::Won {
                println!(
                    "({} confetti emissions)",
                    self.session.emitter().emitted
                );
            }
        }

        fn handle(&mut self, command: &str) -> bool {
            let dev_mode = self.session.settings().dev_mode;
            match command {
                "q" => return false,
                "r" if dev_mode => {
                    self.session.reset();
                    self.start();
                }
                "w" if dev_mode => {
                    let result = self.session.submit(SubmitOptions { auto_win: true });
                    self.report(result);
                }
                "s" => {
                    let result = self.session.submit(SubmitOptions::default());
                    self.report(result);
                }
                other => match other.parse::<usize>() {
                    Ok(n) if n >= 1 && n <= self.session.round().pool().len() => {
                        let item = self.session.round().pool()[n - 1].clone();
                        if let Err(err) = self.session.toggle_selection(&item) {
                            println!("{err}");
                        }
                    }
                    _ => println!("Unknown command: {other}"),
                },
            }
            true
        }

        fn report(&mut self, result: Result<Submission, alchemizing::RoundError>) {
            match result {
                Ok(Submission::Won) | Ok(Submission::Lost) => {
                    self.drain();
                    self.print_results();
                }
                Ok(_) => {}
                Err(err) => println!("{err}"),
            }
        }
    }

    pub fn run() -> io::Result<()> {
        let mut args = std::env::args().skip(1).map(PathBuf::from);
        let puzzle_path = args.next();
        let settings_path = args.next();

        let settings = Settings::load(settings_path.as_deref());
        let puzzle = match puzzle_path {
            Some(path) => match Puzzle::load(&path) {
                Ok(puzzle) => puzzle,
                Err(err) => {
                    eprintln!("Puzzle unavailable: {err}");
                    return Ok(());
                }
            },
            None => Puzzle::sample(),
        };

        let mut game = Game::new(settings, puzzle);
        if !game.start() {
            return Ok(());
        }

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        game.print_board();
        print!("> ");
        stdout.flush()?;
        for line in stdin.lock().lines() {
            game.tick();
            if !game.handle(line?.trim()) {
                break;
            }
            game.tick();
            game.print_board();
            print!("> ");
            stdout.flush()?;
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Alchemiz.ing starting...");

    if let Err(err) = terminal::run() {
        log::error!("Terminal error: {err}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web build drives `Session` from JS; nothing to run here
}
