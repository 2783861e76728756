//! Shareable results
//!
//! Pure projections over the guess history: the emoji transcript copied to
//! the clipboard and the per-attempt breakdown shown after a round.

use super::state::{Guess, Item};

/// Leads every transcript line
pub const LINE_PREFIX: &str = "🧪";
pub const CORRECT_GLYPH: &str = "🟦";
pub const WRONG_GLYPH: &str = "🟥";

/// Glyph line for one guess, items in submission order
pub fn emoji_line(guess: &Guess) -> String {
    let mut line = String::from(LINE_PREFIX);
    for item in guess.submitted() {
        line.push_str(if guess.is_correct(item) {
            CORRECT_GLYPH
        } else {
            WRONG_GLYPH
        });
    }
    line
}

/// `"My <site> results from today:"`
pub fn share_header(site: &str) -> String {
    format!("My {site} results from today:")
}

/// Header, a blank line, then one line per guess
pub fn shareable_text<S: AsRef<str>>(lines: &[S], header: &str) -> String {
    let mut text = String::from(header);
    text.push_str("\n\n");
    let body: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
    text.push_str(&body.join("\n"));
    text
}

/// Full transcript for a history
pub fn transcript(history: &[Guess], site: &str) -> String {
    let lines: Vec<String> = history.iter().map(emoji_line).collect();
    shareable_text(&lines, &share_header(site))
}

/// What one attempt got right and wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptBreakdown<'a> {
    /// 1-based attempt number
    pub attempt: usize,
    pub correct: &'a [Item],
    pub wrong: &'a [Item],
}

/// Per-attempt breakdown in submission order
///
/// The iterator is `Clone`, so it can be restarted without touching history.
pub fn detailed_view(
    history: &[Guess],
) -> impl Iterator<Item = AttemptBreakdown<'_>> + Clone + ExactSizeIterator {
    history
        .iter()
        .enumerate()
        .map(|(i, guess)| AttemptBreakdown {
            attempt: i + 1,
            correct: guess.correct(),
            wrong: guess.wrong(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guess(submitted: &[&str], correct: &[&str]) -> Guess {
        let submitted: Vec<Item> = submitted.iter().map(|l| Item::from(*l)).collect();
        let (c, w) = submitted
            .iter()
            .cloned()
            .partition(|i| correct.contains(&i.label()));
        Guess::new(submitted, c, w)
    }

    #[test]
    fn test_emoji_line_keeps_submission_order() {
        let g = guess(&["E", "A", "F", "B"], &["A", "B"]);
        assert_eq!(emoji_line(&g), "🧪🟥🟦🟥🟦");
    }

    #[test]
    fn test_shareable_text_layout() {
        let history = vec![
            guess(&["E", "F", "G", "H"], &[]),
            guess(&["A", "B", "C", "D"], &["A", "B", "C", "D"]),
        ];
        assert_eq!(
            transcript(&history, "Alchemiz.ing"),
            "My Alchemiz.ing results from today:\n\n🧪🟥🟥🟥🟥\n🧪🟦🟦🟦🟦"
        );
    }

    #[test]
    fn test_shareable_text_no_guesses() {
        let lines: [&str; 0] = [];
        assert_eq!(shareable_text(&lines, "Header"), "Header\n\n");
    }

    #[test]
    fn test_detailed_view_is_restartable() {
        let history = vec![
            guess(&["A", "E", "F", "G"], &["A"]),
            guess(&["A", "B", "C", "D"], &["A", "B", "C", "D"]),
        ];
        let view = detailed_view(&history);
        assert_eq!(view.len(), 2);

        let first: Vec<_> = view.clone().collect();
        let second: Vec<_> = view.collect();
        assert_eq!(first, second);
        assert_eq!(first[0].attempt, 1);
        assert_eq!(first[0].correct, &[Item::from("A")]);
        assert_eq!(first[0].wrong.len(), 3);
        assert_eq!(first[1].attempt, 2);
        assert!(first[1].wrong.is_empty());
    }
}
