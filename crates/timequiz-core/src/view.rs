//! Render instructions emitted by the session state machine.
//!
//! The session never draws anything. Each transition returns a [`Frame`]
//! describing what changed, and the presentation layer decides how to show
//! it.

use serde::Serialize;

use crate::model::OPTION_LETTERS;

/// What a transition asks the presentation layer to show.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// A new question is up and its countdown has started.
    Question(QuestionView),
    /// The countdown moved.
    Tick { remaining: u32, urgency: Urgency },
    /// The current question is locked, by answer or by expiry.
    Revealed(Reveal),
    /// All questions are processed.
    Finished(SessionSnapshot),
    /// The session was cleared.
    Idle,
}

/// Everything needed to draw a question screen.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionView {
    /// 1-based question number.
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<LabeledOption>,
    pub score: u32,
    /// `number / total`, in `(0, 1]`.
    pub progress: f64,
    pub remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledOption {
    pub letter: char,
    pub text: String,
}

/// Outcome of one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    /// 0-based question index.
    pub question: usize,
    /// The option picked, `None` when time ran out.
    pub chosen: Option<usize>,
    pub correct: usize,
    pub score: u32,
    /// Whether advancing from here finishes the session.
    pub is_last: bool,
}

impl Reveal {
    pub fn is_correct(&self) -> bool {
        self.chosen == Some(self.correct)
    }

    pub fn timed_out(&self) -> bool {
        self.chosen.is_none()
    }
}

/// How close the countdown is to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Calm,
    Warning,
    Danger,
}

impl Urgency {
    pub fn from_remaining(remaining: u32) -> Self {
        match remaining {
            0..=5 => Urgency::Danger,
            6..=10 => Urgency::Warning,
            _ => Urgency::Calm,
        }
    }
}

/// One processed question, kept for the end-of-session review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    pub prompt: String,
    pub options: Vec<String>,
    pub chosen: Option<usize>,
    pub correct_index: usize,
}

impl AnswerRecord {
    pub fn is_correct(&self) -> bool {
        self.chosen == Some(self.correct_index)
    }
}

/// Final state of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub score: u32,
    pub total: usize,
    pub answers: Vec<AnswerRecord>,
}

/// Letter label for an option slot, `'?'` beyond the known slots.
pub fn option_letter(slot: usize) -> char {
    OPTION_LETTERS.get(slot).copied().unwrap_or('?')
}

/// Option slot for a letter (`a`–`d`, any case) or number (`1`–`4`).
pub fn parse_option(input: &str) -> Option<usize> {
    let input = input.trim();
    let mut chars = input.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    let upper = c.to_ascii_uppercase();
    if let Some(slot) = OPTION_LETTERS.iter().position(|&l| l == upper) {
        return Some(slot);
    }
    c.to_digit(10)
        .map(|d| d as usize)
        .filter(|&d| (1..=OPTION_LETTERS.len()).contains(&d))
        .map(|d| d - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_thresholds() {
        assert_eq!(Urgency::from_remaining(15), Urgency::Calm);
        assert_eq!(Urgency::from_remaining(11), Urgency::Calm);
        assert_eq!(Urgency::from_remaining(10), Urgency::Warning);
        assert_eq!(Urgency::from_remaining(6), Urgency::Warning);
        assert_eq!(Urgency::from_remaining(5), Urgency::Danger);
        assert_eq!(Urgency::from_remaining(0), Urgency::Danger);
    }

    #[test]
    fn parse_letters_and_numbers() {
        assert_eq!(parse_option("a"), Some(0));
        assert_eq!(parse_option(" D \n"), Some(3));
        assert_eq!(parse_option("2"), Some(1));
        assert_eq!(parse_option("4"), Some(3));
        assert_eq!(parse_option("0"), None);
        assert_eq!(parse_option("5"), None);
        assert_eq!(parse_option("e"), None);
        assert_eq!(parse_option("ab"), None);
        assert_eq!(parse_option(""), None);
    }

    #[test]
    fn letters_by_slot() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(3), 'D');
        assert_eq!(option_letter(9), '?');
    }
}
