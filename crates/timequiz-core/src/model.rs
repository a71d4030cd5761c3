//! Core data model types for timequiz.
//!
//! A [`QuestionBank`] is the validated pool every session draws from. A
//! [`SessionQuestion`] is the per-session view of a record with its options
//! reordered.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Number of options every question carries.
pub const OPTION_COUNT: usize = 4;

/// Labels shown next to options, by slot.
pub const OPTION_LETTERS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

/// A question as it appears in the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Question text.
    pub prompt: String,
    /// Answer options in their authored order.
    pub options: Vec<String>,
    /// Slot of the correct option in `options`.
    pub correct_index: usize,
}

impl QuestionRecord {
    pub fn new(prompt: &str, options: [&str; OPTION_COUNT], correct_index: usize) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_index,
        }
    }

    /// Text of the correct option.
    ///
    /// Only meaningful on a validated record.
    pub fn correct_text(&self) -> &str {
        &self.options[self.correct_index]
    }

    /// Check the structural rules for a single record.
    fn check(&self) -> Result<(), String> {
        if self.prompt.trim().is_empty() {
            return Err("prompt is empty".into());
        }
        if self.options.len() != OPTION_COUNT {
            return Err(format!(
                "expected {OPTION_COUNT} options, found {}",
                self.options.len()
            ));
        }
        if self.correct_index >= OPTION_COUNT {
            return Err(format!(
                "correct index {} is outside 0..={}",
                self.correct_index,
                OPTION_COUNT - 1
            ));
        }
        let mut seen = HashSet::new();
        for option in &self.options {
            if option.trim().is_empty() {
                return Err("option text is empty".into());
            }
            if !seen.insert(option.as_str()) {
                return Err(format!("duplicate option: {option}"));
            }
        }
        Ok(())
    }
}

/// A question as asked in one session, options reshuffled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    /// Slot of the correct option after shuffling.
    pub correct_index: usize,
}

impl SessionQuestion {
    pub fn correct_text(&self) -> &str {
        &self.options[self.correct_index]
    }

    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_index
    }
}

/// A validated, immutable pool of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    records: Vec<QuestionRecord>,
}

impl QuestionBank {
    /// Build a bank, rejecting the first malformed record.
    ///
    /// Besides the per-record rules, prompts must be unique across the bank
    /// so that a session never shows the same question twice.
    pub fn new(records: Vec<QuestionRecord>) -> Result<Self, QuizError> {
        let mut prompts = HashSet::new();
        for (index, record) in records.iter().enumerate() {
            record
                .check()
                .map_err(|reason| QuizError::InvalidData { index, reason })?;
            if !prompts.insert(record.prompt.trim().to_lowercase()) {
                return Err(QuizError::InvalidData {
                    index,
                    reason: format!("duplicate prompt: {}", record.prompt),
                });
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
