//! Result aggregation: percentage, performance tier, and high score.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::traits::HighScoreStore;
use crate::view::SessionSnapshot;

/// Performance bracket derived from the final percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Outstanding,
    Excellent,
    Good,
    Encouraging,
    Discouraging,
}

/// Lower bounds, highest first. Anything below the last is `Discouraging`.
const TIER_THRESHOLDS: [(u32, Tier); 4] = [
    (90, Tier::Outstanding),
    (70, Tier::Excellent),
    (50, Tier::Good),
    (30, Tier::Encouraging),
];

impl Tier {
    pub fn from_percentage(percentage: u32) -> Self {
        TIER_THRESHOLDS
            .iter()
            .find(|(threshold, _)| percentage >= *threshold)
            .map(|(_, tier)| *tier)
            .unwrap_or(Tier::Discouraging)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tier::Outstanding => "🏆",
            Tier::Excellent => "🌟",
            Tier::Good => "👍",
            Tier::Encouraging => "📚",
            Tier::Discouraging => "💪",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Tier::Outstanding => "Outstanding! You're a genius!",
            Tier::Excellent => "Excellent work! Great knowledge!",
            Tier::Good => "Good job! Keep learning!",
            Tier::Encouraging => "Not bad! Practice makes perfect!",
            Tier::Discouraging => "Don't give up! Try again!",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Outstanding => write!(f, "outstanding"),
            Tier::Excellent => write!(f, "excellent"),
            Tier::Good => write!(f, "good"),
            Tier::Encouraging => write!(f, "encouraging"),
            Tier::Discouraging => write!(f, "discouraging"),
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "outstanding" => Ok(Tier::Outstanding),
            "excellent" => Ok(Tier::Excellent),
            "good" => Ok(Tier::Good),
            "encouraging" => Ok(Tier::Encouraging),
            "discouraging" => Ok(Tier::Discouraging),
            other => Err(format!("unknown tier: {other}")),
        }
    }
}

/// `score / total` as a whole percentage, rounded half up.
pub fn percentage(score: u32, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (score as f64 / total as f64 * 100.0).round() as u32
}

/// What happened to the persisted best score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreUpdate {
    /// Best score before this session, `None` when there was none.
    pub previous: Option<u32>,
    /// Best score after this session.
    pub best: u32,
    pub is_new_best: bool,
}

/// Everything the result screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: u32,
    pub total: usize,
    pub percentage: u32,
    pub correct: usize,
    pub incorrect: usize,
    /// Questions that ran out of time (a subset of `incorrect`).
    pub timed_out: usize,
    pub tier: Tier,
    pub icon: String,
    pub message: String,
    /// `None` when the store could not be read or written.
    pub high_score: Option<HighScoreUpdate>,
}

/// Score a finished session without touching the store.
pub fn summarize(snapshot: &SessionSnapshot) -> QuizResult {
    let percentage = percentage(snapshot.score, snapshot.total);
    let tier = Tier::from_percentage(percentage);
    let correct = snapshot.score as usize;

    QuizResult {
        score: snapshot.score,
        total: snapshot.total,
        percentage,
        correct,
        incorrect: snapshot.total.saturating_sub(correct),
        timed_out: snapshot.answers.iter().filter(|a| a.chosen.is_none()).count(),
        tier,
        icon: tier.icon().to_string(),
        message: tier.message().to_string(),
        high_score: None,
    }
}

/// Offer `score` to the store as a new best.
///
/// A missing stored value counts as 0; the store is written only when
/// `score` is strictly greater. Store failures are logged and reported as
/// `None`.
pub fn record_high_score(store: &mut dyn HighScoreStore, score: u32) -> Option<HighScoreUpdate> {
    let previous = match store.load_high_score() {
        Ok(previous) => previous,
        Err(e) => {
            tracing::warn!("high score unavailable: {e:#}");
            return None;
        }
    };

    let is_new_best = score > previous.unwrap_or(0);
    if is_new_best {
        if let Err(e) = store.save_high_score(score) {
            tracing::warn!("failed to save high score: {e:#}");
            return None;
        }
        tracing::debug!(?previous, score, "new high score");
    }

    Some(HighScoreUpdate {
        previous,
        best: if is_new_best {
            score
        } else {
            previous.unwrap_or(0)
        },
        is_new_best,
    })
}

/// Score a finished session and update the persisted best.
pub fn finalize(snapshot: &SessionSnapshot, store: &mut dyn HighScoreStore) -> QuizResult {
    let mut result = summarize(snapshot);
    result.high_score = record_high_score(store, snapshot.score);
    result
}
