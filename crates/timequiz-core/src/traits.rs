//! Collaborator traits implemented outside the core.
//!
//! The countdown seam lives in [`crate::timer`]; persistence lives here and
//! is implemented by the `timequiz-store` crate.

/// Persistent home of the best score.
pub trait HighScoreStore {
    /// The best score recorded so far, `None` when nothing was ever saved.
    fn load_high_score(&self) -> anyhow::Result<Option<u32>>;

    /// Record a new best score.
    fn save_high_score(&mut self, score: u32) -> anyhow::Result<()>;
}
