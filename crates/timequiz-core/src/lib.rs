//! timequiz-core — Question bank, session state machine, and scoring.
//!
//! This crate owns the quiz logic. Rendering, input, and persistence are
//! collaborators reached through the [`traits`] and [`timer`] seams.

pub mod bank;
pub mod error;
pub mod model;
pub mod parser;
pub mod results;
pub mod select;
pub mod session;
pub mod timer;
pub mod traits;
pub mod view;

pub use error::QuizError;
pub use model::{QuestionBank, QuestionRecord, SessionQuestion};
pub use session::{Phase, QuizSession, SessionConfig};
