//! Quiz session state machine.
//!
//! A [`QuizSession`] walks `Idle → AwaitingAnswer → Answered → … → Finished`.
//! Events are applied one at a time and each transition checks the current
//! phase first: a transition requested from the wrong phase returns `None`
//! and changes nothing. That guard is what settles a last-moment answer
//! racing the countdown: whichever event is applied first locks the
//! question, and the other finds the phase already moved on.

use rand::Rng;

use crate::error::QuizError;
use crate::model::{QuestionBank, SessionQuestion};
use crate::select::select_session;
use crate::timer::{Timer, TimerEvent, TimerTag};
use crate::view::{
    option_letter, AnswerRecord, Frame, LabeledOption, QuestionView, Reveal, SessionSnapshot,
    Urgency,
};

pub const DEFAULT_QUESTIONS_PER_SESSION: usize = 10;
pub const DEFAULT_QUESTION_SECS: u32 = 15;

/// Session length and pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub questions_per_session: usize,
    pub question_secs: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            questions_per_session: DEFAULT_QUESTIONS_PER_SESSION,
            question_secs: DEFAULT_QUESTION_SECS,
        }
    }
}

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Question shown, countdown running.
    AwaitingAnswer { question: usize },
    /// Question locked; `chosen` is `None` when time ran out.
    Answered {
        question: usize,
        chosen: Option<usize>,
    },
    Finished,
}

/// The quiz state machine.
pub struct QuizSession {
    config: SessionConfig,
    timer: Box<dyn Timer>,
    phase: Phase,
    questions: Vec<SessionQuestion>,
    answers: Vec<AnswerRecord>,
    current: usize,
    score: u32,
    time_remaining: u32,
    round: u64,
}

impl QuizSession {
    pub fn new(config: SessionConfig, timer: Box<dyn Timer>) -> Self {
        Self {
            config,
            timer,
            phase: Phase::Idle,
            questions: Vec::new(),
            answers: Vec::new(),
            current: 0,
            score: 0,
            time_remaining: 0,
            round: 0,
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn questions(&self) -> &[SessionQuestion] {
        &self.questions
    }

    /// Questions locked so far, by answer or by expiry.
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Tag the countdown for the current question carries.
    pub fn timer_tag(&self) -> TimerTag {
        TimerTag {
            round: self.round,
            question: self.current,
        }
    }

    /// Draw a fresh set of questions and show the first one.
    ///
    /// Allowed from `Idle` and `Finished`; from any other phase this is a
    /// no-op. A bank too small for the configured session fails with
    /// [`QuizError::InsufficientData`] and leaves the session untouched.
    pub fn start_session<R: Rng + ?Sized>(
        &mut self,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Result<Option<Frame>, QuizError> {
        if !matches!(self.phase, Phase::Idle | Phase::Finished) {
            tracing::debug!(phase = ?self.phase, "start ignored, session in progress");
            return Ok(None);
        }

        let count = self.config.questions_per_session.max(1);
        let questions = select_session(bank, count, rng)?;

        self.timer.stop();
        self.questions = questions;
        self.answers.clear();
        self.current = 0;
        self.score = 0;
        self.round += 1;
        tracing::debug!(round = self.round, questions = count, "session started");

        Ok(Some(self.begin_question()))
    }

    /// Lock in `option` for the current question.
    ///
    /// Only acts while awaiting an answer. An option slot the question does
    /// not have is ignored and does not lock the question.
    pub fn submit_answer(&mut self, option: usize) -> Option<Frame> {
        let Phase::AwaitingAnswer { question } = self.phase else {
            tracing::debug!(phase = ?self.phase, option, "answer ignored");
            return None;
        };

        let current = &self.questions[question];
        if option >= current.options.len() {
            tracing::debug!(option, "answer ignored, no such option");
            return None;
        }

        self.timer.stop();
        if current.is_correct(option) {
            self.score += 1;
        }
        Some(self.lock(question, Some(option)))
    }

    /// Lock the current question unanswered because time ran out.
    pub fn expire(&mut self) -> Option<Frame> {
        let Phase::AwaitingAnswer { question } = self.phase else {
            tracing::debug!(phase = ?self.phase, "expiry ignored");
            return None;
        };

        self.timer.stop();
        self.time_remaining = 0;
        Some(self.lock(question, None))
    }

    /// Apply an event from the countdown.
    ///
    /// Events tagged for another round or question are dropped.
    pub fn on_timer(&mut self, event: TimerEvent) -> Option<Frame> {
        if !matches!(self.phase, Phase::AwaitingAnswer { .. }) {
            return None;
        }
        if event.tag() != self.timer_tag() {
            tracing::debug!(
                stale = ?event.tag(),
                current = ?self.timer_tag(),
                "dropping stale timer event"
            );
            return None;
        }

        match event {
            TimerEvent::Tick { remaining, .. } => {
                self.time_remaining = remaining;
                Some(Frame::Tick {
                    remaining,
                    urgency: Urgency::from_remaining(remaining),
                })
            }
            TimerEvent::Expired { .. } => self.expire(),
        }
    }

    /// Move past an answered question.
    pub fn advance(&mut self) -> Option<Frame> {
        let Phase::Answered { question, .. } = self.phase else {
            tracing::debug!(phase = ?self.phase, "advance ignored");
            return None;
        };

        if question + 1 >= self.questions.len() {
            self.timer.stop();
            self.phase = Phase::Finished;
            tracing::debug!(score = self.score, "session finished");
            return self.snapshot().map(Frame::Finished);
        }

        self.current = question + 1;
        Some(self.begin_question())
    }

    /// Return a finished session to `Idle`.
    pub fn reset(&mut self) -> Option<Frame> {
        if self.phase != Phase::Finished {
            tracing::debug!(phase = ?self.phase, "reset ignored");
            return None;
        }

        self.timer.stop();
        self.phase = Phase::Idle;
        self.questions.clear();
        self.answers.clear();
        self.current = 0;
        self.score = 0;
        self.time_remaining = 0;
        Some(Frame::Idle)
    }

    /// Final state, available once the session is finished.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        (self.phase == Phase::Finished).then(|| SessionSnapshot {
            score: self.score,
            total: self.questions.len(),
            answers: self.answers.clone(),
        })
    }

    /// Screen for the question currently shown, if any.
    pub fn current_view(&self) -> Option<QuestionView> {
        match self.phase {
            Phase::AwaitingAnswer { .. } | Phase::Answered { .. } => {
                Some(self.question_view(self.current))
            }
            Phase::Idle | Phase::Finished => None,
        }
    }

    fn begin_question(&mut self) -> Frame {
        self.time_remaining = self.config.question_secs;
        self.phase = Phase::AwaitingAnswer {
            question: self.current,
        };
        self.timer.start(self.timer_tag(), self.config.question_secs);
        Frame::Question(self.question_view(self.current))
    }

    fn lock(&mut self, question: usize, chosen: Option<usize>) -> Frame {
        let asked = &self.questions[question];
        self.answers.push(AnswerRecord {
            prompt: asked.prompt.clone(),
            options: asked.options.clone(),
            chosen,
            correct_index: asked.correct_index,
        });
        self.phase = Phase::Answered { question, chosen };
        tracing::debug!(question, ?chosen, score = self.score, "question locked");

        Frame::Revealed(Reveal {
            question,
            chosen,
            correct: asked.correct_index,
            score: self.score,
            is_last: question + 1 >= self.questions.len(),
        })
    }

    fn question_view(&self, index: usize) -> QuestionView {
        let question = &self.questions[index];
        let total = self.questions.len();
        QuestionView {
            number: index + 1,
            total,
            prompt: question.prompt.clone(),
            options: question
                .options
                .iter()
                .enumerate()
                .map(|(slot, text)| LabeledOption {
                    letter: option_letter(slot),
                    text: text.clone(),
                })
                .collect(),
            score: self.score,
            progress: (index + 1) as f64 / total as f64,
            remaining: self.time_remaining,
        }
    }
}
