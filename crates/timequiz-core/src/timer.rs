//! Per-question countdown.
//!
//! [`Countdown`] holds the decrement and expiry rules. [`TokioTimer`] drives
//! one from a tokio interval and delivers [`TimerEvent`]s over a channel;
//! [`ManualTimer`] lets the caller fire ticks by hand. Every event carries the
//! [`TimerTag`] of the question it was started for, so the session can drop
//! events that outlived their question.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// Identifies the question a countdown belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerTag {
    /// Incremented on every session start.
    pub round: u64,
    /// Index of the question within the session.
    pub question: usize,
}

/// Something a countdown reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed; `remaining` is the new value.
    Tick { tag: TimerTag, remaining: u32 },
    /// The countdown reached zero.
    Expired { tag: TimerTag },
}

impl TimerEvent {
    pub fn tag(&self) -> TimerTag {
        match self {
            TimerEvent::Tick { tag, .. } | TimerEvent::Expired { tag } => *tag,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountdownState {
    Running,
    Stopped,
    Expired,
}

/// Countdown state, independent of any clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    tag: TimerTag,
    remaining: u32,
    state: CountdownState,
}

impl Countdown {
    pub fn new(tag: TimerTag, duration_secs: u32) -> Self {
        Self {
            tag,
            remaining: duration_secs,
            state: CountdownState::Running,
        }
    }

    pub fn tag(&self) -> TimerTag {
        self.tag
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn is_expired(&self) -> bool {
        self.state == CountdownState::Expired
    }

    /// Advance by one second.
    ///
    /// Emits a tick with the new remaining value, followed by a single
    /// expiry when that value is zero. A stopped or expired countdown emits
    /// nothing.
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        if !self.is_running() {
            return Vec::new();
        }

        self.remaining = self.remaining.saturating_sub(1);
        let mut events = vec![TimerEvent::Tick {
            tag: self.tag,
            remaining: self.remaining,
        }];

        if self.remaining == 0 {
            self.state = CountdownState::Expired;
            events.push(TimerEvent::Expired { tag: self.tag });
        }

        events
    }

    /// Cancel future ticks. Idempotent; an expired countdown stays expired.
    pub fn stop(&mut self) {
        if self.is_running() {
            self.state = CountdownState::Stopped;
        }
    }
}

/// Countdown collaborator injected into a session.
pub trait Timer: Send {
    /// Start a countdown for `tag`, replacing any countdown still running.
    fn start(&mut self, tag: TimerTag, duration_secs: u32);

    /// Cancel the running countdown. No-op when nothing is running.
    fn stop(&mut self);
}

// ---------------------------------------------------------------------------
// Wall-clock timer
// ---------------------------------------------------------------------------

/// Handle to a spawned countdown task.
#[derive(Debug)]
pub struct TimerHandle {
    tag: TimerTag,
    task: JoinHandle<()>,
}

impl TimerHandle {
    pub fn tag(&self) -> TimerTag {
        self.tag
    }

    /// Cancel the task. Safe to call more than once, or after expiry.
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawn a task that ticks a [`Countdown`] once per second onto `tx`.
///
/// The task ends after the expiry event, when stopped, or when the receiver
/// is dropped. Must be called from within a tokio runtime.
pub fn spawn_countdown(
    tag: TimerTag,
    duration_secs: u32,
    tx: mpsc::UnboundedSender<TimerEvent>,
) -> TimerHandle {
    let task = tokio::spawn(async move {
        let period = Duration::from_secs(1);
        let mut interval = interval_at(Instant::now() + period, period);
        let mut countdown = Countdown::new(tag, duration_secs);

        while countdown.is_running() {
            interval.tick().await;
            for event in countdown.tick() {
                if tx.send(event).is_err() {
                    return;
                }
            }
        }
    });

    TimerHandle { tag, task }
}

/// [`Timer`] backed by tokio tasks.
pub struct TokioTimer {
    tx: mpsc::UnboundedSender<TimerEvent>,
    current: Option<TimerHandle>,
}

impl TokioTimer {
    pub fn new(tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self { tx, current: None }
    }
}

impl Timer for TokioTimer {
    fn start(&mut self, tag: TimerTag, duration_secs: u32) {
        self.stop();
        self.current = Some(spawn_countdown(tag, duration_secs, self.tx.clone()));
    }

    fn stop(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.stop();
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

// ---------------------------------------------------------------------------
// Manual timer
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct ManualState {
    countdown: Option<Countdown>,
    starts: usize,
}

/// [`Timer`] whose seconds pass only when [`ManualTimer::fire`] is called.
///
/// Clones share state, so a test can keep one clone while the session owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    state: Arc<Mutex<ManualState>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut ManualState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Let one second pass on the current countdown.
    pub fn fire(&self) -> Vec<TimerEvent> {
        self.with_state(|s| s.countdown.as_mut().map(Countdown::tick).unwrap_or_default())
    }

    /// Let the current countdown run until it expires or is stopped.
    pub fn run_out(&self) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        loop {
            let batch = self.fire();
            if batch.is_empty() {
                return events;
            }
            events.extend(batch);
        }
    }

    pub fn is_running(&self) -> bool {
        self.with_state(|s| s.countdown.is_some_and(|c| c.is_running()))
    }

    pub fn active_tag(&self) -> Option<TimerTag> {
        self.with_state(|s| s.countdown.filter(Countdown::is_running).map(|c| c.tag()))
    }

    /// Number of countdowns started so far.
    pub fn starts(&self) -> usize {
        self.with_state(|s| s.starts)
    }
}

impl Timer for ManualTimer {
    fn start(&mut self, tag: TimerTag, duration_secs: u32) {
        self.with_state(|s| {
            s.countdown = Some(Countdown::new(tag, duration_secs));
            s.starts += 1;
        });
    }

    fn stop(&mut self) {
        self.with_state(|s| {
            if let Some(countdown) = s.countdown.as_mut() {
                countdown.stop();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAG: TimerTag = TimerTag {
        round: 1,
        question: 0,
    };

    #[test]
    fn countdown_ticks_then_expires_once() {
        let mut countdown = Countdown::new(TAG, 3);
        assert_eq!(
            countdown.tick(),
            vec![TimerEvent::Tick {
                tag: TAG,
                remaining: 2
            }]
        );
        assert_eq!(countdown.tick().len(), 1);
        assert_eq!(
            countdown.tick(),
            vec![
                TimerEvent::Tick {
                    tag: TAG,
                    remaining: 0
                },
                TimerEvent::Expired { tag: TAG },
            ]
        );
        assert!(countdown.is_expired());
        assert!(countdown.tick().is_empty());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut countdown = Countdown::new(TAG, 15);
        countdown.stop();
        countdown.stop();
        assert!(!countdown.is_running());
        assert!(countdown.tick().is_empty());
        assert_eq!(countdown.remaining(), 15);
    }

    #[test]
    fn stopping_an_expired_countdown_keeps_it_expired() {
        let mut countdown = Countdown::new(TAG, 1);
        countdown.tick();
        countdown.stop();
        assert!(countdown.is_expired());
    }

    #[test]
    fn manual_timer_restart_replaces_countdown() {
        let mut timer = ManualTimer::new();
        let probe = timer.clone();
        timer.start(TAG, 15);
        probe.fire();

        let next = TimerTag {
            round: 1,
            question: 1,
        };
        timer.start(next, 15);
        assert_eq!(probe.active_tag(), Some(next));
        assert_eq!(probe.starts(), 2);

        let events = probe.run_out();
        assert_eq!(events.len(), 16);
        assert_eq!(events.last(), Some(&TimerEvent::Expired { tag: next }));
        assert!(!probe.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_countdown_delivers_ticks_and_expiry() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_countdown(TAG, 3, tx);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        assert_eq!(
            events,
            vec![
                TimerEvent::Tick {
                    tag: TAG,
                    remaining: 2
                },
                TimerEvent::Tick {
                    tag: TAG,
                    remaining: 1
                },
                TimerEvent::Tick {
                    tag: TAG,
                    remaining: 0
                },
                TimerEvent::Expired { tag: TAG },
            ]
        );
        tokio::task::yield_now().await;
        assert!(handle.is_finished());
        assert_eq!(handle.tag(), TAG);

        // Stopping after expiry is harmless.
        handle.stop();
        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_timer_stop_cancels_pending_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = TokioTimer::new(tx);
        timer.start(TAG, 15);

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        timer.stop();
        timer.stop();
        tokio::time::sleep(Duration::from_secs(30)).await;

        let mut ticks = 0;
        while let Ok(event) = rx.try_recv() {
            assert!(matches!(event, TimerEvent::Tick { .. }));
            ticks += 1;
        }
        assert_eq!(ticks, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_timer_restart_abandons_old_tag() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = TokioTimer::new(tx);
        timer.start(TAG, 15);
        tokio::time::sleep(Duration::from_millis(1_500)).await;

        let next = TimerTag {
            round: 1,
            question: 1,
        };
        timer.start(next, 2);
        tokio::time::sleep(Duration::from_secs(20)).await;
        drop(timer);

        let mut tags = Vec::new();
        while let Ok(event) = rx.try_recv() {
            tags.push(event.tag());
        }
        assert_eq!(tags, vec![TAG, next, next, next]);
    }
}
