//! Press-and-hold gesture recogniser.
//!
//! A press starts a [`HoldSession`] that ticks every
//! [`HOLD_TICK_INTERVAL_MS`] until `hold_duration / tick_interval` ticks have
//! elapsed. Each tick reports a progress fraction through the session's
//! [`HoldPromise`]; the final tick resolves it. Releasing early stops the
//! timer and rejects the promise with the release event.
//!
//! The reported fraction is `(elapsed_ticks + 1) / total_ticks`, so a hold
//! reports one step ahead of the time actually elapsed and its last
//! notification exceeds `1.0` by one step. Progress-bar consumers have been
//! tuned against these values; keep the formula as is.

use crate::gesture_constants::{DEFAULT_HOLD_DELAY_MS, HOLD_TICK_INTERVAL_MS};
use crate::nodes::input::types::PointerEvent;
use holdpress_core::{Deferred, IntervalRegistration, Promise, TimerHandle};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Consumer side of a hold: progress fractions, then either `Resolved(())`
/// when the hold completes or `Rejected(event)` carrying the release.
pub type HoldPromise = Promise<(), PointerEvent>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldStatus {
    Pending,
    Completed,
    Cancelled,
}

impl HoldStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, HoldStatus::Pending)
    }
}

/// State of one press/release attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoldSession {
    hold_duration_ms: f64,
    total_ticks: f64,
    elapsed_ticks: u32,
    status: HoldStatus,
}

struct TickReport {
    progress: f64,
    completed: bool,
}

impl HoldSession {
    fn start(hold_duration_ms: f64) -> Self {
        Self {
            hold_duration_ms,
            total_ticks: hold_duration_ms / HOLD_TICK_INTERVAL_MS as f64,
            elapsed_ticks: 0,
            status: HoldStatus::Pending,
        }
    }

    pub fn hold_duration_ms(&self) -> f64 {
        self.hold_duration_ms
    }

    pub fn tick_interval_ms(&self) -> u64 {
        HOLD_TICK_INTERVAL_MS
    }

    /// `hold_duration / tick_interval`. Not rounded.
    pub fn total_ticks(&self) -> f64 {
        self.total_ticks
    }

    /// Number of timer invocations scheduled for this session: the timer
    /// stops once its iteration count reaches `total_ticks`.
    pub fn tick_limit(&self) -> u32 {
        self.total_ticks.ceil() as u32
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    pub fn status(&self) -> HoldStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == HoldStatus::Pending
    }

    fn tick(&mut self) -> Option<TickReport> {
        if !self.is_pending() {
            return None;
        }
        self.elapsed_ticks += 1;
        let elapsed = f64::from(self.elapsed_ticks);
        let progress = (elapsed + 1.0) / self.total_ticks;
        // Exact comparison: a non-integral tick count never completes on its
        // own and stays pending until release.
        let completed = elapsed == self.total_ticks;
        if completed {
            self.status = HoldStatus::Completed;
        }
        Some(TickReport {
            progress,
            completed,
        })
    }

    fn cancel(&mut self) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.status = HoldStatus::Cancelled;
        true
    }
}

/// Effective hold duration for a configured delay: anything other than a
/// positive finite number falls back to [`DEFAULT_HOLD_DELAY_MS`].
pub fn resolve_hold_delay(delay_ms: Option<f64>) -> f64 {
    match delay_ms {
        Some(delay) if delay.is_finite() && delay > 0.0 => delay,
        _ => DEFAULT_HOLD_DELAY_MS,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum HoldDelayError {
    Empty,
    NotANumber { input: String },
    NotPositive { value: f64 },
}

impl fmt::Display for HoldDelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoldDelayError::Empty => write!(f, "hold delay is empty"),
            HoldDelayError::NotANumber { input } => {
                write!(f, "hold delay {input:?} is not a finite number")
            }
            HoldDelayError::NotPositive { value } => {
                write!(f, "hold delay {value}ms is not positive")
            }
        }
    }
}

impl std::error::Error for HoldDelayError {}

/// Parses a textual delay attribute, in milliseconds.
///
/// Adapters that receive configuration as strings use this at the edge and
/// pass the typed value (or `None` on error) to the gesture.
pub fn parse_hold_delay(input: &str) -> Result<f64, HoldDelayError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(HoldDelayError::Empty);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| HoldDelayError::NotANumber {
            input: trimmed.to_string(),
        })?;
    if !value.is_finite() {
        return Err(HoldDelayError::NotANumber {
            input: trimmed.to_string(),
        });
    }
    if value <= 0.0 {
        return Err(HoldDelayError::NotPositive { value });
    }
    Ok(value)
}

struct ActiveHold {
    session: Rc<RefCell<HoldSession>>,
    deferred: Rc<Deferred<(), PointerEvent>>,
    registration: Option<IntervalRegistration>,
}

impl ActiveHold {
    /// Stops the timer and cancels the session if it is still pending.
    fn finish(mut self, event: &PointerEvent) -> HoldStatus {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        let cancelled = self.session.borrow_mut().cancel();
        if cancelled {
            let elapsed = self.session.borrow().elapsed_ticks();
            log::debug!("hold cancelled after {elapsed} ticks");
            self.deferred.reject(event.clone());
        }
        self.session.borrow().status()
    }
}

fn on_tick(session: &RefCell<HoldSession>, deferred: &Deferred<(), PointerEvent>) {
    let report = session.borrow_mut().tick();
    let Some(report) = report else {
        return;
    };
    log::trace!("hold progress {}", report.progress);
    deferred.notify(report.progress);
    if report.completed {
        log::debug!("hold completed");
        deferred.resolve(());
    }
}

/// Hold-to-confirm recogniser for a single element.
///
/// At most one session is live at a time. A press that arrives while a
/// session is still pending cancels that session (its promise is rejected
/// with the new press event) and starts a fresh one.
pub struct HoldGesture {
    timers: TimerHandle,
    active: Option<ActiveHold>,
}

impl HoldGesture {
    pub fn new(timers: TimerHandle) -> Self {
        Self {
            timers,
            active: None,
        }
    }

    /// Begins a hold. `delay_ms` is read once, here.
    pub fn on_press_start(&mut self, delay_ms: Option<f64>, event: &PointerEvent) -> HoldPromise {
        if let Some(previous) = self.active.take() {
            if previous.session.borrow().is_pending() {
                log::debug!("press started during a pending hold; restarting");
            }
            previous.finish(event);
        }

        let session = Rc::new(RefCell::new(HoldSession::start(resolve_hold_delay(
            delay_ms,
        ))));
        let (deferred, promise) = Deferred::new();
        let deferred = Rc::new(deferred);
        let tick_limit = session.borrow().tick_limit();

        let registration = self.timers.register_interval(
            HOLD_TICK_INTERVAL_MS,
            Some(tick_limit),
            {
                let session = Rc::clone(&session);
                let deferred = Rc::clone(&deferred);
                move |_| on_tick(&session, &deferred)
            },
        );
        if registration.id().is_none() {
            log::debug!("timer runtime unavailable; hold will not progress");
        }
        log::debug!(
            "hold started: {}ms over {} ticks",
            session.borrow().hold_duration_ms(),
            session.borrow().total_ticks()
        );

        self.active = Some(ActiveHold {
            session,
            deferred,
            registration: Some(registration),
        });
        promise
    }

    /// Ends the current press. The event is consumed whether or not a hold
    /// was active. Returns the final status of the session that ended, if
    /// there was one.
    pub fn on_press_end(&mut self, event: &PointerEvent) -> Option<HoldStatus> {
        event.consume();
        let active = self.active.take()?;
        Some(active.finish(event))
    }

    /// Snapshot of the current (or most recently completed) session.
    pub fn session(&self) -> Option<HoldSession> {
        self.active.as_ref().map(|active| *active.session.borrow())
    }

    pub fn status(&self) -> Option<HoldStatus> {
        self.session().map(|session| session.status())
    }

    /// Whether a press is currently being held towards completion.
    pub fn is_holding(&self) -> bool {
        self.status() == Some(HoldStatus::Pending)
    }
}

#[cfg(test)]
#[path = "tests/hold_tests.rs"]
mod tests;
