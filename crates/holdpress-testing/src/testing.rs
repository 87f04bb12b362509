use holdpress_core::{Outcome, Promise, PromiseObserver, TimerRuntime};
use holdpress_foundation::{
    HoldButton, HoldSession, HoldStatus, Point, PointerDispatcher, PointerEvent, PointerEventKind,
};
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

/// One notification observed on a hold promise.
#[derive(Clone, Debug, PartialEq)]
pub enum HoldEvent {
    Progress(f64),
    Completed,
    Cancelled(PointerEvent),
}

/// Observer that records every notification of one hold session.
#[derive(Clone, Default)]
pub struct HoldRecorder {
    events: Rc<RefCell<Vec<HoldEvent>>>,
}

impl HoldRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<HoldEvent> {
        self.events.borrow().clone()
    }

    pub fn progress_values(&self) -> Vec<f64> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                HoldEvent::Progress(value) => Some(*value),
                _ => None,
            })
            .collect()
    }

    pub fn completions(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| matches!(event, HoldEvent::Completed))
            .count()
    }

    pub fn cancellations(&self) -> Vec<PointerEvent> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                HoldEvent::Cancelled(release) => Some(release.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of completion and cancellation notifications combined.
    pub fn terminal_count(&self) -> usize {
        self.completions() + self.cancellations().len()
    }

    pub fn last(&self) -> Option<HoldEvent> {
        self.events.borrow().last().cloned()
    }
}

impl PromiseObserver<(), PointerEvent> for HoldRecorder {
    fn on_progress(&mut self, progress: f64) {
        self.events.borrow_mut().push(HoldEvent::Progress(progress));
    }

    fn on_resolved(&mut self, _value: ()) {
        self.events.borrow_mut().push(HoldEvent::Completed);
    }

    fn on_rejected(&mut self, reason: PointerEvent) {
        self.events.borrow_mut().push(HoldEvent::Cancelled(reason));
    }
}

/// Headless harness for exercising a hold button.
///
/// `HoldTestRule` owns a manual timer runtime and one [`HoldButton`] whose
/// action subscribes a fresh [`HoldRecorder`] on every press, so each
/// press/release cycle can be inspected on its own. Time only moves when the
/// test advances it.
pub struct HoldTestRule {
    runtime: TimerRuntime,
    button: HoldButton,
    sessions: Rc<RefCell<Vec<HoldRecorder>>>,
    dispatcher: PointerDispatcher,
    position: Point,
}

impl HoldTestRule {
    /// Create a rule whose button uses `delay_ms` (or the default delay).
    pub fn new(delay_ms: Option<f64>) -> Self {
        let runtime = TimerRuntime::new();
        let sessions: Rc<RefCell<Vec<HoldRecorder>>> = Rc::new(RefCell::new(Vec::new()));
        let mut button = HoldButton::new(runtime.handle()).on_hold_start({
            let sessions = Rc::clone(&sessions);
            move |promise, _event| {
                let recorder = HoldRecorder::new();
                sessions.borrow_mut().push(recorder.clone());
                promise.subscribe(recorder);
            }
        });
        button.set_delay(delay_ms);
        Self {
            runtime,
            button,
            sessions,
            dispatcher: PointerDispatcher::new(),
            position: Point::new(8.0, 8.0),
        }
    }

    /// Press the button and return the press event that was dispatched.
    pub fn press(&mut self) -> PointerEvent {
        self.dispatch(PointerEvent::down(self.position))
    }

    /// Release the button and return the release event that was dispatched.
    pub fn release(&mut self) -> PointerEvent {
        self.dispatch(PointerEvent::up(self.position))
    }

    /// Deliver a platform pointer cancellation.
    pub fn cancel_pointer(&mut self) -> PointerEvent {
        self.dispatch(PointerEvent::new(PointerEventKind::Cancel, self.position))
    }

    /// Press, then keep holding for `duration_ms`.
    pub fn hold_for(&mut self, duration_ms: u64) -> PointerEvent {
        let press = self.press();
        self.advance_by(duration_ms);
        press
    }

    /// Queue `event` and route it to the button through the dispatcher.
    pub fn dispatch(&mut self, event: PointerEvent) -> PointerEvent {
        self.dispatcher.push(event.clone());
        let button = &mut self.button;
        self.dispatcher.drain(|queued| {
            button.handle_pointer_event(&queued);
        });
        event
    }

    pub fn advance_by(&mut self, delta_ms: u64) {
        self.runtime.advance_by(delta_ms);
    }

    pub fn advance_to(&mut self, target_ms: u64) {
        self.runtime.advance_to(target_ms);
    }

    pub fn now_millis(&self) -> u64 {
        self.runtime.now_millis()
    }

    pub fn set_delay(&mut self, delay_ms: Option<f64>) {
        self.button.set_delay(delay_ms);
    }

    /// Recorders for every press so far, oldest first.
    pub fn sessions(&self) -> Vec<HoldRecorder> {
        self.sessions.borrow().clone()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.borrow().len()
    }

    /// Recorder of the most recent press.
    pub fn current(&self) -> Option<HoldRecorder> {
        self.sessions.borrow().last().cloned()
    }

    pub fn hold_session(&self) -> Option<HoldSession> {
        self.button.gesture().session()
    }

    pub fn status(&self) -> Option<HoldStatus> {
        self.button.gesture().status()
    }

    pub fn has_pending_ticks(&self) -> bool {
        self.runtime.has_pending_intervals()
    }

    pub fn runtime(&self) -> &TimerRuntime {
        &self.runtime
    }

    pub fn button_mut(&mut self) -> &mut HoldButton {
        &mut self.button
    }
}

impl Default for HoldTestRule {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Convenience helper for tests that only need temporary access to a
/// `HoldTestRule`.
pub fn run_hold_test<R>(delay_ms: Option<f64>, f: impl FnOnce(&mut HoldTestRule) -> R) -> R {
    let mut rule = HoldTestRule::new(delay_ms);
    f(&mut rule)
}

/// Polls a promise once without an executor.
pub fn poll_promise<T: 'static, E: 'static>(promise: &mut Promise<T, E>) -> Poll<Outcome<T, E>> {
    let mut cx = Context::from_waker(futures_task::noop_waker_ref());
    Pin::new(promise).poll(&mut cx)
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
