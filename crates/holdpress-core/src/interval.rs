//! Single-threaded interval scheduler.
//!
//! `TimerRuntime` owns a virtual timeline measured in milliseconds. Hosts move
//! it forward with [`TimerRuntime::advance_to`] (from a real clock, a frame
//! loop or a test), and every interval whose due time falls inside the
//! advanced window fires in due-time order. Registrations are handed out
//! through a weak [`TimerHandle`] so that widgets never keep the runtime
//! alive on their own.

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

pub type IntervalId = u64;

type IntervalCallback = Rc<RefCell<dyn FnMut(u32) + 'static>>;

struct IntervalEntry {
    id: IntervalId,
    period_ms: u64,
    next_due_ms: u64,
    iteration: u32,
    max_ticks: Option<u32>,
    callback: IntervalCallback,
}

struct TimerRuntimeInner {
    now_ms: Cell<u64>,
    intervals: RefCell<SmallVec<[IntervalEntry; 4]>>,
    next_interval_id: Cell<u64>,
    advancing: Cell<bool>,
}

impl TimerRuntimeInner {
    fn new() -> Self {
        Self {
            now_ms: Cell::new(0),
            intervals: RefCell::new(SmallVec::new()),
            next_interval_id: Cell::new(1),
            advancing: Cell::new(false),
        }
    }

    fn register_interval(
        &self,
        period_ms: u64,
        max_ticks: Option<u32>,
        callback: IntervalCallback,
    ) -> IntervalId {
        let id = self.next_interval_id.get();
        self.next_interval_id.set(id + 1);
        // A zero period would fire forever inside a single advance.
        let period_ms = period_ms.max(1);
        self.intervals.borrow_mut().push(IntervalEntry {
            id,
            period_ms,
            next_due_ms: self.now_ms.get() + period_ms,
            iteration: 0,
            max_ticks,
            callback,
        });
        log::trace!("registered interval {id} every {period_ms}ms (max {max_ticks:?})");
        id
    }

    fn cancel_interval(&self, id: IntervalId) -> bool {
        let mut intervals = self.intervals.borrow_mut();
        match intervals.iter().position(|entry| entry.id == id) {
            Some(index) => {
                intervals.remove(index);
                log::trace!("cancelled interval {id}");
                true
            }
            None => false,
        }
    }

    fn is_registered(&self, id: IntervalId) -> bool {
        self.intervals.borrow().iter().any(|entry| entry.id == id)
    }

    /// Moves the earliest interval due at or before `deadline_ms` one step
    /// forward and returns its callback. The entry is updated before the
    /// callback runs so callbacks are free to cancel or register intervals.
    fn pop_due(&self, deadline_ms: u64) -> Option<(IntervalCallback, u32)> {
        let mut intervals = self.intervals.borrow_mut();
        let index = intervals
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.next_due_ms <= deadline_ms)
            .min_by_key(|(_, entry)| (entry.next_due_ms, entry.id))
            .map(|(index, _)| index)?;

        let entry = &mut intervals[index];
        self.now_ms.set(entry.next_due_ms);
        entry.iteration += 1;
        let iteration = entry.iteration;
        let callback = Rc::clone(&entry.callback);
        let exhausted = entry.max_ticks.is_some_and(|max| iteration >= max);
        if exhausted {
            let id = entry.id;
            intervals.remove(index);
            log::trace!("interval {id} reached its tick limit");
        } else {
            entry.next_due_ms += entry.period_ms;
        }
        Some((callback, iteration))
    }

    fn advance_to(&self, target_ms: u64) {
        if self.advancing.get() {
            log::debug!("ignoring nested timer advance to {target_ms}ms");
            return;
        }
        if target_ms < self.now_ms.get() {
            return;
        }
        self.advancing.set(true);
        while let Some((callback, iteration)) = self.pop_due(target_ms) {
            (callback.borrow_mut())(iteration);
        }
        self.now_ms.set(target_ms);
        self.advancing.set(false);
    }
}

/// Owner of the interval timeline.
///
/// Dropping the runtime invalidates every [`TimerHandle`]; outstanding
/// registrations become inert.
pub struct TimerRuntime {
    inner: Rc<TimerRuntimeInner>,
}

impl TimerRuntime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(TimerRuntimeInner::new()),
        }
    }

    pub fn handle(&self) -> TimerHandle {
        TimerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Current position of the timeline in milliseconds.
    pub fn now_millis(&self) -> u64 {
        self.inner.now_ms.get()
    }

    /// Advances the timeline by `delta_ms`, firing every interval that
    /// becomes due along the way.
    pub fn advance_by(&self, delta_ms: u64) {
        let target = self.inner.now_ms.get().saturating_add(delta_ms);
        self.inner.advance_to(target);
    }

    /// Advances the timeline to the absolute time `target_ms`. Targets in the
    /// past are ignored; time never moves backwards.
    pub fn advance_to(&self, target_ms: u64) {
        self.inner.advance_to(target_ms);
    }

    pub fn has_pending_intervals(&self) -> bool {
        !self.inner.intervals.borrow().is_empty()
    }

    pub fn pending_interval_count(&self) -> usize {
        self.inner.intervals.borrow().len()
    }

    /// Time at which the next interval fires, if any is registered.
    pub fn next_due_millis(&self) -> Option<u64> {
        self.inner
            .intervals
            .borrow()
            .iter()
            .map(|entry| entry.next_due_ms)
            .min()
    }
}

impl Default for TimerRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// Weak, cloneable access to a [`TimerRuntime`].
#[derive(Clone)]
pub struct TimerHandle {
    inner: Weak<TimerRuntimeInner>,
}

impl TimerHandle {
    /// Schedules `callback` every `period_ms`, starting one period from now.
    ///
    /// The callback receives the 1-based iteration number. With
    /// `max_ticks: Some(n)` the interval stops by itself after `n`
    /// invocations; `Some(0)` schedules nothing. If the runtime is gone the
    /// returned registration is inactive.
    pub fn register_interval(
        &self,
        period_ms: u64,
        max_ticks: Option<u32>,
        callback: impl FnMut(u32) + 'static,
    ) -> IntervalRegistration {
        if max_ticks == Some(0) {
            return IntervalRegistration::inactive(self.clone());
        }
        match self.inner.upgrade() {
            Some(inner) => {
                let id =
                    inner.register_interval(period_ms, max_ticks, Rc::new(RefCell::new(callback)));
                IntervalRegistration::new(self.clone(), id)
            }
            None => IntervalRegistration::inactive(self.clone()),
        }
    }

    /// Removes the interval. Returns `false` if it already finished or was
    /// cancelled.
    pub fn cancel_interval(&self, id: IntervalId) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| inner.cancel_interval(id))
    }

    pub fn is_registered(&self, id: IntervalId) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| inner.is_registered(id))
    }

    pub fn now_millis(&self) -> Option<u64> {
        self.inner.upgrade().map(|inner| inner.now_ms.get())
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

/// Keeps an interval scheduled. Dropping or cancelling the registration
/// stops the interval immediately.
pub struct IntervalRegistration {
    handle: TimerHandle,
    id: Option<IntervalId>,
}

impl IntervalRegistration {
    fn new(handle: TimerHandle, id: IntervalId) -> Self {
        Self {
            handle,
            id: Some(id),
        }
    }

    fn inactive(handle: TimerHandle) -> Self {
        Self { handle, id: None }
    }

    pub fn id(&self) -> Option<IntervalId> {
        self.id
    }

    /// Whether the interval is still scheduled to fire.
    pub fn is_active(&self) -> bool {
        self.id.is_some_and(|id| self.handle.is_registered(id))
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.handle.cancel_interval(id);
        }
    }
}

impl Drop for IntervalRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.handle.cancel_interval(id);
        }
    }
}

#[cfg(test)]
#[path = "tests/interval_tests.rs"]
mod tests;
