//! Three-channel promise: progress notifications followed by exactly one
//! settlement.
//!
//! A [`Deferred`] is the producer side and a [`Promise`] the single consumer.
//! Notifications are queued and delivered strictly in the order they were
//! produced; the settlement is always the last thing a consumer sees.
//! Delivery never holds a `RefCell` borrow while calling into the observer,
//! so observers may call back into whatever owns the `Deferred`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// Final result carried by a settled promise.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<T, E> {
    Resolved(T),
    Rejected(E),
}

impl<T, E> Outcome<T, E> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Outcome::Resolved(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromiseError {
    /// The settlement was already handed out by an earlier call.
    AlreadyConsumed,
}

impl fmt::Display for PromiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromiseError::AlreadyConsumed => write!(f, "promise outcome already consumed"),
        }
    }
}

impl std::error::Error for PromiseError {}

/// Receives the notifications of a [`Promise`].
pub trait PromiseObserver<T, E> {
    fn on_progress(&mut self, _progress: f64) {}

    fn on_resolved(&mut self, value: T);

    fn on_rejected(&mut self, reason: E);
}

enum Notification<T, E> {
    Progress(f64),
    Settled(Outcome<T, E>),
}

struct DeferredState<T, E> {
    queue: VecDeque<Notification<T, E>>,
    observer: Option<Box<dyn PromiseObserver<T, E>>>,
    settled: bool,
    detached: bool,
    outcome_taken: bool,
    waker: Option<Waker>,
}

impl<T, E> DeferredState<T, E> {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            observer: None,
            settled: false,
            detached: false,
            outcome_taken: false,
            waker: None,
        }
    }
}

type SharedState<T, E> = Rc<RefCell<DeferredState<T, E>>>;

/// Producer half. Created together with its [`Promise`] by [`Deferred::new`].
pub struct Deferred<T, E> {
    state: SharedState<T, E>,
}

impl<T: 'static, E: 'static> Deferred<T, E> {
    pub fn new() -> (Self, Promise<T, E>) {
        let state = Rc::new(RefCell::new(DeferredState::new()));
        (
            Self {
                state: Rc::clone(&state),
            },
            Promise { state },
        )
    }

    pub fn is_settled(&self) -> bool {
        self.state.borrow().settled
    }

    /// Sends a progress notification. Ignored once settled.
    pub fn notify(&self, progress: f64) -> bool {
        self.push(Notification::Progress(progress), false)
    }

    /// Settles successfully. Returns `false` if already settled.
    pub fn resolve(&self, value: T) -> bool {
        self.push(Notification::Settled(Outcome::Resolved(value)), true)
    }

    /// Settles with a rejection. Returns `false` if already settled.
    pub fn reject(&self, reason: E) -> bool {
        self.push(Notification::Settled(Outcome::Rejected(reason)), true)
    }

    fn push(&self, notification: Notification<T, E>, settles: bool) -> bool {
        let waker = {
            let mut state = self.state.borrow_mut();
            if state.settled {
                return false;
            }
            if settles {
                state.settled = true;
            }
            if !state.detached {
                state.queue.push_back(notification);
            }
            if settles {
                state.waker.take()
            } else {
                None
            }
        };
        if let Some(waker) = waker {
            waker.wake();
        }
        drain(&self.state);
        true
    }
}

/// Delivers queued notifications to the observer, if one is installed and
/// no delivery is already running further up the stack.
fn drain<T, E>(state: &SharedState<T, E>) {
    let Some(mut observer) = state.borrow_mut().observer.take() else {
        return;
    };
    loop {
        let next = state.borrow_mut().queue.pop_front();
        match next {
            Some(Notification::Progress(progress)) => observer.on_progress(progress),
            Some(Notification::Settled(Outcome::Resolved(value))) => {
                observer.on_resolved(value);
                state.borrow_mut().outcome_taken = true;
                return;
            }
            Some(Notification::Settled(Outcome::Rejected(reason))) => {
                observer.on_rejected(reason);
                state.borrow_mut().outcome_taken = true;
                return;
            }
            None => break,
        }
    }
    state.borrow_mut().observer = Some(observer);
}

/// Consumer half of a [`Deferred`].
///
/// Subscribing consumes the promise, so there is never more than one
/// observer. Notifications produced before subscription are buffered and
/// replayed in order. Dropping an unsubscribed promise detaches it and later
/// notifications are discarded.
pub struct Promise<T, E> {
    state: SharedState<T, E>,
}

impl<T: 'static, E: 'static> Promise<T, E> {
    pub fn subscribe(self, observer: impl PromiseObserver<T, E> + 'static) {
        self.state.borrow_mut().observer = Some(Box::new(observer));
        drain(&self.state);
    }

    /// Closure form of [`Promise::subscribe`], mirroring the classic
    /// `then(success, failure, progress)` shape.
    pub fn then(
        self,
        on_resolved: impl FnMut(T) + 'static,
        on_rejected: impl FnMut(E) + 'static,
        on_progress: impl FnMut(f64) + 'static,
    ) {
        self.subscribe(Callbacks {
            on_resolved,
            on_rejected,
            on_progress,
        });
    }

    pub fn is_settled(&self) -> bool {
        self.state.borrow().settled
    }

    /// Drains buffered progress and returns the settlement if there is one.
    ///
    /// `Ok(None)` means the promise is still pending. Once the outcome has
    /// been returned, later calls fail with [`PromiseError::AlreadyConsumed`].
    pub fn take_outcome(&mut self) -> Result<Option<Outcome<T, E>>, PromiseError> {
        let mut state = self.state.borrow_mut();
        if state.outcome_taken {
            return Err(PromiseError::AlreadyConsumed);
        }
        while let Some(notification) = state.queue.pop_front() {
            if let Notification::Settled(outcome) = notification {
                state.outcome_taken = true;
                return Ok(Some(outcome));
            }
        }
        Ok(None)
    }
}

impl<T: 'static, E: 'static> Future for Promise<T, E> {
    type Output = Outcome<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match this.take_outcome() {
            Ok(Some(outcome)) => Poll::Ready(outcome),
            Ok(None) => {
                this.state.borrow_mut().waker = Some(cx.waker().clone());
                Poll::Pending
            }
            // Polling after completion is a contract violation for futures;
            // stay pending rather than panic.
            Err(PromiseError::AlreadyConsumed) => Poll::Pending,
        }
    }
}

impl<T, E> Drop for Promise<T, E> {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.observer.is_none() {
            state.detached = true;
            state.queue.clear();
        }
    }
}

struct Callbacks<R, J, P> {
    on_resolved: R,
    on_rejected: J,
    on_progress: P,
}

impl<T, E, R, J, P> PromiseObserver<T, E> for Callbacks<R, J, P>
where
    R: FnMut(T),
    J: FnMut(E),
    P: FnMut(f64),
{
    fn on_progress(&mut self, progress: f64) {
        (self.on_progress)(progress);
    }

    fn on_resolved(&mut self, value: T) {
        (self.on_resolved)(value);
    }

    fn on_rejected(&mut self, reason: E) {
        (self.on_rejected)(reason);
    }
}

#[cfg(test)]
#[path = "tests/deferred_tests.rs"]
mod tests;
