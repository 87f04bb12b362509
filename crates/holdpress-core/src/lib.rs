#![doc = r"Core runtime pieces for holdpress: the interval timeline and progress promises."]

pub mod deferred;
pub mod interval;
pub mod platform;

pub use deferred::{Deferred, Outcome, Promise, PromiseError, PromiseObserver};
pub use interval::{IntervalId, IntervalRegistration, TimerHandle, TimerRuntime};
pub use platform::{Clock, StdClock};
