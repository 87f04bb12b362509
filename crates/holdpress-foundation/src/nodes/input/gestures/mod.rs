pub mod hold;

pub use hold::{
    parse_hold_delay, resolve_hold_delay, HoldDelayError, HoldGesture, HoldPromise, HoldSession,
    HoldStatus,
};
