//! Foundation elements for holdpress: pointer input and the hold-to-confirm gesture

pub mod geometry;
pub mod gesture_constants;
pub mod hold_button;
pub mod nodes;

// Re-export commonly used items
pub use geometry::Point;
pub use gesture_constants::{DEFAULT_HOLD_DELAY_MS, HOLD_TICK_INTERVAL_MS};
pub use hold_button::{HoldButton, HoldStartHandler};
pub use nodes::input::gestures::{
    parse_hold_delay, resolve_hold_delay, HoldDelayError, HoldGesture, HoldPromise, HoldSession,
    HoldStatus,
};
pub use nodes::input::{PointerDispatcher, PointerEvent, PointerEventKind};

pub mod prelude {
    pub use crate::geometry::Point;
    pub use crate::gesture_constants::*;
    pub use crate::hold_button::HoldButton;
    pub use crate::nodes::input::prelude::*;
}
