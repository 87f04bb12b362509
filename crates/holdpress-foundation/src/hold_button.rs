//! Element adapter that turns pointer input into hold gestures.
//!
//! A `HoldButton` is bound once per pressable element. Its configuration is
//! plain typed values: an optional delay and an optional action that receives
//! each new [`HoldPromise`] together with the press event that started it.

use crate::nodes::input::gestures::{HoldGesture, HoldPromise, HoldStatus};
use crate::nodes::input::types::{PointerEvent, PointerEventKind};
use holdpress_core::TimerHandle;

pub type HoldStartHandler = Box<dyn FnMut(HoldPromise, &PointerEvent)>;

pub struct HoldButton {
    gesture: HoldGesture,
    delay_ms: Option<f64>,
    on_hold_start: Option<HoldStartHandler>,
}

impl HoldButton {
    pub fn new(timers: TimerHandle) -> Self {
        Self {
            gesture: HoldGesture::new(timers),
            delay_ms: None,
            on_hold_start: None,
        }
    }

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Installs the action run on every press.
    ///
    /// The action owns the promise; it usually subscribes right away. Without
    /// an action the hold still runs and settles, unobserved.
    pub fn on_hold_start(
        mut self,
        handler: impl FnMut(HoldPromise, &PointerEvent) + 'static,
    ) -> Self {
        self.on_hold_start = Some(Box::new(handler));
        self
    }

    /// Changes the delay used by the next press. A hold already in progress
    /// keeps the delay it started with.
    pub fn set_delay(&mut self, delay_ms: Option<f64>) {
        self.delay_ms = delay_ms;
    }

    pub fn delay(&self) -> Option<f64> {
        self.delay_ms
    }

    pub fn gesture(&self) -> &HoldGesture {
        &self.gesture
    }

    pub fn press(&mut self, event: &PointerEvent) {
        let promise = self.gesture.on_press_start(self.delay_ms, event);
        match self.on_hold_start.as_mut() {
            Some(handler) => handler(promise, event),
            None => log::trace!("hold button has no action; hold runs unobserved"),
        }
    }

    pub fn release(&mut self, event: &PointerEvent) -> Option<HoldStatus> {
        self.gesture.on_press_end(event)
    }

    /// Routes a pointer event: `Down` starts a hold, `Up` and `Cancel` end
    /// it. Returns `false` for events the button ignores.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                self.press(event);
                true
            }
            kind if kind.ends_press() => {
                self.release(event);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "tests/hold_button_tests.rs"]
mod tests;
