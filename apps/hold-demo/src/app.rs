//! Demo screen: a long and a short hold button.
//!
//! Each card toggles its "done" flag when a hold completes, paints a
//! progress bar into its background while held, and resets the background
//! when the hold is abandoned.

use crate::config::DemoConfig;
use holdpress_core::TimerHandle;
use holdpress_foundation::{HoldButton, PointerEvent};
use std::cell::RefCell;
use std::rc::Rc;

pub const IDLE_BACKGROUND: &str = "inherit";

/// Background that fills the card from the left up to `progress`.
pub fn progress_background(progress: f64) -> String {
    let percent = progress * 100.0;
    format!("linear-gradient(to right, #1A1A1A {percent}%, transparent {percent}%)")
}

#[derive(Clone, Debug, PartialEq)]
pub struct HoldCardState {
    pub done: bool,
    pub background: String,
}

impl Default for HoldCardState {
    fn default() -> Self {
        Self {
            done: false,
            background: IDLE_BACKGROUND.to_string(),
        }
    }
}

pub struct HoldCard {
    name: &'static str,
    state: Rc<RefCell<HoldCardState>>,
    button: HoldButton,
}

impl HoldCard {
    pub fn new(name: &'static str, timers: TimerHandle, delay_ms: Option<f64>) -> Self {
        let state = Rc::new(RefCell::new(HoldCardState::default()));
        let mut button = HoldButton::new(timers).on_hold_start({
            let state = Rc::clone(&state);
            move |promise, _event| {
                let on_done = Rc::clone(&state);
                let on_abandon = Rc::clone(&state);
                let on_progress = Rc::clone(&state);
                promise.then(
                    move |_| {
                        let mut state = on_done.borrow_mut();
                        state.done = !state.done;
                        log::info!("{name} hold confirmed; done = {}", state.done);
                    },
                    move |release: PointerEvent| {
                        on_abandon.borrow_mut().background = IDLE_BACKGROUND.to_string();
                        log::info!("{name} hold abandoned at {:?}", release.position);
                    },
                    move |progress| {
                        on_progress.borrow_mut().background = progress_background(progress);
                    },
                );
            }
        });
        button.set_delay(delay_ms);
        Self {
            name,
            state,
            button,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> HoldCardState {
        self.state.borrow().clone()
    }

    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> bool {
        self.button.handle_pointer_event(event)
    }

    pub fn button(&self) -> &HoldButton {
        &self.button
    }
}

/// Which card a scripted pointer event targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardId {
    Long,
    Short,
}

pub struct DemoApp {
    long: HoldCard,
    short: HoldCard,
}

impl DemoApp {
    pub fn new(timers: TimerHandle, config: &DemoConfig) -> Self {
        Self {
            long: HoldCard::new("long", timers.clone(), config.long_delay_ms),
            short: HoldCard::new("short", timers, config.short_delay_ms),
        }
    }

    pub fn card(&self, id: CardId) -> &HoldCard {
        match id {
            CardId::Long => &self.long,
            CardId::Short => &self.short,
        }
    }

    pub fn card_mut(&mut self, id: CardId) -> &mut HoldCard {
        match id {
            CardId::Long => &mut self.long,
            CardId::Short => &mut self.short,
        }
    }

    pub fn cards(&self) -> [&HoldCard; 2] {
        [&self.long, &self.short]
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
