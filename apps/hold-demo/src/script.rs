//! Scripted pointer session that stands in for a real user.

use crate::app::{CardId, DemoApp};
use crate::config::DemoConfig;
use holdpress_core::{Clock, TimerRuntime};
use holdpress_foundation::{Point, PointerDispatcher, PointerEvent, PointerEventKind};
use std::time::Duration;

/// Pause between scripted gestures, in milliseconds.
const GAP_MS: u64 = 200;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScriptStep {
    pub at_ms: u64,
    pub card: CardId,
    pub kind: PointerEventKind,
}

impl ScriptStep {
    fn event(&self) -> PointerEvent {
        let position = match self.card {
            CardId::Long => Point::new(120.0, 40.0),
            CardId::Short => Point::new(120.0, 120.0),
        };
        match self.kind {
            PointerEventKind::Down => PointerEvent::down(position),
            kind => PointerEvent::new(kind, position),
        }
    }
}

/// Short hold to completion, long hold abandoned halfway, then long hold to
/// completion.
pub fn default_script(config: &DemoConfig) -> Vec<ScriptStep> {
    let (short, long) = config.effective_delays();
    let short = short.ceil() as u64;
    let long = long.ceil() as u64;

    let mut steps = Vec::with_capacity(6);
    let mut at_ms = GAP_MS;
    let mut hold = |card: CardId, duration: u64, at_ms: &mut u64| {
        steps.push(ScriptStep {
            at_ms: *at_ms,
            card,
            kind: PointerEventKind::Down,
        });
        *at_ms += duration;
        steps.push(ScriptStep {
            at_ms: *at_ms,
            card,
            kind: PointerEventKind::Up,
        });
        *at_ms += GAP_MS;
    };
    hold(CardId::Short, short + 50, &mut at_ms);
    hold(CardId::Long, long / 2, &mut at_ms);
    hold(CardId::Long, long + 50, &mut at_ms);
    steps
}

pub struct ScriptRunner {
    script: Vec<ScriptStep>,
    cursor: usize,
    dispatcher: PointerDispatcher,
}

impl ScriptRunner {
    pub fn new(script: Vec<ScriptStep>) -> Self {
        Self {
            script,
            cursor: 0,
            dispatcher: PointerDispatcher::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.script.len()
    }

    /// Delivers every step due at or before `now_ms`, advancing the timers
    /// to each step's time first so ticks and pointer events interleave in
    /// time order.
    pub fn run_until(&mut self, app: &mut DemoApp, runtime: &TimerRuntime, now_ms: u64) {
        while let Some(step) = self
            .script
            .get(self.cursor)
            .copied()
            .filter(|step| step.at_ms <= now_ms)
        {
            runtime.advance_to(step.at_ms);
            log::debug!("{:?} {:?} at {}ms", step.card, step.kind, step.at_ms);
            self.dispatcher.push(step.event());
            let card = app.card_mut(step.card);
            self.dispatcher.drain(|event| {
                card.handle_pointer_event(&event);
            });
            self.cursor += 1;
        }
        runtime.advance_to(now_ms);
    }

    /// Runs the whole script on the virtual timeline without sleeping.
    pub fn run_virtual(&mut self, app: &mut DemoApp, runtime: &TimerRuntime) {
        let end = self.script.last().map_or(0, |step| step.at_ms);
        self.run_until(app, runtime, end + GAP_MS);
    }

    /// Runs the script against a real clock, sleeping between polls.
    pub fn run_realtime<C: Clock>(&mut self, app: &mut DemoApp, runtime: &TimerRuntime, clock: &C) {
        let start = clock.now();
        loop {
            let now = clock.elapsed_millis(start);
            self.run_until(app, runtime, now);
            if self.is_finished() && !runtime.has_pending_intervals() {
                break;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
    }
}
