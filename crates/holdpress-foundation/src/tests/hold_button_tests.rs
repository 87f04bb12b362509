use super::*;

use crate::geometry::Point;
use crate::nodes::input::PointerDispatcher;
use holdpress_core::TimerRuntime;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn action_receives_promise_and_press_event() {
    let runtime = TimerRuntime::new();
    let started = Rc::new(Cell::new(0));
    let completed = Rc::new(Cell::new(false));
    let press_position = Rc::new(Cell::new(Point::ZERO));

    let mut button = HoldButton::new(runtime.handle())
        .with_delay(20.0)
        .on_hold_start({
            let started = Rc::clone(&started);
            let completed = Rc::clone(&completed);
            let press_position = Rc::clone(&press_position);
            move |promise, event| {
                started.set(started.get() + 1);
                press_position.set(event.position);
                let completed = Rc::clone(&completed);
                promise.then(move |_| completed.set(true), |_| {}, |_| {});
            }
        });

    let down = PointerEvent::down(Point::new(3.0, 7.0));
    assert!(button.handle_pointer_event(&down));
    runtime.advance_by(20);

    assert_eq!(started.get(), 1);
    assert_eq!(press_position.get(), Point::new(3.0, 7.0));
    assert!(completed.get());
}

#[test]
fn button_without_action_still_completes() {
    let runtime = TimerRuntime::new();
    let mut button = HoldButton::new(runtime.handle()).with_delay(30.0);

    button.press(&PointerEvent::down(Point::ZERO));
    runtime.advance_by(30);

    assert_eq!(button.gesture().status(), Some(HoldStatus::Completed));
}

#[test]
fn pointer_cancel_ends_hold_like_release() {
    let runtime = TimerRuntime::new();
    let rejected = Rc::new(RefCell::new(None));

    let mut button = HoldButton::new(runtime.handle())
        .with_delay(100.0)
        .on_hold_start({
            let rejected = Rc::clone(&rejected);
            move |promise, _| {
                let rejected = Rc::clone(&rejected);
                promise.then(
                    |_| {},
                    move |event: PointerEvent| *rejected.borrow_mut() = Some(event.kind),
                    |_| {},
                );
            }
        });

    button.handle_pointer_event(&PointerEvent::down(Point::ZERO));
    runtime.advance_by(10);
    let cancel = PointerEvent::new(PointerEventKind::Cancel, Point::ZERO);
    assert!(button.handle_pointer_event(&cancel));

    assert_eq!(*rejected.borrow(), Some(PointerEventKind::Cancel));
    assert!(cancel.is_consumed());
}

#[test]
fn move_events_are_ignored() {
    let runtime = TimerRuntime::new();
    let mut button = HoldButton::new(runtime.handle());
    let moved = PointerEvent::new(PointerEventKind::Move, Point::new(1.0, 1.0));

    assert!(!button.handle_pointer_event(&moved));
    assert!(!moved.is_consumed());
    assert_eq!(button.gesture().status(), None);
}

#[test]
fn delay_is_read_on_each_press() {
    let runtime = TimerRuntime::new();
    let mut button = HoldButton::new(runtime.handle()).with_delay(50.0);

    button.press(&PointerEvent::down(Point::ZERO));
    button.set_delay(Some(20.0));
    assert_eq!(
        button.gesture().session().map(|s| s.hold_duration_ms()),
        Some(50.0)
    );
    button.release(&PointerEvent::up(Point::ZERO));

    button.press(&PointerEvent::down(Point::ZERO));
    assert_eq!(
        button.gesture().session().map(|s| s.hold_duration_ms()),
        Some(20.0)
    );

    button.set_delay(None);
    button.release(&PointerEvent::up(Point::ZERO));
    button.press(&PointerEvent::down(Point::ZERO));
    assert_eq!(
        button.gesture().session().map(|s| s.hold_duration_ms()),
        Some(400.0)
    );
}

#[test]
fn dispatcher_delivers_queued_events_in_order() {
    let runtime = TimerRuntime::new();
    let mut button = HoldButton::new(runtime.handle()).with_delay(100.0);
    let mut dispatcher = PointerDispatcher::new();

    dispatcher.push(PointerEvent::down(Point::ZERO));
    dispatcher.push(PointerEvent::new(PointerEventKind::Move, Point::new(2.0, 0.0)));
    assert_eq!(dispatcher.len(), 2);

    let delivered = dispatcher.drain(|event| {
        button.handle_pointer_event(&event);
    });
    assert_eq!(delivered, 2);
    assert!(dispatcher.is_empty());
    assert!(button.gesture().is_holding());

    dispatcher.push(PointerEvent::up(Point::ZERO));
    dispatcher.drain(|event| {
        button.handle_pointer_event(&event);
    });
    assert_eq!(button.gesture().status(), None);
}
