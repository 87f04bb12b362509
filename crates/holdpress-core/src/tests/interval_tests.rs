use super::*;

use std::cell::RefCell;
use std::rc::Rc;

fn recorder() -> Rc<RefCell<Vec<(u64, u32)>>> {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn interval_fires_once_per_period() {
    let runtime = TimerRuntime::new();
    let handle = runtime.handle();
    let log = recorder();

    let _registration = handle.register_interval(10, None, {
        let log = Rc::clone(&log);
        let handle = handle.clone();
        move |iteration| {
            let now = handle.now_millis().expect("runtime alive");
            log.borrow_mut().push((now, iteration));
        }
    });

    runtime.advance_by(9);
    assert!(log.borrow().is_empty());

    runtime.advance_by(1);
    runtime.advance_by(25);
    assert_eq!(log.borrow().as_slice(), &[(10, 1), (20, 2), (30, 3)]);
    assert_eq!(runtime.now_millis(), 35);
    assert_eq!(runtime.next_due_millis(), Some(40));
}

#[test]
fn interval_stops_after_max_ticks() {
    let runtime = TimerRuntime::new();
    let handle = runtime.handle();
    let log = recorder();

    let registration = handle.register_interval(10, Some(3), {
        let log = Rc::clone(&log);
        move |iteration| log.borrow_mut().push((0, iteration))
    });

    runtime.advance_by(100);
    let iterations: Vec<u32> = log.borrow().iter().map(|(_, it)| *it).collect();
    assert_eq!(iterations, vec![1, 2, 3]);
    assert!(!registration.is_active());
    assert!(!runtime.has_pending_intervals());
}

#[test]
fn zero_max_ticks_schedules_nothing() {
    let runtime = TimerRuntime::new();
    let registration = runtime.handle().register_interval(10, Some(0), |_| {
        panic!("must not fire");
    });

    runtime.advance_by(50);
    assert!(registration.id().is_none());
    assert_eq!(runtime.pending_interval_count(), 0);
}

#[test]
fn dropping_registration_cancels_interval() {
    let runtime = TimerRuntime::new();
    let log = recorder();

    let registration = runtime.handle().register_interval(10, None, {
        let log = Rc::clone(&log);
        move |iteration| log.borrow_mut().push((0, iteration))
    });
    runtime.advance_by(20);
    drop(registration);
    runtime.advance_by(50);

    assert_eq!(log.borrow().len(), 2);
    assert!(!runtime.has_pending_intervals());
}

#[test]
fn explicit_cancel_stops_future_ticks() {
    let runtime = TimerRuntime::new();
    let log = recorder();

    let registration = runtime.handle().register_interval(10, Some(10), {
        let log = Rc::clone(&log);
        move |iteration| log.borrow_mut().push((0, iteration))
    });
    runtime.advance_by(15);
    assert!(registration.is_active());
    registration.cancel();
    runtime.advance_by(100);

    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn intervals_fire_in_due_order_with_registration_tiebreak() {
    let runtime = TimerRuntime::new();
    let handle = runtime.handle();
    let order = Rc::new(RefCell::new(Vec::new()));

    let _slow = handle.register_interval(15, Some(2), {
        let order = Rc::clone(&order);
        move |_| order.borrow_mut().push("slow")
    });
    let _fast = handle.register_interval(10, Some(3), {
        let order = Rc::clone(&order);
        move |_| order.borrow_mut().push("fast")
    });

    runtime.advance_by(30);
    // fast@10, slow@15, fast@20, slow@30 and fast@30 tie; slow registered first.
    assert_eq!(
        order.borrow().as_slice(),
        &["fast", "slow", "fast", "slow", "fast"]
    );
}

#[test]
fn callback_can_cancel_its_own_interval() {
    let runtime = TimerRuntime::new();
    let handle = runtime.handle();
    let slot: Rc<RefCell<Option<IntervalRegistration>>> = Rc::new(RefCell::new(None));
    let count = Rc::new(Cell::new(0));

    let registration = handle.register_interval(10, None, {
        let slot = Rc::clone(&slot);
        let count = Rc::clone(&count);
        move |iteration| {
            count.set(count.get() + 1);
            if iteration == 2 {
                if let Some(registration) = slot.borrow_mut().take() {
                    registration.cancel();
                }
            }
        }
    });
    *slot.borrow_mut() = Some(registration);

    runtime.advance_by(100);
    assert_eq!(count.get(), 2);
    assert!(!runtime.has_pending_intervals());
}

#[test]
fn callback_registered_interval_starts_from_firing_time() {
    let runtime = TimerRuntime::new();
    let handle = runtime.handle();
    let inner_log = recorder();
    let held: Rc<RefCell<Vec<IntervalRegistration>>> = Rc::new(RefCell::new(Vec::new()));

    let _outer = handle.register_interval(10, Some(1), {
        let handle = handle.clone();
        let inner_log = Rc::clone(&inner_log);
        let held = Rc::clone(&held);
        move |_| {
            let timer = handle.clone();
            let inner_log = Rc::clone(&inner_log);
            let registration = handle.register_interval(5, Some(2), move |iteration| {
                let now = timer.now_millis().expect("runtime alive");
                inner_log.borrow_mut().push((now, iteration));
            });
            held.borrow_mut().push(registration);
        }
    });

    runtime.advance_by(30);
    assert_eq!(inner_log.borrow().as_slice(), &[(15, 1), (20, 2)]);
}

#[test]
fn time_never_moves_backwards() {
    let runtime = TimerRuntime::new();
    runtime.advance_to(50);
    runtime.advance_to(20);
    assert_eq!(runtime.now_millis(), 50);
}

#[test]
fn handle_outliving_runtime_is_inert() {
    let runtime = TimerRuntime::new();
    let handle = runtime.handle();
    drop(runtime);

    assert!(!handle.is_alive());
    assert_eq!(handle.now_millis(), None);
    let registration = handle.register_interval(10, None, |_| {});
    assert!(registration.id().is_none());
    assert!(!registration.is_active());
}
