use crate::geometry::Point;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

impl PointerEventKind {
    /// Whether this event ends a press (release or platform cancellation).
    pub fn ends_press(self) -> bool {
        matches!(self, PointerEventKind::Up | PointerEventKind::Cancel)
    }
}

/// Pointer event with consumption tracking.
///
/// Consuming an event is how a handler stops it from propagating to other
/// handlers; a hold gesture consumes every release it handles. Clones share
/// the consumption flag, so the copy a cancellation carries reports the same
/// state as the event the host dispatched.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point) -> Self {
        Self {
            kind,
            position,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn down(position: Point) -> Self {
        Self::new(PointerEventKind::Down, position)
    }

    pub fn up(position: Point) -> Self {
        Self::new(PointerEventKind::Up, position)
    }

    /// Mark this event as consumed, preventing other handlers from processing it.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }

    /// True if `other` is this very event (or a clone of it), as opposed to
    /// an equal-looking event dispatched separately.
    pub fn is_same_event(&self, other: &PointerEvent) -> bool {
        Rc::ptr_eq(&self.consumed, &other.consumed)
    }
}
