//! The slot-recording capability that makes the heaps in this crate indirect.
//!
//! Classical heap routines support removal only at the root, because once the
//! sifts have moved an element around, nothing remembers where it went. Every
//! element stored in these heaps instead exposes [`PositionAware::set_slot`],
//! which the algorithms invoke each time the element lands in a new slot.
//! Holding on to the latest recorded slot is what lets a caller later say
//! "remove *this* element" via [`pop_heap_at`](crate::pop_heap_at), or
//! re-sift it after a priority change.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::cmp::{Ordering, Reverse};

/// The capability to remember one's own heap slot.
///
/// The heap algorithms call [`set_slot`](Self::set_slot) synchronously every
/// time they write an element into a slot, including when an operation leaves
/// it where it already was. Between operations, the element stored at slot
/// `i` has always been told `i` last.
///
/// Implementations should not panic: the notification also fires while a
/// sift is refilling its hole, where a second panic escalates to an abort.
pub trait PositionAware {
    /// Records that this element now lives at `slot`.
    fn set_slot(&mut self, slot: usize);
}

impl<T: PositionAware + ?Sized> PositionAware for &mut T {
    fn set_slot(&mut self, slot: usize) {
        (**self).set_slot(slot);
    }
}

impl<T: PositionAware + ?Sized> PositionAware for Box<T> {
    fn set_slot(&mut self, slot: usize) {
        (**self).set_slot(slot);
    }
}

/// Shared handles let the recorded slot be read back from outside the heap,
/// which is how callers usually obtain the position for a later removal.
impl<T: PositionAware> PositionAware for Rc<RefCell<T>> {
    fn set_slot(&mut self, slot: usize) {
        self.borrow_mut().set_slot(slot);
    }
}

impl<T: PositionAware> PositionAware for Reverse<T> {
    fn set_slot(&mut self, slot: usize) {
        self.0.set_slot(slot);
    }
}

/// A ready-made element: any value plus its recorded slot.
///
/// Comparisons delegate to `value` alone, so `Slotted<T>` works under
/// [`OrdPriority`](crate::OrdPriority) whenever `T: Ord`, and two `Slotted`s
/// holding equal values are equal-priority ties regardless of where they sit.
#[derive(Debug, Clone)]
pub struct Slotted<T> {
    /// The caller's payload.
    pub value: T,
    /// The slot most recently recorded by a heap operation.
    pub slot: usize,
}

impl<T> Slotted<T> {
    /// Wraps `value`, with a recorded slot of 0 until a heap says otherwise.
    pub fn new(value: T) -> Self {
        Slotted { value, slot: 0 }
    }
}

impl<T> PositionAware for Slotted<T> {
    fn set_slot(&mut self, slot: usize) {
        self.slot = slot;
    }
}

impl<T: PartialEq> PartialEq for Slotted<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Slotted<T> {}

impl<T: PartialOrd> PartialOrd for Slotted<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: Ord> Ord for Slotted<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}
