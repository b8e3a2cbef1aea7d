//! Heap maintenance over caller-owned slices.
//!
//! Every routine here works on a `&mut [T]` that the caller owns outright:
//! the slice *is* the heap. Slot `i`'s children live at `2i + 1` and
//! `2i + 2`, with the root maximal under the supplied [`PriorityOrder`].
//! Growing the slice (before [`push_heap`]) and shrinking it (after
//! [`pop_heap`] or [`pop_heap_at`] have parked the removed element in the
//! last slot) stay in the caller's hands.
//!
//! What sets these routines apart from the classical family is that every
//! element write also notifies the element of its destination slot through
//! [`PositionAware`]. An element, or whoever keeps a handle to it, always
//! knows where it currently sits, which is what makes [`pop_heap_at`] and the
//! re-sift entry points ([`sift_up`], [`sift_down`]) sound for *any* slot
//! rather than only the root.
//!
//! # Examples
//!
//! Heaping shared handles keeps each element's recorded slot readable from
//! outside the heap:
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use cairn::{pop_heap, pop_heap_at, push_heap, OrdPriority, Slotted};
//!
//! let tasks: Vec<Rc<RefCell<Slotted<char>>>> =
//!     ['E', 'A', 'S', 'Y'].map(|c| Rc::new(RefCell::new(Slotted::new(c)))).to_vec();
//!
//! let order = OrdPriority::default();
//! let mut queue = Vec::new();
//! for task in &tasks {
//!     queue.push(Rc::clone(task));
//!     push_heap(&mut queue, &order);
//! }
//! assert_eq!(queue[0].borrow().value, 'Y');
//!
//! // 'A' can leave the queue without waiting to reach the root.
//! let slot = tasks[1].borrow().slot;
//! pop_heap_at(&mut queue, slot, &order);
//! let gone = queue.pop().unwrap();
//! assert!(Rc::ptr_eq(&gone, &tasks[1]));
//!
//! pop_heap(&mut queue, &order);
//! assert_eq!(queue.pop().unwrap().borrow().value, 'Y');
//! ```

use cfg_if::cfg_if;
use core::mem::ManuallyDrop;
use core::ptr;

use crate::order::PriorityOrder;
use crate::position::PositionAware;


/// Restores heap order after one element has been appended at the end of
/// `data`.
///
/// On entry, `data[..len - 1]` must be a valid heap; the new element sifts up
/// from the last slot until its parent is of priority no lower than it. Every
/// element moved in the process, the new one included, is told its final
/// slot. An empty slice is left untouched.
///
/// # Time complexity
///
/// *O*(log(*n*)).
///
/// # Examples
///
/// ```
/// use cairn::{push_heap, OrdPriority, Slotted};
///
/// let order = OrdPriority::default();
/// let mut heap = Vec::new();
/// for value in [1, 5, 2] {
///     heap.push(Slotted::new(value));
///     push_heap(&mut heap, &order);
/// }
/// assert_eq!(heap[0].value, 5);
/// assert_eq!(heap[2].slot, 2);
/// ```
pub fn push_heap<T, O>(data: &mut [T], order: &O)
where
    T: PositionAware,
    O: PriorityOrder<Item = T>,
{
    let len = data.len();
    if len == 0 {
        return;
    }
    // SAFETY: len - 1 < data.len().
    unsafe { sift_up_in(data, 0, len - 1, order) };
}

/// Removes the maximal element from the heap by parking it in the last slot.
///
/// After the call, `data[..len - 1]` is a valid heap and `data[len - 1]`
/// holds the element that was at the root; the caller is expected to shrink
/// the sequence by one to complete the removal. Slices of length 0 or 1 are
/// left untouched (a single element is already in its own last slot).
///
/// The parked element keeps the slot it last recorded while live; it receives
/// no further notification on the way out.
///
/// # Time complexity
///
/// *O*(log(*n*)).
///
/// # Examples
///
/// ```
/// use cairn::{pop_heap, push_heap, OrdPriority, Slotted};
///
/// let order = OrdPriority::default();
/// let mut heap = Vec::new();
/// for value in [3, 1, 4] {
///     heap.push(Slotted::new(value));
///     push_heap(&mut heap, &order);
/// }
///
/// pop_heap(&mut heap, &order);
/// assert_eq!(heap.pop().unwrap().value, 4);
/// assert_eq!(heap[0].value, 3);
/// ```
pub fn pop_heap<T, O>(data: &mut [T], order: &O)
where
    T: PositionAware,
    O: PriorityOrder<Item = T>,
{
    if data.len() > 1 {
        remove_at(data, 0, order);
    }
}

/// Removes the element at an arbitrary slot, parking it in the last slot.
///
/// `pos` must be the slot most recently recorded for the element being
/// removed; presenting a stale position silently removes whatever lives there
/// now. After the call, `data[..len - 1]` is a valid heap and
/// `data[len - 1]` holds the removed element; the caller is expected to
/// shrink the sequence by one. Slices of length 0 or 1 are left untouched.
///
/// # Panics
///
/// Panics if `pos` is out of range of a non-empty slice.
///
/// # Time complexity
///
/// *O*(log(*n*)).
///
/// # Examples
///
/// ```
/// use cairn::{pop_heap_at, push_heap, OrdPriority, Slotted};
///
/// let order = OrdPriority::default();
/// let mut heap = Vec::new();
/// for value in [2, 9, 7, 4] {
///     heap.push(Slotted::new(value));
///     push_heap(&mut heap, &order);
/// }
///
/// // The element that wants out knows its own slot.
/// let slot = heap.iter().position(|e| e.value == 7).unwrap();
/// assert_eq!(heap[slot].slot, slot);
/// pop_heap_at(&mut heap, slot, &order);
/// assert_eq!(heap.pop().unwrap().value, 7);
/// ```
pub fn pop_heap_at<T, O>(data: &mut [T], pos: usize, order: &O)
where
    T: PositionAware,
    O: PriorityOrder<Item = T>,
{
    if data.is_empty() {
        return;
    }
    assert!(
        pos < data.len(),
        "slot {pos} out of bounds for heap of length {}",
        data.len()
    );
    if data.len() > 1 {
        remove_at(data, pos, order);
    }
}

/// Restores heap order after the element at `pos` had its priority raised.
///
/// The element climbs toward the root until its parent is of priority no
/// lower than it, with every displaced element notified of its new slot. The
/// heap must be valid everywhere except at `pos`. An empty slice is left
/// untouched.
///
/// # Panics
///
/// Panics if `pos` is out of range of a non-empty slice.
///
/// # Time complexity
///
/// *O*(log(*n*)).
///
/// # Examples
///
/// ```
/// use cairn::{push_heap, sift_up, OrdPriority, Slotted};
///
/// let order = OrdPriority::default();
/// let mut heap = Vec::new();
/// for value in [6, 3, 5] {
///     heap.push(Slotted::new(value));
///     push_heap(&mut heap, &order);
/// }
///
/// // Raise the priority of the element at slot 1, then repair.
/// heap[1].value = 8;
/// sift_up(&mut heap, 1, &order);
/// assert_eq!(heap[0].value, 8);
/// assert_eq!(heap[0].slot, 0);
/// ```
pub fn sift_up<T, O>(data: &mut [T], pos: usize, order: &O)
where
    T: PositionAware,
    O: PriorityOrder<Item = T>,
{
    if data.is_empty() {
        return;
    }
    assert!(
        pos < data.len(),
        "slot {pos} out of bounds for heap of length {}",
        data.len()
    );
    // SAFETY: pos < data.len() was just checked.
    unsafe { sift_up_in(data, 0, pos, order) };
}

/// Restores heap order after the element at `pos` had its priority lowered.
///
/// The element descends toward the leaves until no child outranks it, with
/// every displaced element notified of its new slot. The heap must be valid
/// everywhere except at `pos`. An empty slice is left untouched.
///
/// With the `preserve_stability` feature enabled this routes through the
/// tie-preserving down-sift, like the removal operations.
///
/// # Panics
///
/// Panics if `pos` is out of range of a non-empty slice.
///
/// # Time complexity
///
/// *O*(log(*n*)).
///
/// # Examples
///
/// ```
/// use cairn::{push_heap, sift_down, OrdPriority, Slotted};
///
/// let order = OrdPriority::default();
/// let mut heap = Vec::new();
/// for value in [6, 3, 5] {
///     heap.push(Slotted::new(value));
///     push_heap(&mut heap, &order);
/// }
///
/// // The root lost its urgency; let it settle back down.
/// heap[0].value = 1;
/// sift_down(&mut heap, 0, &order);
/// assert_eq!(heap[0].value, 5);
/// assert_eq!(heap.iter().map(|e| e.slot).collect::<Vec<_>>(), [0, 1, 2]);
/// ```
pub fn sift_down<T, O>(data: &mut [T], pos: usize, order: &O)
where
    T: PositionAware,
    O: PriorityOrder<Item = T>,
{
    if data.is_empty() {
        return;
    }
    assert!(
        pos < data.len(),
        "slot {pos} out of bounds for heap of length {}",
        data.len()
    );
    // SAFETY: pos < data.len() was just checked.
    unsafe { sift_down_from(data, 0, pos, order) };
}

/// Rearranges an arbitrary slice into a valid heap, in place.
///
/// Every element is told its slot, whether or not the heapification moves
/// it, so position coherence holds from the first operation onwards.
///
/// # Time complexity
///
/// *O*(*n*).
///
/// # Examples
///
/// ```
/// use cairn::{make_heap, OrdPriority, Slotted};
///
/// let order = OrdPriority::default();
/// let mut heap: Vec<_> = [2, 7, 1, 9, 4].into_iter().map(Slotted::new).collect();
/// make_heap(&mut heap, &order);
///
/// assert_eq!(heap[0].value, 9);
/// assert!(heap.iter().enumerate().all(|(slot, e)| e.slot == slot));
/// ```
pub fn make_heap<T, O>(data: &mut [T], order: &O)
where
    T: PositionAware,
    O: PriorityOrder<Item = T>,
{
    for (slot, element) in data.iter_mut().enumerate() {
        element.set_slot(slot);
    }

    let mut n = data.len() / 2;
    while n > 0 {
        n -= 1;
        // SAFETY: n < data.len() / 2, so n is in range; bounding the sift at
        // the subtree root keeps the slots above n untouched until their turn.
        unsafe { sift_down_from(data, n, n, order) };
    }
}

/// Extracts the value at `pos` and repairs the heap around the gap.
///
/// The doomed element swaps with the last one, so it ends up parked at
/// `data[len - 1]` while the former last element fills the gap and settles by
/// sifting down over the shrunken range. When `pos` already is the last slot,
/// the doomed element and the excess element are one and the same and there
/// is nothing to repair.
///
/// Callers guarantee `data.len() > 1` and `pos < data.len()`.
fn remove_at<T, O>(data: &mut [T], pos: usize, order: &O)
where
    T: PositionAware,
    O: PriorityOrder<Item = T>,
{
    let last = data.len() - 1;
    if pos == last {
        return;
    }
    data.swap(pos, last);
    // SAFETY: pos < last, and the sub-slice has length last >= 1.
    unsafe { sift_down_from(&mut data[..last], 0, pos, order) };
}

cfg_if! {
    if #[cfg(feature = "preserve_stability")] {
        /// The down-sift selected at build time: the tie-preserving variant.
        ///
        /// # Safety
        ///
        /// The caller must guarantee that `start <= pos < data.len()`.
        #[inline]
        unsafe fn sift_down_from<T, O>(data: &mut [T], start: usize, pos: usize, order: &O)
        where
            T: PositionAware,
            O: PriorityOrder<Item = T>,
        {
            let end = data.len();
            // SAFETY: forwarded from the caller.
            unsafe { sift_down_to_bottom(data, start, pos, end, order) };
        }
    } else {
        /// The down-sift selected at build time: the early-exit variant.
        ///
        /// # Safety
        ///
        /// The caller must guarantee that `start <= pos < data.len()`.
        #[inline]
        unsafe fn sift_down_from<T, O>(data: &mut [T], _start: usize, pos: usize, order: &O)
        where
            T: PositionAware,
            O: PriorityOrder<Item = T>,
        {
            let end = data.len();
            // SAFETY: forwarded from the caller.
            unsafe { sift_down_range(data, pos, end, order) };
        }
    }
}

// The sift implementations move elements through a hole rather than swapping
// pairs: the value being re-seated is read out once, other elements shift
// into the gap one move (and one slot notification) at a time, and the value
// lands exactly once at the end. `Hole` guarantees the slice is made whole
// again even if the order or a notification panics mid-sift.

/// Moves the value at `pos` toward the root until its parent no longer has
/// strictly lower priority, stopping at `start`.
///
/// The `start` boundary confines the climb to a sub-range rooted somewhere
/// other than slot 0, which the heap-construction and tie-preserving paths
/// rely on.
///
/// # Safety
///
/// The caller must guarantee that `start <= pos < data.len()`.
unsafe fn sift_up_in<T, O>(data: &mut [T], start: usize, pos: usize, order: &O)
where
    T: PositionAware,
    O: PriorityOrder<Item = T>,
{
    // SAFETY: pos < data.len() per the caller.
    let mut hole = unsafe { Hole::new(data, pos) };

    while hole.pos() > start {
        let parent = (hole.pos() - 1) / 2;

        // SAFETY: hole.pos() > start >= 0, so parent < hole.pos() and both
        // are in range, with parent != hole.pos().
        if order.le(hole.element(), unsafe { hole.get(parent) }) {
            break;
        }

        // SAFETY: same bounds as above.
        unsafe { hole.move_to(parent) };
    }
}

/// Fills the hole at `pos` by walking the best-child path toward the leaves,
/// stopping early once the carried value is of priority no lower than the
/// best child.
///
/// The final slot of an even-length range has no sibling, so the loop never
/// reaches it; the trailing check compares against that lone child.
///
/// # Safety
///
/// The caller must guarantee that `pos < end <= data.len()`.
#[allow(dead_code)] // Not used in all configurations
unsafe fn sift_down_range<T, O>(data: &mut [T], pos: usize, end: usize, order: &O)
where
    T: PositionAware,
    O: PriorityOrder<Item = T>,
{
    // SAFETY: pos < end <= data.len() per the caller.
    let mut hole = unsafe { Hole::new(data, pos) };
    let mut child = 2 * hole.pos() + 1;

    // Loop invariant: child == 2 * hole.pos() + 1.
    while child <= end.saturating_sub(2) {
        // SAFETY: child + 1 < end, and neither index equals hole.pos().
        child += order.le(unsafe { hole.get(child) }, unsafe { hole.get(child + 1) }) as usize;

        // SAFETY: child is still < end and != hole.pos().
        if order.ge(hole.element(), unsafe { hole.get(child) }) {
            return;
        }

        // SAFETY: same as above.
        unsafe { hole.move_to(child) };
        child = 2 * hole.pos() + 1;
    }

    // SAFETY: child == end - 1 < data.len() and child != hole.pos().
    if child == end - 1 && order.lt(hole.element(), unsafe { hole.get(child) }) {
        unsafe { hole.move_to(child) };
    }
}

/// Fills the hole at `pos` by walking it all the way down the best-child
/// path, then sifting the carried value back up from the reached leaf,
/// bounded by `start`.
///
/// Skipping the early exit means the value never overtakes an equal-priority
/// element on the way down, which keeps ties in their pre-existing slot
/// order at roughly twice the comparisons of [`sift_down_range`]. When the
/// range has even length the walk can end on the parent of the range's
/// final, sibling-less slot; the trailing step relocates the hole onto that
/// lone leaf so the climb starts from the deepest generation.
///
/// # Safety
///
/// The caller must guarantee that `start <= pos < end <= data.len()`.
#[allow(dead_code)] // Not used in all configurations
unsafe fn sift_down_to_bottom<T, O>(
    data: &mut [T],
    start: usize,
    pos: usize,
    end: usize,
    order: &O,
) where
    T: PositionAware,
    O: PriorityOrder<Item = T>,
{
    // SAFETY: pos < end <= data.len() per the caller.
    let mut hole = unsafe { Hole::new(data, pos) };
    let mut child = 2 * hole.pos() + 1;

    // Loop invariant: child == 2 * hole.pos() + 1.
    while child <= end.saturating_sub(2) {
        // SAFETY: child + 1 < end, and neither index equals hole.pos().
        child += order.le(unsafe { hole.get(child) }, unsafe { hole.get(child + 1) }) as usize;

        // SAFETY: same as above.
        unsafe { hole.move_to(child) };
        child = 2 * hole.pos() + 1;
    }

    if child == end - 1 {
        // SAFETY: child == end - 1 < data.len() and child != hole.pos().
        unsafe { hole.move_to(child) };
    }

    let pos = hole.pos();
    drop(hole);

    // SAFETY: start <= pos < data.len(), and the hole has been refilled.
    unsafe { sift_up_in(data, start, pos, order) };
}

/// A slot temporarily without a valid value: the value has been read out and
/// is carried alongside while other elements shift into the gap. On drop,
/// the carried value fills the gap and is told its final slot, so the slice
/// is whole again even if a comparison or notification panics mid-sift.
struct Hole<'a, T: PositionAware> {
    data: &'a mut [T],
    elt: ManuallyDrop<T>,
    pos: usize,
}

impl<'a, T: PositionAware> Hole<'a, T> {
    /// Creates a new `Hole` at index `pos`.
    ///
    /// # Safety
    ///
    /// `pos` must be within the data slice.
    #[inline]
    unsafe fn new(data: &'a mut [T], pos: usize) -> Self {
        debug_assert!(pos < data.len());
        // SAFETY: pos is inside the slice per the caller.
        let elt = unsafe { ptr::read(data.get_unchecked(pos)) };
        Hole { data, elt: ManuallyDrop::new(elt), pos }
    }

    #[inline]
    fn pos(&self) -> usize {
        self.pos
    }

    /// The value the hole is carrying.
    #[inline]
    fn element(&self) -> &T {
        &self.elt
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Safety
    ///
    /// `index` must be within the data slice and not equal to pos.
    #[inline]
    unsafe fn get(&self, index: usize) -> &T {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        unsafe { self.data.get_unchecked(index) }
    }

    /// Moves the element at `index` into the hole, telling it its new slot;
    /// the hole moves to `index`.
    ///
    /// # Safety
    ///
    /// `index` must be within the data slice and not equal to pos.
    #[inline]
    unsafe fn move_to(&mut self, index: usize) {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        unsafe {
            let ptr = self.data.as_mut_ptr();
            let index_ptr: *const _ = ptr.add(index);
            let hole_ptr = ptr.add(self.pos);
            ptr::copy_nonoverlapping(index_ptr, hole_ptr, 1);
            (*hole_ptr).set_slot(self.pos);
        }
        self.pos = index;
    }
}

impl<T: PositionAware> Drop for Hole<'_, T> {
    #[inline]
    fn drop(&mut self) {
        // fill the hole again, telling the value where it landed
        unsafe {
            let pos = self.pos;
            let slot: *mut T = self.data.get_unchecked_mut(pos);
            ptr::copy_nonoverlapping(&*self.elt, slot, 1);
            (*slot).set_slot(pos);
        }
    }
}
