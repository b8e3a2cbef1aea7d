//! Priority orderings supplied by the caller alongside every heap operation.
//!
//! The algorithms in this crate never require elements to implement [`Ord`];
//! they consult a [`PriorityOrder`] passed with the slice instead, so one
//! element type can live in differently-ordered heaps. [`OrdPriority`] is the
//! zero-sized bridge for element types whose [`Ord`] already is the priority.

use core::cmp::Ordering;
use core::marker::PhantomData;

/// A total order over heap elements, consulted by every sift.
///
/// The root of a heap is *maximal* under this order: `cmp(a, b)` returning
/// [`Ordering::Less`] means `a` has strictly lower priority than `b`. For a
/// min-heap, supply an order that reverses its comparison, or store
/// [`core::cmp::Reverse`] elements under [`OrdPriority`].
///
/// The order must be stable for the lifetime of a heap. If its result for a
/// pair of live elements changes, the caller must re-sift the affected
/// position with [`sift_up`](crate::sift_up) or
/// [`sift_down`](crate::sift_down) before performing any other operation.
pub trait PriorityOrder {
    /// The element type this order compares.
    type Item;

    /// Compares the priority of `this` against `that`.
    fn cmp(&self, this: &Self::Item, that: &Self::Item) -> Ordering;

    /// `this` has strictly lower priority than `that`.
    fn lt(&self, this: &Self::Item, that: &Self::Item) -> bool {
        self.cmp(this, that).is_lt()
    }

    /// `this` has priority no higher than `that`.
    fn le(&self, this: &Self::Item, that: &Self::Item) -> bool {
        self.cmp(this, that).is_le()
    }

    /// `this` has strictly higher priority than `that`.
    fn gt(&self, this: &Self::Item, that: &Self::Item) -> bool {
        self.cmp(this, that).is_gt()
    }

    /// `this` has priority no lower than `that`.
    fn ge(&self, this: &Self::Item, that: &Self::Item) -> bool {
        self.cmp(this, that).is_ge()
    }
}

/// A zero-sized priority order that delegates to the [`Ord`] implementation
/// of its element type `T`.
pub struct OrdPriority<T: Ord>(PhantomData<fn(&T)>);

impl<T: Ord> Default for OrdPriority<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T: Ord> Clone for OrdPriority<T> {
    fn clone(&self) -> Self {
        Self(PhantomData)
    }
}

impl<T: Ord> Copy for OrdPriority<T> {}

impl<T: Ord> PriorityOrder for OrdPriority<T> {
    type Item = T;

    fn cmp(&self, this: &T, that: &T) -> Ordering {
        this.cmp(that)
    }
}
