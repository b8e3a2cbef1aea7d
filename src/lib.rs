#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

//! Indirect binary heap algorithms over caller-owned slices.
//!
//! The routines here are the classical heap family (sift up, sift down,
//! push, pop) with one addition that changes what the structure can do:
//! every time a sift writes an element into a slot, the element is told where
//! it landed through [`PositionAware`]. An element, or whoever holds a handle
//! to it, can therefore present its latest recorded slot and be removed
//! ([`pop_heap_at`]) or re-prioritized ([`sift_up`], [`sift_down`]) in
//! O(log n), something a classical heap only offers for the root.
//!
//! The crate deliberately owns no storage. Every operation works on a
//! `&mut [T]` whose growth and shrinkage stay in the caller's hands: grow
//! before [`push_heap`], shrink after [`pop_heap`] or [`pop_heap_at`] have
//! parked the removed element in the last slot. Orderings are supplied per
//! call through [`PriorityOrder`]; [`OrdPriority`] bridges element types
//! whose [`Ord`] already is the priority.
//!
//! Enabling the `preserve_stability` feature swaps the down-sift used by the
//! removal and re-sift operations for a variant that keeps equal-priority
//! elements in their pre-existing slot order, at roughly twice the
//! comparisons.
//!
//! # Examples
//!
//! ```
//! use cairn::{pop_heap, pop_heap_at, push_heap, OrdPriority, Slotted};
//!
//! let order = OrdPriority::default();
//! let mut queue: Vec<Slotted<u32>> = Vec::new();
//!
//! // Grow the slice first, then let the heap place the new element.
//! for deadline in [30, 10, 50, 20, 40] {
//!     queue.push(Slotted::new(deadline));
//!     push_heap(&mut queue, &order);
//! }
//!
//! // The root is maximal, and every element knows where it sits.
//! assert_eq!(queue[0].value, 50);
//! assert!(queue.iter().enumerate().all(|(i, e)| e.slot == i));
//!
//! // Remove an arbitrary element by its recorded slot.
//! let slot_of_20 = queue.iter().position(|e| e.value == 20).unwrap();
//! assert_eq!(queue[slot_of_20].slot, slot_of_20);
//! pop_heap_at(&mut queue, slot_of_20, &order);
//! assert_eq!(queue.pop().unwrap().value, 20);
//!
//! // Popping the root drains the rest in priority order.
//! let mut drained = Vec::new();
//! while !queue.is_empty() {
//!     pop_heap(&mut queue, &order);
//!     drained.push(queue.pop().unwrap().value);
//! }
//! assert_eq!(drained, [50, 40, 30, 10]);
//! ```

extern crate alloc;

pub mod heap;
pub mod order;
pub mod position;

pub use heap::{make_heap, pop_heap, pop_heap_at, push_heap, sift_down, sift_up};
pub use order::{OrdPriority, PriorityOrder};
pub use position::{PositionAware, Slotted};
