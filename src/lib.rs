//! This crate is my attempt at writing the memory layer underneath a growable array: object
//! construction and destruction, a typed allocator, the "uninitialized" family of algorithms and a
//! [`Vector`](collections::contiguous::Vector) built entirely on top of them.
//!
//! # Purpose
//! This repo / crate is a learning project. Writing these pieces by hand helps me understand what
//! a standard library is actually doing when it grows a buffer, and where things go wrong when a
//! clone panics halfway through filling one.
//!
//! # Method
//! Allocation and object lifecycle are two separate steps everywhere in this crate. Storage comes
//! from [`Allocator`](memory::Allocator) as raw, uninitialized slots held by a
//! [`RawBlock`](memory::RawBlock). Objects are only ever placed into those slots through
//! [`memory::construct`] or the algorithms in [`memory::uninit`], never by assignment.
//!
//! Every bulk write into raw storage is all-or-nothing. If constructing the n-th element panics
//! (or returns an error, for the `try_` variants), the elements written so far are destroyed
//! before the failure continues on its way.
//!
//! # Error Handling
//! Following the usual standard library trade-off, most methods panic on misuse rather than
//! returning a [`Result`]: nobody wants to handle a capacity overflow on every push. Where a
//! recoverable form is useful (checked access, `try_reserve`, fallible generators), errors are
//! strongly typed structs that implement [`Error`](std::error::Error), combined with enums for
//! static dispatch. See [`error`].
//!
//! # Dependencies
//! `derive_more` removes some very repetitive error boilerplate. `log` is optional and only
//! pulled in by the `logging` feature, which traces allocations and reallocations.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[macro_use]
pub(crate) mod util;

pub mod collections;
pub mod memory;

pub use util::error;

/// Creates a [`Vector`](collections::contiguous::Vector) from a list of elements, or from a value
/// and a count.
///
/// # Examples
/// ```
/// # use easy_stl::vector;
/// let vec = vector![1, 2, 3];
/// assert_eq!(&*vec, &[1, 2, 3]);
///
/// let vec = vector![9; 5];
/// assert_eq!(&*vec, &[9, 9, 9, 9, 9]);
/// ```
#[macro_export]
macro_rules! vector {
    () => {
        $crate::collections::contiguous::Vector::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::collections::contiguous::Vector::with_count_and_value($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::collections::contiguous::Vector::from([$($x),+])
    };
}
