//! The memory layer: object lifecycle primitives, a typed allocator, owned raw storage and the
//! algorithms that write into it.
//!
//! Allocation and construction are always separate steps. [`Allocator`] hands out raw slots,
//! [`RawBlock`] owns them, and only [`construct`] and the [`uninit`] algorithms turn those slots
//! into live objects.
#![warn(missing_docs)]

pub mod allocator;
pub mod block;
pub mod construct;
pub mod uninit;

mod tests;

#[doc(inline)]
pub use allocator::Allocator;
#[doc(inline)]
pub use block::RawBlock;
