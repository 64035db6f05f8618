//! Error types used throughout the crate.
//!
//! Each error is its own small struct implementing [`Error`], with enums such as [`AllocError`]
//! used to combine them where an operation can fail in more than one way.

use std::alloc::Layout;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// An index was not less than the length of the collection it was used with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    /// The offending index.
    pub index: usize,
    /// The length of the collection at the time of the access.
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

/// A requested capacity can't be represented, either because the element count overflowed or
/// because the resulting allocation would exceed [`isize::MAX`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}

/// The global allocator couldn't satisfy a request for the contained [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfMemory {
    /// The layout that was requested.
    pub layout: Layout,
}

impl Display for OutOfMemory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Out of memory while allocating {} bytes (align {})!",
            self.layout.size(),
            self.layout.align()
        )
    }
}

impl Error for OutOfMemory {}

/// Any of the ways that acquiring storage can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum AllocError {
    /// See [`CapacityOverflow`].
    CapacityOverflow(CapacityOverflow),
    /// See [`OutOfMemory`].
    OutOfMemory(OutOfMemory),
}
