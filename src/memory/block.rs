//! Owned raw storage, see [`RawBlock`].

use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem::{self, MaybeUninit};
use std::ptr::NonNull;
use std::slice;

use super::Allocator;
use crate::util::error::AllocError;

/// An owned block of uninitialized storage for `capacity` elements of `T`. Similar to a
/// `Box<[MaybeUninit<T>]>`.
///
/// A RawBlock never constructs or destroys the elements in it, it only owns the storage, which is
/// released exactly once when the block is dropped. Keeping track of which slots hold live objects
/// is the owner's job. Any objects still in the block when it is dropped are leaked, not dropped.
///
/// # Examples
/// ```
/// # use easy_stl::memory::RawBlock;
/// let mut block = RawBlock::<u8>::allocate(4);
/// assert_eq!(block.capacity(), 4);
/// block.slots_mut()[0].write(7);
/// // SAFETY: Slot 0 was just initialized.
/// assert_eq!(unsafe { block.slots_mut()[0].assume_init() }, 7);
/// ```
pub struct RawBlock<T> {
    ptr: NonNull<T>,
    cap: usize,
    _phantom: PhantomData<T>,
}

impl<T> RawBlock<T> {
    /// Creates a block with no capacity and no allocation.
    pub const fn empty() -> RawBlock<T> {
        RawBlock {
            ptr: NonNull::dangling(),
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Allocates a block with room for exactly `cap` elements.
    ///
    /// # Panics
    /// Panics if the memory layout size exceeds [`isize::MAX`]. Running out of memory is reported
    /// through [`std::alloc::handle_alloc_error`].
    pub fn allocate(cap: usize) -> RawBlock<T> {
        RawBlock {
            ptr: Allocator::allocate(cap),
            cap,
            _phantom: PhantomData,
        }
    }

    /// Allocates a block with room for exactly `cap` elements, reporting failure instead of
    /// panicking.
    ///
    /// # Errors
    /// See [`Allocator::try_allocate`].
    pub fn try_allocate(cap: usize) -> Result<RawBlock<T>, AllocError> {
        Ok(RawBlock {
            ptr: Allocator::try_allocate(cap)?,
            cap,
            _phantom: PhantomData,
        })
    }

    /// Returns the number of slots in the block.
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns a pointer to the first slot. Dangling if the block has no allocation.
    pub const fn as_ptr(&self) -> NonNull<T> {
        self.ptr
    }

    /// Returns a pointer to the slot at `index`.
    ///
    /// # Safety
    /// `index` must be no greater than the capacity of the block (one past the end is allowed).
    pub const unsafe fn slot(&self, index: usize) -> NonNull<T> {
        // SAFETY: The caller guarantees that the offset stays within the allocation, which is
        // no larger than isize::MAX bytes.
        unsafe { self.ptr.add(index) }
    }

    /// Returns every slot in the block, initialized or not, as a slice of [`MaybeUninit<T>`].
    pub const fn slots_mut(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY: The pointer is nonnull and properly aligned, and the allocation is valid for cap
        // elements. MaybeUninit<T> has the same layout as T and places no requirements on the
        // contents of the slots. The borrow is tied to &mut self, so the slice is unique.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr().cast(), self.cap) }
    }

    /// Decomposes the block into its pointer and capacity without releasing the storage.
    pub const fn into_parts(self) -> (NonNull<T>, usize) {
        let ret = (self.ptr, self.cap);
        mem::forget(self);
        ret
    }

    /// Creates a block from its raw components.
    ///
    /// # Safety
    /// `ptr` must have been returned by [`Allocator::<T>::allocate`] for exactly `cap` elements
    /// (or be dangling with `cap == 0`), and must not be owned by anything else.
    pub const unsafe fn from_parts(ptr: NonNull<T>, cap: usize) -> RawBlock<T> {
        RawBlock {
            ptr,
            cap,
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for RawBlock<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Drop for RawBlock<T> {
    fn drop(&mut self) {
        // SAFETY: ptr was allocated by Allocator<T> for exactly cap elements, or is the empty
        // handle, which deallocate ignores.
        unsafe { Allocator::deallocate(self.ptr, self.cap) }
    }
}

impl<T> Debug for RawBlock<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBlock")
            .field("ptr", &self.ptr)
            .field("cap", &self.cap)
            .finish()
    }
}

// SAFETY: A RawBlock uniquely owns its storage, so it can be sent between threads whenever the
// elements it is meant to hold can be.
unsafe impl<T: Send> Send for RawBlock<T> {}
// SAFETY: Shared references to a RawBlock only expose its pointer and capacity.
unsafe impl<T: Sync> Sync for RawBlock<T> {}
