//! The typed, stateless [`Allocator`].

use std::alloc::{self, Layout};
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use super::construct;
use crate::util::error::{AllocError, CapacityOverflow, OutOfMemory};
use crate::util::result::AllocResultExtension;

/// A stateless allocator for a single element type, backed by the global allocator.
///
/// All sizes are counted in elements of `T`, never in bytes. Allocation only ever produces raw,
/// uninitialized slots; objects are placed into them with [`Allocator::construct`] (and friends)
/// which forward to [`memory::construct`](super::construct).
///
/// Requesting zero elements, or any number of a zero-sized type, returns a dangling "empty handle"
/// without touching the global allocator. Releasing an empty handle is a no-op.
///
/// # Examples
/// ```
/// # use easy_stl::memory::Allocator;
/// let ptr = Allocator::<String>::allocate(2);
/// unsafe {
///     Allocator::construct(ptr, String::from("hello"));
///     Allocator::construct(ptr.add(1), String::from("world"));
///     assert_eq!(ptr.add(1).as_ref(), "world");
///     Allocator::destroy_n(ptr, 2);
///     Allocator::deallocate(ptr, 2);
/// }
/// ```
pub struct Allocator<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Allocator<T> {
    /// Creates a handle to the allocator. All handles are interchangeable.
    pub const fn new() -> Allocator<T> {
        Allocator {
            _phantom: PhantomData,
        }
    }

    /// Returns the largest number of elements that a single allocation can hold.
    pub const fn max_size() -> usize {
        match size_of::<T>() {
            0 => usize::MAX,
            size => isize::MAX as usize / size,
        }
    }

    /// Creates the [`Layout`] used for `count` elements of `T`.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if the layout would exceed [`isize::MAX`] bytes.
    pub fn layout(count: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<T>(count).map_err(|_| CapacityOverflow)
    }

    /// Allocates storage for a single element.
    ///
    /// # Panics
    /// Never for a single element, but see [`Allocator::allocate`].
    pub fn allocate_one() -> NonNull<T> {
        Self::allocate(1)
    }

    /// Allocates uninitialized storage for `count` elements. Returns the empty handle for
    /// `count == 0` or zero-sized `T`.
    ///
    /// # Panics
    /// Panics if the layout would exceed [`isize::MAX`] bytes. Running out of memory is reported
    /// through [`alloc::handle_alloc_error`].
    pub fn allocate(count: usize) -> NonNull<T> {
        Self::try_allocate(count).throw_alloc()
    }

    /// Allocates uninitialized storage for `count` elements, reporting failure instead of
    /// panicking.
    ///
    /// # Errors
    /// Returns [`AllocError::CapacityOverflow`] if the layout would exceed [`isize::MAX`] bytes
    /// and [`AllocError::OutOfMemory`] if the global allocator returns null.
    pub fn try_allocate(count: usize) -> Result<NonNull<T>, AllocError> {
        let layout = Self::layout(count)?;

        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: Zero-sized layouts have been guarded against.
        let raw_ptr: *mut T = unsafe { alloc::alloc(layout).cast() };
        let ptr = NonNull::new(raw_ptr).ok_or(OutOfMemory { layout })?;

        trace!("allocated {} slots ({} bytes)", count, layout.size());
        Ok(ptr)
    }

    /// Releases storage for a single element, as allocated by [`Allocator::allocate_one`].
    ///
    /// # Safety
    /// Same requirements as [`Allocator::deallocate`] with a count of 1.
    pub unsafe fn deallocate_one(ptr: NonNull<T>) {
        // SAFETY: Requirements are passed on to the caller.
        unsafe { Self::deallocate(ptr, 1) }
    }

    /// Releases storage for `count` elements. The count is needed to rebuild the layout the
    /// storage was allocated with. A no-op for the empty handle.
    ///
    /// # Safety
    /// `ptr` must have been returned by this allocator for exactly `count` elements and not
    /// released since. Any objects still in the storage are not dropped.
    pub unsafe fn deallocate(ptr: NonNull<T>, count: usize) {
        let Ok(layout) = Self::layout(count) else {
            // Nothing could have been allocated with an invalid layout.
            return;
        };

        if layout.size() == 0 {
            return;
        }

        // SAFETY: ptr was allocated in the global allocator with this same layout, which is
        // non-zero in size.
        unsafe { alloc::dealloc(ptr.as_ptr().cast(), layout) }
        trace!("released {} slots ({} bytes)", count, layout.size());
    }

    /// Forwards to [`construct::construct`].
    ///
    /// # Safety
    /// See [`construct::construct`].
    pub unsafe fn construct(slot: NonNull<T>, value: T) {
        // SAFETY: Requirements are passed on to the caller.
        unsafe { construct::construct(slot, value) }
    }

    /// Forwards to [`construct::construct_with`].
    ///
    /// # Safety
    /// See [`construct::construct_with`].
    pub unsafe fn construct_with<F: FnOnce() -> T>(slot: NonNull<T>, init: F) {
        // SAFETY: Requirements are passed on to the caller.
        unsafe { construct::construct_with(slot, init) }
    }

    /// Forwards to [`construct::destroy`].
    ///
    /// # Safety
    /// See [`construct::destroy`].
    pub unsafe fn destroy(slot: NonNull<T>) {
        // SAFETY: Requirements are passed on to the caller.
        unsafe { construct::destroy(slot) }
    }

    /// Forwards to [`construct::destroy_n`].
    ///
    /// # Safety
    /// See [`construct::destroy_n`].
    pub unsafe fn destroy_n(first: NonNull<T>, count: usize) {
        // SAFETY: Requirements are passed on to the caller.
        unsafe { construct::destroy_n(first, count) }
    }

    /// Forwards to [`construct::destroy_range`].
    ///
    /// # Safety
    /// See [`construct::destroy_range`].
    pub unsafe fn destroy_range(first: NonNull<T>, last: NonNull<T>) {
        // SAFETY: Requirements are passed on to the caller.
        unsafe { construct::destroy_range(first, last) }
    }
}

impl<T: Default> Allocator<T> {
    /// Forwards to [`construct::construct_default`].
    ///
    /// # Safety
    /// See [`construct::construct_default`].
    pub unsafe fn construct_default(slot: NonNull<T>) {
        // SAFETY: Requirements are passed on to the caller.
        unsafe { construct::construct_default(slot) }
    }
}

impl<T> Default for Allocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Allocator<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Allocator<T> {}

impl<T> PartialEq for Allocator<T> {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl<T> Eq for Allocator<T> {}

impl<T> Debug for Allocator<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Allocator<{}>", std::any::type_name::<T>())
    }
}
