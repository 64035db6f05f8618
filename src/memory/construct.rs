//! The primitives that turn a raw slot into a live object and back again.
//!
//! Everything above this module ([`Allocator`](super::Allocator), [`uninit`](super::uninit) and
//! [`Vector`](crate::collections::contiguous::Vector)) places and removes objects only through
//! these functions.
//!
//! Destruction of a type without drop glue is resolved at compile time: `destroy` and friends on
//! a `u32` compile to nothing at all.

use std::mem;
use std::ptr::{self, NonNull};

/// Constructs an object in `slot` by moving `value` into it.
///
/// # Safety
/// `slot` must be valid for writes and properly aligned, and must not currently hold a live object
/// (which would be leaked rather than dropped).
pub unsafe fn construct<T>(slot: NonNull<T>, value: T) {
    // SAFETY: The caller guarantees that slot is valid for writes and aligned.
    unsafe { slot.write(value) }
}

/// Default-constructs an object in `slot`.
///
/// # Safety
/// Same requirements as [`construct`].
pub unsafe fn construct_default<T: Default>(slot: NonNull<T>) {
    // SAFETY: Requirements are passed on to the caller.
    unsafe { construct_with(slot, T::default) }
}

/// Constructs an object in `slot` from the value produced by `init`. If `init` panics, nothing is
/// written and the slot stays uninitialized.
///
/// # Safety
/// Same requirements as [`construct`].
pub unsafe fn construct_with<T, F: FnOnce() -> T>(slot: NonNull<T>, init: F) {
    let value = init();
    // SAFETY: Requirements are passed on to the caller.
    unsafe { construct(slot, value) }
}

/// Destroys the object in `slot`, leaving the slot uninitialized. A no-op for types that don't
/// need dropping.
///
/// # Safety
/// `slot` must hold a live, properly aligned object which isn't used again until it is
/// reconstructed.
pub unsafe fn destroy<T>(slot: NonNull<T>) {
    if const { mem::needs_drop::<T>() } {
        // SAFETY: The caller guarantees that slot holds a live object.
        unsafe { ptr::drop_in_place(slot.as_ptr()) }
    }
}

/// Destroys `count` consecutive objects starting at `first`. A no-op for types that don't need
/// dropping.
///
/// # Safety
/// Every slot in `first..first + count` must hold a live object, as for [`destroy`].
pub unsafe fn destroy_n<T>(first: NonNull<T>, count: usize) {
    if const { mem::needs_drop::<T>() } {
        // SAFETY: The caller guarantees that the range holds count live objects. Dropping as a
        // slice keeps going through the rest of the range if one destructor panics.
        unsafe {
            ptr::drop_in_place(NonNull::slice_from_raw_parts(first, count).as_ptr())
        }
    }
}

/// Destroys every object in the half-open range `[first, last)`.
///
/// # Safety
/// `first` and `last` must belong to the same allocation with `first <= last`, and every slot in
/// between must hold a live object, as for [`destroy`].
pub unsafe fn destroy_range<T>(first: NonNull<T>, last: NonNull<T>) {
    if size_of::<T>() == 0 {
        // Zero-sized elements all share one address, so a range of them has no length. Callers
        // holding ZSTs use destroy_n.
        debug_assert_eq!(first, last, "destroy_range can't count zero-sized elements");
        return;
    }

    // SAFETY: The caller guarantees both pointers are within the same allocation and ordered.
    let count = unsafe { last.offset_from(first) };
    debug_assert!(count >= 0, "destroy_range called with last before first");

    // SAFETY: count live objects begin at first, as guaranteed by the caller.
    unsafe { destroy_n(first, count as usize) }
}
