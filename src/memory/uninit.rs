//! Algorithms that write into uninitialized storage.
//!
//! Writing into a slot that doesn't hold a live object has to construct rather than assign,
//! otherwise the "old value" that assignment drops would be garbage. Every function here takes its
//! destination as `&mut [MaybeUninit<T>]` and returns the part of the destination it didn't touch,
//! so that writes can be chained:
//!
//! ```
//! # use std::mem::MaybeUninit;
//! # use easy_stl::memory::uninit::{uninitialized_copy, uninitialized_fill_n};
//! let mut slots = [const { MaybeUninit::<String>::uninit() }; 4];
//! let tail = uninitialized_fill_n(&mut slots, 1, &String::from("a"));
//! let tail = uninitialized_copy(&[String::from("b"), String::from("c")], tail);
//! assert_eq!(tail.len(), 1);
//! // SAFETY: The first three slots were initialized above.
//! let written = unsafe { [slots[0].assume_init_read(), slots[1].assume_init_read(), slots[2].assume_init_read()] };
//! assert_eq!(written, ["a", "b", "c"]);
//! ```
//!
//! # Failure
//! Construction is all-or-nothing per call. If a clone or generator panics (or returns an error
//! for [`try_uninitialized_fill_with`]) partway through, every element constructed so far by that
//! call is destroyed, in reverse order, before the failure propagates. The destination is left
//! entirely uninitialized.
//!
//! A destination with fewer slots than required is a bug in the caller, and panics before anything
//! is written.
//!
//! # Trivial Types
//! Moving is always a bitwise copy in Rust, so [`uninitialized_move`] can't fail and never needs to
//! roll back. For [`Copy`] types, [`uninitialized_copy_bitwise`] copies the whole range in one go,
//! producing exactly the same bytes as [`uninitialized_copy`]. Rolling back a type without drop
//! glue costs nothing: the destruction loop is removed at compile time.

use std::mem::{self, MaybeUninit};
use std::ptr::{self, NonNull};

use super::construct;

/// Tracks how much of a destination has been initialized, destroying that prefix if dropped
/// before [`commit`](InitGuard::commit) is called. Dropping happens both when unwinding from a
/// panic and on an early `?` return.
struct InitGuard<'a, T> {
    slots: &'a mut [MaybeUninit<T>],
    init: usize,
}

impl<'a, T> InitGuard<'a, T> {
    const fn new(slots: &'a mut [MaybeUninit<T>]) -> InitGuard<'a, T> {
        InitGuard { slots, init: 0 }
    }

    const fn is_full(&self) -> bool {
        self.init == self.slots.len()
    }

    fn push(&mut self, value: T) {
        self.slots[self.init].write(value);
        self.init += 1;
    }

    /// Keeps everything written so far and returns the untouched remainder of the destination.
    fn commit(mut self) -> &'a mut [MaybeUninit<T>] {
        let slots = mem::take(&mut self.slots);
        let init = mem::replace(&mut self.init, 0);
        &mut slots[init..]
    }
}

impl<T> Drop for InitGuard<'_, T> {
    fn drop(&mut self) {
        if self.init == 0 {
            return;
        }

        trace!("rolling back {} partially constructed elements", self.init);

        if const { mem::needs_drop::<T>() } {
            for slot in self.slots[..self.init].iter_mut().rev() {
                // SAFETY: Every slot below init was written by push and hasn't been handed out.
                unsafe { construct::destroy(NonNull::from(slot).cast::<T>()) }
            }
        }
    }
}

/// Asserts that `dest` can hold `count` elements.
fn check_room<T>(dest: &[MaybeUninit<T>], count: usize) {
    assert!(
        count <= dest.len(),
        "Destination has {} slots but {} are required!",
        dest.len(),
        count,
    );
}

/// Clone-constructs every element of `src` into the start of `dest`, returning the remaining
/// uninitialized slots.
///
/// # Panics
/// Panics if `dest` is shorter than `src`. Panics from [`Clone::clone`] propagate after the
/// elements already written are destroyed.
pub fn uninitialized_copy<'d, T: Clone>(
    src: &[T],
    dest: &'d mut [MaybeUninit<T>],
) -> &'d mut [MaybeUninit<T>] {
    check_room(dest, src.len());

    let mut guard = InitGuard::new(dest);
    for item in src {
        guard.push(item.clone());
    }
    guard.commit()
}

/// Clone-constructs `count` elements read from `src` into the start of `dest`, returning the
/// remaining uninitialized slots.
///
/// # Panics
/// Panics if `dest` is shorter than `count`, or if `src` yields fewer than `count` elements (after
/// rolling back). Panics from [`Clone::clone`] propagate after the elements already written are
/// destroyed.
pub fn uninitialized_copy_n<'a, 'd, T, I>(
    src: I,
    count: usize,
    dest: &'d mut [MaybeUninit<T>],
) -> &'d mut [MaybeUninit<T>]
where
    T: Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    check_room(dest, count);

    let mut src = src.into_iter();
    let mut guard = InitGuard::new(&mut dest[..count]);
    while !guard.is_full() {
        match src.next() {
            Some(item) => guard.push(item.clone()),
            None => panic!("Source ran out after {} of {} elements!", guard.init, count),
        }
    }
    guard.commit();

    &mut dest[count..]
}

/// Copies every element of `src` into the start of `dest` with a single bitwise copy, returning
/// the remaining uninitialized slots. The result is identical to [`uninitialized_copy`], which it
/// replaces for types where cloning is known to be a plain copy.
///
/// # Panics
/// Panics if `dest` is shorter than `src`.
pub fn uninitialized_copy_bitwise<'d, T: Copy>(
    src: &[T],
    dest: &'d mut [MaybeUninit<T>],
) -> &'d mut [MaybeUninit<T>] {
    check_room(dest, src.len());

    // SAFETY: dest has room for src.len() elements, and the two slices can't overlap because dest
    // is borrowed mutably. T is Copy, so a bitwise copy is a complete copy.
    unsafe {
        ptr::copy_nonoverlapping(src.as_ptr(), dest.as_mut_ptr().cast::<T>(), src.len());
    }

    &mut dest[src.len()..]
}

/// Clone-constructs `value` into every slot of `dest`.
///
/// # Panics
/// Panics from [`Clone::clone`] propagate after the elements already written are destroyed.
pub fn uninitialized_fill<T: Clone>(dest: &mut [MaybeUninit<T>], value: &T) {
    let count = dest.len();
    uninitialized_fill_n(dest, count, value);
}

/// Clone-constructs `value` into the first `count` slots of `dest`, returning the remaining
/// uninitialized slots.
///
/// # Panics
/// Panics if `dest` is shorter than `count`. Panics from [`Clone::clone`] propagate after the
/// elements already written are destroyed.
pub fn uninitialized_fill_n<'d, T: Clone>(
    dest: &'d mut [MaybeUninit<T>],
    count: usize,
    value: &T,
) -> &'d mut [MaybeUninit<T>] {
    uninitialized_fill_with(dest, count, |_| value.clone())
}

/// Constructs the first `count` slots of `dest` from `init(index)`, returning the remaining
/// uninitialized slots.
///
/// # Panics
/// Panics if `dest` is shorter than `count`. Panics from `init` propagate after the elements
/// already written are destroyed.
pub fn uninitialized_fill_with<'d, T, F>(
    dest: &'d mut [MaybeUninit<T>],
    count: usize,
    mut init: F,
) -> &'d mut [MaybeUninit<T>]
where
    F: FnMut(usize) -> T,
{
    check_room(dest, count);

    let mut guard = InitGuard::new(dest);
    for index in 0..count {
        guard.push(init(index));
    }
    guard.commit()
}

/// Constructs the first `count` slots of `dest` from `init(index)`, stopping at the first error.
///
/// # Errors
/// Returns the first error produced by `init`, after destroying the elements already written.
///
/// # Panics
/// Panics if `dest` is shorter than `count`.
pub fn try_uninitialized_fill_with<'d, T, E, F>(
    dest: &'d mut [MaybeUninit<T>],
    count: usize,
    mut init: F,
) -> Result<&'d mut [MaybeUninit<T>], E>
where
    F: FnMut(usize) -> Result<T, E>,
{
    check_room(dest, count);

    let mut guard = InitGuard::new(dest);
    for index in 0..count {
        guard.push(init(index)?);
    }
    Ok(guard.commit())
}

/// Moves elements out of `src` into `dest` until either runs out. Returns the number of elements
/// written and the remaining uninitialized slots. Elements left in `src` are not consumed.
///
/// # Panics
/// Panics from the iterator propagate after the elements already written are destroyed.
pub fn uninitialized_collect<'d, T, I>(
    src: I,
    dest: &'d mut [MaybeUninit<T>],
) -> (usize, &'d mut [MaybeUninit<T>])
where
    I: IntoIterator<Item = T>,
{
    let mut src = src.into_iter();
    let mut guard = InitGuard::new(dest);

    while !guard.is_full() {
        match src.next() {
            Some(item) => guard.push(item),
            None => break,
        }
    }

    let written = guard.init;
    (written, guard.commit())
}

/// Relocates every element of `src` into the start of `dest`, returning the remaining
/// uninitialized slots. Afterwards the slots of `src` must be treated as uninitialized.
///
/// # Safety
/// Every slot of `src` must hold a live object.
///
/// # Panics
/// Panics if `dest` is shorter than `src`.
pub unsafe fn uninitialized_move<'d, T>(
    src: &mut [MaybeUninit<T>],
    dest: &'d mut [MaybeUninit<T>],
) -> &'d mut [MaybeUninit<T>] {
    let count = src.len();
    // SAFETY: Requirements are passed on to the caller.
    unsafe { uninitialized_move_n(src, count, dest) }
}

/// Relocates the first `count` elements of `src` into the start of `dest`, returning the
/// remaining uninitialized slots. Afterwards those slots of `src` must be treated as
/// uninitialized.
///
/// # Safety
/// The first `count` slots of `src` must hold live objects.
///
/// # Panics
/// Panics if either `src` or `dest` is shorter than `count`.
pub unsafe fn uninitialized_move_n<'d, T>(
    src: &mut [MaybeUninit<T>],
    count: usize,
    dest: &'d mut [MaybeUninit<T>],
) -> &'d mut [MaybeUninit<T>] {
    assert!(count <= src.len(), "Source has {} elements but {} were requested!", src.len(), count);
    check_room(dest, count);

    // SAFETY: Both slices hold at least count slots and can't overlap, being separate mutable
    // borrows. The caller guarantees the source slots are initialized, and ownership of the
    // objects passes to dest.
    unsafe { ptr::copy_nonoverlapping(src.as_ptr(), dest.as_mut_ptr(), count) }

    &mut dest[count..]
}
