use std::borrow::{Borrow, BorrowMut};
use std::cmp::{self, Ordering};
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::mem::MaybeUninit;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::memory::uninit::{
    try_uninitialized_fill_with, uninitialized_collect, uninitialized_copy,
    uninitialized_copy_bitwise, uninitialized_fill, uninitialized_fill_n,
    uninitialized_fill_with, uninitialized_move_n,
};
use crate::memory::{Allocator, RawBlock, construct};
use crate::util::error::{AllocError, CapacityOverflow, IndexOutOfBounds};
use crate::util::result::{AllocResultExtension, ResultExtension};

/// A variable size contiguous collection, built on a [`RawBlock<T>`].
///
/// Slots `0..len` of the block hold live elements, while slots `len..capacity` are raw storage.
/// Elements only ever enter the spare slots through construction, and growing always builds the
/// new block completely before the old one is released, so a failed operation never leaves the
/// Vector half-updated.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Vector.
/// - `i`: The index of the item in question.
/// - `m`: The number of items being added.
///
/// | Method | Complexity |
/// |-|-|
/// | `at` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `push_unchecked` | `O(1)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)`* |
/// | `remove` | `O(n-i)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `shrink_to_fit` | `O(n)` |
/// | `resize` | `O(m)`*, `O(n+m)` |
/// | `extend_from_slice` | `O(m)`*, `O(n+m)` |
///
/// \* If the Vector doesn't have enough capacity for the new elements, it has to reallocate,
/// moving all `n` existing items. Capacity at least doubles each time, so this averages out to
/// `O(1)` per added element.
///
/// \** If the Vector has enough capacity already, `reserve` is `O(1)`.
pub struct Vector<T> {
    pub(crate) buf: RawBlock<T>,
    pub(crate) len: usize,
}

impl<T> Vector<T> {
    /// The capacity of a Vector created with [`Vector::new`].
    pub const DEFAULT_CAP: usize = 16;
    /// The factor by which capacity is multiplied when a full Vector grows.
    pub const GROWTH_FACTOR: usize = 2;
    /// The smallest capacity a Vector grows to from empty.
    pub const MIN_CAP: usize = 4;

    /// Creates a new, empty Vector with capacity [`Vector::DEFAULT_CAP`].
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 16);
    /// ```
    pub fn new() -> Vector<T> {
        Vector::with_capacity(Self::DEFAULT_CAP)
    }

    /// Creates a new, empty Vector with capacity exactly equal to the provided value, allowing
    /// values to be added without reallocation. A capacity of 0 doesn't allocate.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::with_capacity(5);
    /// assert_eq!(vec.capacity(), 5);
    /// vec.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(vec.capacity(), 5);
    /// ```
    pub fn with_capacity(cap: usize) -> Vector<T> {
        Vector {
            buf: RawBlock::allocate(cap),
            len: 0,
        }
    }

    /// Creates a Vector of exactly `count` elements produced by `init(index)`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`]. If `init` panics, the elements already
    /// produced are dropped before the panic continues.
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let vec = Vector::from_fn(4, |i| i * i);
    /// assert_eq!(&*vec, &[0, 1, 4, 9]);
    /// ```
    pub fn from_fn<F: FnMut(usize) -> T>(count: usize, init: F) -> Vector<T> {
        let mut vec = Vector::with_capacity(count);
        uninitialized_fill_with(vec.spare_capacity_mut(), count, init);
        vec.len = count;
        vec
    }

    /// Creates a Vector of exactly `count` elements produced by `init(index)`, stopping at the
    /// first error.
    ///
    /// # Errors
    /// Returns the first error produced by `init`. Elements produced before it are dropped.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn try_from_fn<E, F>(count: usize, init: F) -> Result<Vector<T>, E>
    where
        F: FnMut(usize) -> Result<T, E>,
    {
        let mut vec = Vector::with_capacity(count);
        try_uninitialized_fill_with(vec.spare_capacity_mut(), count, init)?;
        vec.len = count;
        Ok(vec)
    }

    /// Creates a Vector from a range whose length is known up front. Exactly
    /// [`len`](ExactSizeIterator::len) slots are allocated and filled by moving each item in.
    ///
    /// The range is trusted only as far as the allocation: if it yields fewer items than it
    /// claimed, the Vector is shorter, and any extra items are never taken from it.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`]. If the iterator panics, the items
    /// already moved in are dropped before the panic continues.
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let vec = Vector::from_range(1..4);
    /// assert_eq!(&*vec, &[1, 2, 3]);
    /// assert_eq!(vec.capacity(), 3);
    /// ```
    pub fn from_range<I>(range: I) -> Vector<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = range.into_iter();
        let mut vec = Vector::with_capacity(iter.len());

        let (written, _) = uninitialized_collect(iter, vec.spare_capacity_mut());
        vec.len = written;

        vec
    }

    /// Returns the length of the Vector.
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let vec = Vector::from_range(1_u8..=3);
    /// assert_eq!(vec.len(), 3);
    /// ```
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Vector contains no elements.
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::new();
    /// assert!(vec.is_empty());
    /// vec.push(1);
    /// assert!(!vec.is_empty())
    /// ```
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the Vector. Unlike [`Vec`], the capacity is guaranteed to be
    /// exactly the value provided to any of the various capacity manipulation functions.
    pub const fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the largest number of elements a Vector of `T` can hold.
    pub const fn max_size() -> usize {
        Allocator::<T>::max_size()
    }

    /// Returns a pointer to the first element. Dangling if the Vector has no allocation.
    pub const fn as_ptr(&self) -> *const T {
        self.buf.as_ptr().as_ptr().cast_const()
    }

    /// Returns a mutable pointer to the first element. Dangling if the Vector has no allocation.
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_ptr().as_ptr()
    }

    /// Returns the spare capacity of the Vector, the slots from `len` to `capacity`, which hold no
    /// live elements. Once written (for example with the algorithms in
    /// [`uninit`](crate::memory::uninit)), they can be claimed with [`Vector::set_len`].
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// # use easy_stl::memory::uninit::uninitialized_fill_n;
    /// let mut vec = Vector::with_capacity(4);
    /// vec.push(1);
    /// uninitialized_fill_n(vec.spare_capacity_mut(), 2, &5);
    /// // SAFETY: Two more elements were just initialized.
    /// unsafe { vec.set_len(3) };
    /// assert_eq!(&*vec, &[1, 5, 5]);
    /// ```
    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] {
        let len = self.len;
        &mut self.buf.slots_mut()[len..]
    }

    /// Sets the length of the Vector without constructing or destroying anything.
    ///
    /// # Safety
    /// `new_len` must be no greater than the capacity, and all elements below `new_len` must be
    /// initialized. Elements above it are forgotten rather than dropped.
    pub const unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity());
        self.len = new_len;
    }

    /// Returns a reference to the element at `index`, checking that it is in bounds.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let vec = Vector::from_range(10..13);
    /// assert_eq!(vec.at(1), Ok(&11));
    /// assert!(vec.at(3).is_err());
    /// ```
    pub fn at(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index is < len, and all values < len are initialized.
        Ok(unsafe { self.buf.slot(index).as_ref() })
    }

    /// Returns a mutable reference to the element at `index`, checking that it is in bounds.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index is < len, and all values < len are initialized. The borrow is tied to
        // &mut self.
        Ok(unsafe { self.buf.slot(index).as_mut() })
    }

    /// Returns a reference to the first element.
    ///
    /// # Panics
    /// Panics if the Vector is empty.
    pub fn front(&self) -> &T {
        match self.first() {
            Some(value) => value,
            None => empty_panic("front"),
        }
    }

    /// Returns a mutable reference to the first element.
    ///
    /// # Panics
    /// Panics if the Vector is empty.
    pub fn front_mut(&mut self) -> &mut T {
        match self.first_mut() {
            Some(value) => value,
            None => empty_panic("front_mut"),
        }
    }

    /// Returns a reference to the last element.
    ///
    /// # Panics
    /// Panics if the Vector is empty.
    pub fn back(&self) -> &T {
        match self.last() {
            Some(value) => value,
            None => empty_panic("back"),
        }
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Panics
    /// Panics if the Vector is empty.
    pub fn back_mut(&mut self) -> &mut T {
        match self.last_mut() {
            Some(value) => value,
            None => empty_panic("back_mut"),
        }
    }

    /// Push the provided value onto the end of the Vector, increasing the capacity if required.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let mut vec = Vector::<u8>::new();
    /// for i in 0..=5 {
    ///     vec.push(i);
    /// }
    /// assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn push(&mut self, value: T) {
        self.reserve_additional(1);
        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.push_unchecked(value) }
    }

    /// Push the provided value onto the end of the Vector, assuming that there is enough capacity
    /// to do so.
    ///
    /// # Safety
    /// It is up to the caller to ensure that the Vector has enough capacity to add the provided
    /// value, using methods like [`reserve`](Vector::reserve) or
    /// [`with_capacity`](Vector::with_capacity) to do so. Using this method on a Vector without
    /// enough capacity is undefined behavior.
    pub unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: It is up to the caller to ensure that the Vector has enough capacity for this
        // push. The slot at len is uninitialized.
        unsafe { construct::construct(self.buf.slot(self.len), value) }
        self.len += 1;
    }

    /// Constructs a new element in place at the end of the Vector from the value produced by
    /// `init`, returning a reference to it. The Vector grows first if it is full.
    ///
    /// If `init` panics, the length and elements of the Vector are unchanged.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let mut vec = Vector::new();
    /// vec.push_with(|| String::from("hello")).push_str(" world");
    /// assert_eq!(vec[0], "hello world");
    /// ```
    pub fn push_with<F: FnOnce() -> T>(&mut self, init: F) -> &mut T {
        self.reserve_additional(1);

        // SAFETY: There is room for at least one more element, so the slot at len is within the
        // allocation and uninitialized.
        let mut slot = unsafe { self.buf.slot(self.len) };
        // SAFETY: As above. If init panics, nothing has been written and len is unchanged.
        unsafe { construct::construct_with(slot, init) }
        self.len += 1;

        // SAFETY: The slot was just initialized and the borrow is tied to &mut self.
        unsafe { slot.as_mut() }
    }

    /// Pops the last value off the end of the Vector, returning an owned value if the Vector has
    /// length greater than 0.
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let mut vec = Vector::from_range(0..5);
    /// for i in (0..vec.len()).rev() {
    ///     assert_eq!(vec.pop(), Some(i));
    /// }
    /// assert_eq!(vec.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            // Decrement len before reading.
            self.len -= 1;

            // SAFETY: len has just been decremented and is within the capacity of the Vector, and
            // the value there is initialized. Reading makes a bitwise copy while the slot is now
            // outside of len and is forgotten, which moves the value out.
            Some(unsafe { self.buf.slot(self.len).read() })
        }
    }

    /// Destroys the last element of the Vector in place.
    ///
    /// # Panics
    /// Panics if the Vector is empty.
    pub fn pop_back(&mut self) {
        if self.len == 0 {
            empty_panic("pop_back")
        }

        self.len -= 1;
        // SAFETY: The slot at the old len - 1 holds a live element, and is now outside of len so it
        // won't be destroyed again.
        unsafe { construct::destroy(self.buf.slot(self.len)) }
    }

    /// Inserts the provided value at the given index, growing and moving items as necessary.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let mut vec = Vector::from_range(0..3);
    /// vec.insert(1, 100);
    /// vec.insert(1, 200);
    /// vec.insert(3, 300);
    /// vec.insert(6, 400);
    /// assert_eq!(&*vec, &[0, 200, 100, 300, 1, 2, 400]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        if index > self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            }).throw()
        }

        self.reserve_additional(1);

        // SAFETY: There is room for one more element, so shifting len - index elements up by one
        // stays within the allocation. The slot at index is then logically uninitialized and is
        // constructed straight away.
        unsafe {
            let slot = self.buf.slot(index);
            ptr::copy(slot.as_ptr(), slot.add(1).as_ptr(), self.len - index);
            construct::construct(slot, value);
        }

        self.len += 1;
    }

    /// Removes the element at the provided index, moving all following values to fill in the gap.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = "Hello world!".chars().collect();
    /// assert_eq!(vec.remove(1), 'e');
    /// assert_eq!(vec.remove(4), ' ');
    /// assert_eq!(vec, "Hlloworld!".chars().collect());
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        self.check_index(index).throw();

        // SAFETY: index is < len, so the value there is initialized. It is read out before the
        // following elements are shifted down over it.
        unsafe {
            let slot = self.buf.slot(index);
            let value = slot.read();
            ptr::copy(slot.add(1).as_ptr(), slot.as_ptr(), self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Shortens the Vector to `new_len` elements, destroying the rest. Does nothing if the Vector
    /// is already no longer than `new_len`. Capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }

        let count = self.len - new_len;
        // Shrink len first so that a panicking destructor can't lead to a double drop.
        self.len = new_len;

        // SAFETY: Slots new_len..new_len + count held live elements and are now outside of len.
        unsafe { construct::destroy_n(self.buf.slot(new_len), count) }
    }

    /// Destroys every element of the Vector, keeping its capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Moves all elements of `other` onto the end of self.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn append(&mut self, mut other: Vector<T>) {
        let count = other.len;
        self.reserve_additional(count);

        // SAFETY: The elements of other are about to be moved out, after which other must not drop
        // them.
        unsafe { other.set_len(0) };

        // SAFETY: The first count slots of other hold live elements, which are relocated into
        // self's spare capacity and are no longer owned by other.
        unsafe { uninitialized_move_n(other.buf.slots_mut(), count, self.spare_capacity_mut()) };
        self.len += count;
    }

    /// Ensures that the Vector has a capacity of at least `cap`. If it doesn't already, it is
    /// reallocated to exactly `cap`.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let mut vec = Vector::from_range(0..3);
    /// vec.reserve(100);
    /// assert_eq!(vec.capacity(), 100);
    /// vec.reserve(10);
    /// assert_eq!(vec.capacity(), 100);
    /// ```
    pub fn reserve(&mut self, cap: usize) {
        if cap > self.capacity() {
            self.realloc_with_cap(cap);
        }
    }

    /// Like [`Vector::reserve`], but reports failure instead of panicking. On failure the Vector
    /// is unchanged.
    ///
    /// # Errors
    /// Returns an [`AllocError`] if the new storage can't be allocated.
    pub fn try_reserve(&mut self, cap: usize) -> Result<(), AllocError> {
        if cap > self.capacity() {
            self.try_realloc_with_cap(cap)?;
        }
        Ok(())
    }

    /// Shrinks the Vector so that its capacity is equal to its length.
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let mut vec = Vector::from_range(0..3);
    /// vec.reserve(100);
    /// vec.shrink_to_fit();
    /// assert_eq!(vec.capacity(), 3);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        if self.len < self.capacity() {
            self.realloc_with_cap(self.len);
        }
    }

    /// Resizes the Vector to `new_len`, dropping trailing elements or filling the new slots with
    /// values produced by `init`.
    ///
    /// If `init` panics, the length and elements of the Vector are unchanged.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut init: F) {
        let Some(extra) = self.prepare_resize(new_len) else { return; };

        uninitialized_fill_with(self.spare_capacity_mut(), extra, |_| init());
        self.len = new_len;
    }

    /// Resizes the Vector to `new_len`, dropping trailing elements or filling the new slots with
    /// values produced by `init`, stopping at the first error.
    ///
    /// # Errors
    /// Returns the first error produced by `init`, leaving the length and elements of the Vector
    /// unchanged.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn try_resize_with<E, F>(&mut self, new_len: usize, mut init: F) -> Result<(), E>
    where
        F: FnMut() -> Result<T, E>,
    {
        let Some(extra) = self.prepare_resize(new_len) else { return Ok(()); };

        try_uninitialized_fill_with(self.spare_capacity_mut(), extra, |_| init())?;
        self.len = new_len;
        Ok(())
    }

    /// Truncates to `new_len` and returns None, or reserves room for the extra elements and
    /// returns how many are needed.
    fn prepare_resize(&mut self, new_len: usize) -> Option<usize> {
        if new_len <= self.len {
            self.truncate(new_len);
            return None;
        }

        let extra = new_len - self.len;
        self.reserve_additional(extra);
        Some(extra)
    }

    /// Ensures that there is room for `additional` more elements, growing by at least
    /// [`Vector::GROWTH_FACTOR`] when there isn't.
    ///
    /// # Panics
    /// Panics if the required capacity overflows or its layout would exceed [`isize::MAX`].
    pub(crate) fn reserve_additional(&mut self, additional: usize) {
        let required = self.len.checked_add(additional).ok_or(CapacityOverflow).throw();

        if required > self.capacity() {
            self.grow_for(required);
        }
    }

    /// Grows the internal block to hold at least `required` elements. The new capacity is the
    /// largest of `required`, [`Vector::MIN_CAP`] and the current capacity times
    /// [`Vector::GROWTH_FACTOR`] (limited to [`Vector::max_size`]).
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub(crate) fn grow_for(&mut self, required: usize) {
        let grown = cmp::min(
            self.capacity().saturating_mul(Self::GROWTH_FACTOR),
            Self::max_size(),
        );
        let new_cap = cmp::max(cmp::max(grown, required), Self::MIN_CAP);

        self.realloc_with_cap(new_cap);
    }

    /// Reallocates the internal block with the provided capacity.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub(crate) fn realloc_with_cap(&mut self, new_cap: usize) {
        self.try_realloc_with_cap(new_cap).throw_alloc();
    }

    /// Moves every element into a new block of exactly `new_cap` slots and releases the old one.
    /// The new block is allocated before anything else happens, so if that fails the Vector is
    /// untouched.
    pub(crate) fn try_realloc_with_cap(&mut self, new_cap: usize) -> Result<(), AllocError> {
        debug_assert!(new_cap >= self.len);

        let mut new_buf = RawBlock::try_allocate(new_cap)?;

        // SAFETY: The first len slots of the old block are live. After the move they belong to the
        // new block, and the old block is released without destroying anything.
        unsafe { uninitialized_move_n(self.buf.slots_mut(), self.len, new_buf.slots_mut()) };

        debug!(
            "reallocating Vector from {} to {} slots, moving {} elements",
            self.capacity(),
            new_cap,
            self.len
        );
        // Dropping the old block releases its storage.
        self.buf = new_buf;

        Ok(())
    }

    /// Checks that the provided index is within the bounds of self.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if the provided index is out of bounds.
    pub(crate) const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index >= self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            })
        } else {
            Ok(())
        }
    }
}

impl<T: Default> Vector<T> {
    /// Creates a Vector of exactly `count` default-constructed elements.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let vec = Vector::<u32>::with_count(3);
    /// assert_eq!(&*vec, &[0, 0, 0]);
    /// assert_eq!(vec.capacity(), 3);
    /// ```
    pub fn with_count(count: usize) -> Vector<T> {
        Vector::from_fn(count, |_| T::default())
    }

    /// Resizes the Vector to `new_len`, dropping trailing elements or filling the new slots with
    /// default-constructed values.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn resize_default(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }
}

impl<T: Clone> Vector<T> {
    /// Creates a Vector of exactly `count` clones of `value`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`]. If a clone panics, the clones already
    /// made are dropped before the panic continues.
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let vec = Vector::with_count_and_value(10, 1);
    /// assert_eq!(vec.len(), 10);
    /// assert!(vec.iter().all(|&i| i == 1));
    /// ```
    pub fn with_count_and_value(count: usize, value: T) -> Vector<T> {
        let mut vec = Vector::with_capacity(count);
        uninitialized_fill(vec.spare_capacity_mut(), &value);
        vec.len = count;
        vec
    }

    /// Creates a Vector with exactly enough capacity for a clone of every element in `src`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`]. If a clone panics, the clones already
    /// made are dropped before the panic continues.
    pub fn from_slice(src: &[T]) -> Vector<T> {
        let mut vec = Vector::with_capacity(src.len());
        uninitialized_copy(src, vec.spare_capacity_mut());
        vec.len = src.len();
        vec
    }

    /// Appends a clone of every element in `src`.
    ///
    /// If a clone panics, the length and elements of the Vector are unchanged.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn extend_from_slice(&mut self, src: &[T]) {
        self.reserve_additional(src.len());
        uninitialized_copy(src, self.spare_capacity_mut());
        self.len += src.len();
    }

    /// Resizes the Vector to `new_len`, dropping trailing elements or filling the new slots with
    /// clones of `value`.
    ///
    /// If a clone panics, the length and elements of the Vector are unchanged.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use easy_stl::collections::contiguous::Vector;
    /// let mut vec = Vector::from_range(0..4);
    /// vec.resize(2, 9);
    /// assert_eq!(&*vec, &[0, 1]);
    /// vec.resize(5, 9);
    /// assert_eq!(&*vec, &[0, 1, 9, 9, 9]);
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T) {
        let Some(extra) = self.prepare_resize(new_len) else { return; };

        uninitialized_fill_n(self.spare_capacity_mut(), extra, &value);
        self.len = new_len;
    }
}

impl<T: Copy> Vector<T> {
    /// Creates a Vector from a copy of `src`, using a single bitwise copy.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn from_copy_slice(src: &[T]) -> Vector<T> {
        let mut vec = Vector::with_capacity(src.len());
        uninitialized_copy_bitwise(src, vec.spare_capacity_mut());
        vec.len = src.len();
        vec
    }

    /// Appends a copy of `src`, using a single bitwise copy.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn extend_from_copy_slice(&mut self, src: &[T]) {
        self.reserve_additional(src.len());
        uninitialized_copy_bitwise(src, self.spare_capacity_mut());
        self.len += src.len();
    }
}

#[track_caller]
fn empty_panic(op: &str) -> ! {
    panic!("Called {} on an empty Vector!", op)
}

impl<T> Extend<T> for Vector<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        let iter = iter.into_iter();
        self.reserve_additional(iter.size_hint().0);

        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Clone + 'a> Extend<&'a T> for Vector<T> {
    fn extend<A: IntoIterator<Item = &'a T>>(&mut self, iter: A) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut vec = Vector::with_capacity(iter.size_hint().0);

        for item in iter {
            vec.push(item);
        }

        vec
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(value: [T; N]) -> Self {
        Vector::from_range(value)
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    fn from(value: &[T]) -> Self {
        Vector::from_slice(value)
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        // SAFETY: All values less than len are initialized and safe to drop.
        unsafe { construct::destroy_n(self.buf.as_ptr(), self.len) }

        // Implicitly drop self.buf afterwards, which releases the storage without touching the
        // (now destroyed) elements.
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: Vector is valid as a slice for len values, which are all initialized. The pointer
        // is nonnull, properly aligned and the range entirely contained within this Vector.
        // The borrow checker enforces that self isn't mutated due to this function taking a &self.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: Vector is valid as a slice for len values, which are all initialized. The pointer
        // is nonnull, properly aligned and the range entirely contained within this Vector.
        // The borrow checker enforces that self isn't accessed due to this function taking a
        // &mut self.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T> Borrow<[T]> for Vector<T> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> BorrowMut<[T]> for Vector<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

impl<T: Clone> Clone for Vector<T> {
    /// Clones every element into a new Vector whose capacity is exactly the length of self.
    fn clone(&self) -> Self {
        Vector::from_slice(self)
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialOrd> PartialOrd for Vector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).partial_cmp(&**other)
    }
}

impl<T: Ord> Ord for Vector<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (**self).cmp(&**other)
    }
}

impl<T: Hash> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.capacity())
            .finish()
    }
}
