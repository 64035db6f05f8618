use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::mem;
use std::slice;

use super::Vector;
use crate::memory::{RawBlock, construct};

impl<T> IntoIterator for Vector<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        // Leave self empty, so that dropping it afterwards does nothing.
        let buf = mem::take(&mut self.buf);
        let end = mem::replace(&mut self.len, 0);

        IntoIter { buf, start: 0, end }
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A type for owned iteration over a [`Vector`]. See [`Vector::into_iter`].
///
/// The iterator takes over the Vector's storage. Elements that haven't been yielded by the time it
/// is dropped are destroyed, and then the storage is released.
pub struct IntoIter<T> {
    buf: RawBlock<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// Returns the elements that haven't been yielded yet as a slice.
    pub const fn as_slice(&self) -> &[T] {
        // SAFETY: Slots start..end hold live elements within the block.
        unsafe {
            slice::from_raw_parts(
                self.buf.slot(self.start).as_ptr().cast_const(),
                self.end - self.start,
            )
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        // SAFETY: The slot at start is live. Incrementing start afterwards moves the value out.
        let value = unsafe { self.buf.slot(self.start).read() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        self.end -= 1;
        // SAFETY: The slot at the newly decremented end is live, and is now outside of the range.
        Some(unsafe { self.buf.slot(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let count = self.end - self.start;
        // Empty the range first so that a panicking destructor can't lead to a double drop.
        self.end = self.start;

        // SAFETY: Slots start..start + count hold the elements that were never yielded.
        unsafe { construct::destroy_n(self.buf.slot(self.start), count) }

        // self.buf releases the storage when it is dropped.
    }
}

impl<T: Debug> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
