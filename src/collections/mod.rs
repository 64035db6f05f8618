//! Collection types built on the [`memory`](crate::memory) layer.
//!
//! # Method
//! Applicable types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which
//! saves me from writing all of the read-only slice functionality again.

pub mod contiguous;
