#![warn(missing_docs)]
//! Crate-internal helpers: error types, logging macros and test utilities.

#[macro_use]
pub(crate) mod logging;

pub mod error;
pub mod panic;
pub mod result;
#[cfg(test)]
pub mod tracked;
