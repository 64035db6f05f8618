//! Extensions for turning typed errors into panics in the panicking halves of an API.

use std::alloc;
use std::error::Error;

use crate::util::error::AllocError;

pub(crate) trait ResultExtension<T, E: Error> {
    /// A method similar to [`Result::unwrap`], except that it applies only to types which implement
    /// [`Error`] and panics with the message of the error itself.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    fn throw(self) -> T {
        match self {
            Ok(val) => val,
            Err(error) => panic!("{}", error),
        }
    }
}

pub(crate) trait AllocResultExtension<T> {
    /// Unwraps the result of an allocation. Running out of memory is reported through
    /// [`alloc::handle_alloc_error`] as recommended, rather than by allocating a panic message.
    ///
    /// # Panics
    /// Panics on [`AllocError::CapacityOverflow`].
    fn throw_alloc(self) -> T;
}

impl<T> AllocResultExtension<T> for Result<T, AllocError> {
    fn throw_alloc(self) -> T {
        match self {
            Ok(val) => val,
            Err(AllocError::OutOfMemory(oom)) => alloc::handle_alloc_error(oom.layout),
            Err(error) => panic!("{}", error),
        }
    }
}
