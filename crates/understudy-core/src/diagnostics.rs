// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Loud-failure primitive for test code.
//!
//! Library operations return [`Result`]s. Tests that want the first failure to
//! abort with the error's message call [`OrFail::or_fail`] (or [`fail`]
//! directly); the panic location points at the caller.

use std::fmt::Display;

/// Abort the current test with `message`.
#[track_caller]
#[allow(clippy::panic)]
pub fn fail(message: impl Display) -> ! {
    panic!("{message}")
}

/// Unwrap a result, aborting the test with the error's message on failure.
pub trait OrFail<T> {
    /// Return the success value or [`fail`] with the error.
    fn or_fail(self) -> T;
}

impl<T, E: Display> OrFail<T> for Result<T, E> {
    #[track_caller]
    fn or_fail(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) => fail(err),
        }
    }
}
