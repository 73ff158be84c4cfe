// Copyright (c) 2024 Mike Tsao

//! Errors that callers can correct by changing their arguments.

use thiserror::Error;

/// The errors that rhythm generation can report.
///
/// Broken internal invariants are not represented here. They are bugs, and
/// they panic.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The pulse count was negative or greater than the step count.
    #[error("pulses must be in 0..={steps}, but got {pulses}")]
    InvalidArgument {
        /// The requested number of steps.
        steps: usize,
        /// The rejected number of pulses.
        pulses: i64,
    },
}

/// Shorthand for results whose error is [enum@Error].
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_bad_values() {
        let e = Error::InvalidArgument {
            steps: 4,
            pulses: 5,
        };
        assert_eq!(e.to_string(), "pulses must be in 0..=4, but got 5");
    }
}
