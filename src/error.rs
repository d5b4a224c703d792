//! Error kinds for the API boundary (C10, §7). Decapsulate never produces
//! one of these: every ciphertext, well-formed or not, yields a 32-byte
//! shared secret via implicit rejection.

use core::fmt;

/// Failure modes exposed at the external interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The supplied RNG failed to deliver bytes.
    RngFailure,
    /// A byte buffer did not decode to a valid parameter-set value (for
    /// example, an encoded polynomial coefficient that was not reduced
    /// modulo `q`).
    InvalidInputLength,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RngFailure => write!(f, "RNG failed to supply random bytes"),
            Error::InvalidInputLength => write!(f, "input did not decode to a valid value"),
        }
    }
}
