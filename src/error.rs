//! Library-wide error and result types.

use std::fmt;
use std::io;

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the library can produce.
///
/// Error messages are kept intentionally terse; callers that need richer
/// context should wrap `Error` in their own type. The unlocker in
/// particular must not leak *why* a trial failed (see [`Error::NotUnlockable`]).
#[derive(Debug)]
pub enum Error {
    /// No `(variant, hash, cascade)` combination validated the header.
    ///
    /// Covers both a wrong passphrase and a file that is not a
    /// TrueCrypt volume at all - the two are indistinguishable from the
    /// outside, and deliberately not reported apart.
    NotUnlockable,
    /// The input is too short to contain what was asked of it (message
    /// describes which constraint failed).
    MalformedInput(&'static str),
    /// An underlying I/O operation failed.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotUnlockable => write!(f, "incorrect password or not a TrueCrypt volume"),
            Error::MalformedInput(s) => write!(f, "malformed input: {s}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Error::Io(e) = self {
            Some(e)
        } else {
            None
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
