//! Error types for encoding and decoding.

use std::path::PathBuf;
use thiserror::Error;

/// Error variants for compression operations.
///
/// Every variant is fatal to the run that raised it; callers must discard
/// any partially written output file.
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be opened or created.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying OS error.
        source: std::io::Error,
    },

    /// A read or write failed mid-stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted header does not describe a valid frequency table.
    #[error("malformed header: {0}")]
    Header(&'static str),

    /// The input holds more symbols than the format's 32-bit counts can
    /// describe.
    #[error("input too large: symbol counts exceed the 32-bit format limit")]
    InputTooLarge,

    /// The packed bit stream ended before the expected symbol count,
    /// i.e. the compressed file is truncated or corrupted.
    #[error("compressed stream truncated: produced {produced} of {expected} symbols")]
    Truncated {
        /// Symbol count the header promised.
        expected: u32,
        /// Symbols decoded before the bits ran out.
        produced: u32,
    },
}

/// A specialized Result type for compression operations.
pub type Result<T> = std::result::Result<T, Error>;
