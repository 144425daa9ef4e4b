//! Error Types
//!
//! [`CodegenError`] covers everything the binary-to-source converters can
//! fail on: reading inputs, rejecting malformed binaries and rendering
//! templates.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodegenError {
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template lookup or rendering error.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// A binary cannot be reinterpreted as 32-bit words.
    #[error("Binary length {len} is not a multiple of 4 bytes")]
    MisalignedBinary {
        /// Length of the binary in bytes
        len: usize,
    },

    /// An input cannot be turned into an identifier.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Alias for `Result<T, CodegenError>`.
pub type Result<T> = std::result::Result<T, CodegenError>;
