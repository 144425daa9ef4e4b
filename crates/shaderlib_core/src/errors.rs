//! Error Types
//!
//! This module defines the error types used by the library builder and merger.
//!
//! # Overview
//!
//! The main error type [`LibraryError`] covers all failure modes including:
//! - External compiler failures
//! - Malformed or incomplete shader metadata
//! - Database constraint violations
//! - File I/O errors
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for `std::result::Result<T, LibraryError>`.
//!
//! ```rust,ignore
//! use shaderlib_core::errors::{LibraryError, Result};
//!
//! fn open_library() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// The main error type for shader library operations.
///
/// Every variant is fatal for the invocation that produced it; nothing is
/// retried.
#[derive(Error, Debug)]
pub enum LibraryError {
    // ========================================================================
    // External Compiler Errors
    // ========================================================================
    /// The compiler process could not be started at all.
    #[error("Failed to launch shader compiler `{program}`: {source}")]
    CompilerLaunch {
        /// Program that was invoked
        program: PathBuf,
        /// Underlying spawn error
        source: std::io::Error,
    },

    /// The compiler ran but exited with a non-zero status.
    #[error("Shader compiler `{program}` failed on {source_file} ({status})")]
    CompilerFailed {
        /// Program that was invoked
        program: PathBuf,
        /// Source file being compiled
        source_file: PathBuf,
        /// Exit status reported by the process
        status: ExitStatus,
    },

    // ========================================================================
    // Metadata Errors
    // ========================================================================
    /// Metadata JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A version string is not three dot-separated integers.
    #[error("Invalid shader version `{0}`, expected MAJOR.MINOR.PATCH")]
    InvalidVersion(String),

    /// A version component does not fit its packed bit range.
    #[error("Shader version {component} component {value} exceeds maximum {max}")]
    VersionOutOfRange {
        /// Which component overflowed
        component: &'static str,
        /// The offending value
        value: u32,
        /// Largest value allowed for the component
        max: u32,
    },

    /// A stage type name is not one of the known pipeline stages.
    #[error("Unknown shader stage `{0}`")]
    UnknownStage(String),

    /// Two metadata entries declare the same stage for one shader.
    #[error("Shader `{shader}` declares the {stage} stage more than once")]
    DuplicateStage {
        /// Shader name
        shader: String,
        /// Stage name
        stage: &'static str,
    },

    /// A source file has no entry in the metadata `stages` table.
    #[error("Source {0} has no stage entry in the shader metadata")]
    UnlistedSource(PathBuf),

    /// Two sources share one file name, so both map to one stage entry.
    #[error("Source {0} is given more than once")]
    DuplicateSource(PathBuf),

    /// A metadata stage entry was never matched by a source file.
    #[error("Stage entry `{0}` has no matching source file")]
    MissingSource(String),

    // ========================================================================
    // Database Errors
    // ========================================================================
    /// SQLite error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A merge source conflicts with rows already in the destination.
    #[error("Failed to merge shader library {path}: {source}")]
    MergeConflict {
        /// Library that was being merged
        path: PathBuf,
        /// Constraint violation reported by SQLite
        source: rusqlite::Error,
    },

    /// SQLite needs a UTF-8 path to attach a database.
    #[error("Library path {0} is not valid UTF-8")]
    NonUtf8Path(PathBuf),

    /// A stored module identifier is not a 16-byte blob.
    #[error("Module identifier has invalid length {0}, expected 16 bytes")]
    InvalidModuleId(usize),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, LibraryError>`.
pub type Result<T> = std::result::Result<T, LibraryError>;
