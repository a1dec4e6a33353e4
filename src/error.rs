//! Error types for the compose-bridge library.
//!
//! A non-zero exit from the wrapped executable is not an error; it is
//! reported as [`Outcome::Failure`](crate::Outcome::Failure) so callers can
//! inspect the captured output. The variants here cover everything that
//! goes wrong before or around the subprocess itself.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The docker-compose executable could not be found on the search path.
    #[error("docker-compose executable `{name}` not found on PATH")]
    Resolve {
        /// Executable name that was looked up.
        name: String,
    },

    /// The executable was found but the subprocess could not be started.
    ///
    /// Kept distinct from exit-code failures: a missing or unusable
    /// executable must never read as a clean exit.
    #[error("failed to start `{executable}`: {source}")]
    Spawn {
        /// Path of the executable that failed to start.
        executable: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Capturing the merged subprocess output failed.
    #[error("failed to capture subprocess output: {source}")]
    Capture {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// An I/O operation on a configuration path failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
