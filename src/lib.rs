//! compose-bridge - a thin binding over the docker-compose CLI
//!
//! Translates typed invocation options into the exact argument vector the
//! `docker-compose` executable expects, runs it as a blocking subprocess
//! with stderr merged into stdout, and reports the combined output and
//! exit code as a tagged result.
//!
//! ```no_run
//! use compose_bridge::{Compose, ComposeOptions, Outcome};
//!
//! # fn main() -> Result<(), compose_bridge::Error> {
//! let compose = Compose::new()?;
//! let options = ComposeOptions {
//!     project_name: Some("myproj".to_string()),
//!     services: vec!["web".to_string()],
//!     ..ComposeOptions::default()
//! };
//!
//! match compose.up(&options)? {
//!     Outcome::Success { output } => print!("{}", output),
//!     Outcome::Failure { code, output } => {
//!         eprintln!("up exited with {}:\n{}", code, output);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod compose;
pub mod config;
pub mod error;

pub use compose::{Compose, ComposeOptions, Operation, Outcome, build_args};
pub use error::{Error, Result};
