//! Argument vector assembly.
//!
//! Assembly is a pure function of operation plus options, kept free of any
//! process concern so the exact command-line contract stays unit-testable.

use std::fmt;

use super::options::ComposeOptions;

/// The five docker-compose operations this binding exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Create and start containers, always detached.
    Up,
    /// Stop and remove containers and networks.
    Down,
    /// Restart service containers.
    Restart,
    /// Stop service containers without removing them.
    Stop,
    /// Start existing service containers.
    Start,
}

impl Operation {
    /// The subcommand literal passed to docker-compose.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Up => "up",
            Operation::Down => "down",
            Operation::Restart => "restart",
            Operation::Stop => "stop",
            Operation::Start => "start",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assemble the argument vector for one invocation.
///
/// Order is part of the contract the underlying CLI imposes: wrapper flags
/// first, then compose-level flags, the fixed `--ansi never`, the
/// subcommand, operation-specific flags, and finally the service names.
/// `down` operates on the whole project and never takes service arguments.
pub fn build_args(operation: Operation, options: &ComposeOptions) -> Vec<String> {
    let mut args = Vec::new();

    if options.always_yes {
        args.push("--always-yes".to_string());
    }

    if let Some(path) = &options.compose_path {
        args.push("-f".to_string());
        // Only the file name; the parent directory is handed to the
        // subprocess as its working directory instead.
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        args.push(file_name);
    }

    if let Some(project) = &options.project_name {
        args.push("-p".to_string());
        args.push(project.clone());
    }

    // Colored output would leak ANSI escapes into the capture.
    args.push("--ansi".to_string());
    args.push("never".to_string());

    args.push(operation.as_str().to_string());

    match operation {
        Operation::Up => {
            if options.force_recreate {
                args.push("--force-recreate".to_string());
            }
            if options.remove_orphans {
                args.push("--remove-orphans".to_string());
            }
            args.push("-d".to_string());
            args.push("--no-color".to_string());
        }
        Operation::Down => {
            if options.remove_orphans {
                args.push("--remove-orphans".to_string());
            }
        }
        Operation::Restart | Operation::Stop | Operation::Start => {}
    }

    if operation != Operation::Down {
        args.extend(options.services.iter().cloned());
    }

    args
}
