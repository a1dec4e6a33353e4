//! Executable resolution and the blocking subprocess runner.

use std::{
    env,
    io::{self, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::error::{Error, Result};

use super::{args::build_args, options::ComposeOptions, Operation};

/// Environment variable overriding the resolved executable path.
pub const BIN_ENV: &str = "COMPOSE_BRIDGE_BIN";

#[cfg(windows)]
const COMPOSE_EXECUTABLE: &str = "docker-compose.exe";
#[cfg(not(windows))]
const COMPOSE_EXECUTABLE: &str = "docker-compose";

/// Result of one completed invocation.
///
/// Covers the two terminal states of a subprocess that ran to completion.
/// Failing to start the subprocess at all is an [`Error`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The subprocess exited with code zero.
    Success {
        /// Combined stdout and stderr of the subprocess.
        output: String,
    },
    /// The subprocess exited with a non-zero code.
    Failure {
        /// Exit code reported by the subprocess (-1 when terminated by a
        /// signal).
        code: i32,
        /// Combined stdout and stderr of the subprocess.
        output: String,
    },
}

impl Outcome {
    /// Whether the invocation exited with code zero.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Combined stdout and stderr, regardless of outcome.
    pub fn output(&self) -> &str {
        match self {
            Outcome::Success { output } | Outcome::Failure { output, .. } => output,
        }
    }

    /// The subprocess exit code (zero on success).
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success { .. } => 0,
            Outcome::Failure { code, .. } => *code,
        }
    }
}

/// Resolved handle to the docker-compose executable.
///
/// Holds nothing but the executable path, so a handle can be shared freely
/// across threads; every call is an independent blocking subprocess.
#[derive(Debug, Clone)]
pub struct Compose {
    executable: PathBuf,
}

impl Compose {
    /// Resolve the executable and build a handle.
    ///
    /// Resolution order: the `COMPOSE_BRIDGE_BIN` environment variable, the
    /// `executable` key of the global config file, then a search-path
    /// lookup of the platform executable name (`docker-compose.exe` on
    /// Windows, `docker-compose` elsewhere).
    pub fn new() -> Result<Self> {
        if let Ok(path) = env::var(BIN_ENV) {
            return Ok(Self::with_executable(path));
        }

        if let Some(path) = crate::config::load()?.runner.executable {
            return Ok(Self::with_executable(path));
        }

        let executable = which::which(COMPOSE_EXECUTABLE).map_err(|_| Error::Resolve {
            name: COMPOSE_EXECUTABLE.to_string(),
        })?;

        Ok(Self { executable })
    }

    /// Build a handle around an explicit executable, skipping resolution.
    pub fn with_executable(path: impl Into<PathBuf>) -> Self {
        Self {
            executable: path.into(),
        }
    }

    /// Path of the executable this handle invokes.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Run one operation, accumulating the merged output in memory.
    ///
    /// Exit code zero maps to [`Outcome::Success`]; any other code maps to
    /// [`Outcome::Failure`] carrying that exact code. Both carry the full
    /// combined output.
    pub fn run(&self, operation: Operation, options: &ComposeOptions) -> Result<Outcome> {
        let mut buffer = Vec::new();
        let code = self.run_with_sink(operation, options, &mut buffer)?;
        let output = String::from_utf8_lossy(&buffer).into_owned();

        Ok(if code == 0 {
            Outcome::Success { output }
        } else {
            Outcome::Failure { code, output }
        })
    }

    /// Run one operation, streaming the merged output into `sink`.
    ///
    /// Stderr is merged into stdout at the pipe level, so the sink sees the
    /// two streams interleaved in write order. Returns the raw exit code;
    /// the caller owns the sink contents.
    pub fn run_with_sink<W: Write>(
        &self,
        operation: Operation,
        options: &ComposeOptions,
        sink: &mut W,
    ) -> Result<i32> {
        let args = build_args(operation, options);

        let mut command = Command::new(&self.executable);
        command.args(&args).stdin(Stdio::null());

        if let Some(dir) = options.compose_path.as_deref().and_then(Path::parent) {
            // A bare file name has an empty parent; that means "stay where
            // you are", not "chdir to ''".
            if !dir.as_os_str().is_empty() {
                command.current_dir(dir);
            }
        }

        let (mut reader, writer) = io::pipe()?;
        command.stdout(writer.try_clone()?).stderr(writer);

        let mut child = command.spawn().map_err(|source| Error::Spawn {
            executable: self.executable.clone(),
            source,
        })?;

        // The Command keeps its copies of the pipe writer; drop them so the
        // reader sees EOF once the child exits.
        drop(command);

        io::copy(&mut reader, sink)?;
        let status = child.wait()?;

        Ok(status.code().unwrap_or(-1))
    }

    /// `up`: create and start containers, detached.
    pub fn up(&self, options: &ComposeOptions) -> Result<Outcome> {
        self.run(Operation::Up, options)
    }

    /// `down`: stop and remove containers and networks.
    pub fn down(&self, options: &ComposeOptions) -> Result<Outcome> {
        self.run(Operation::Down, options)
    }

    /// `restart`: restart service containers.
    pub fn restart(&self, options: &ComposeOptions) -> Result<Outcome> {
        self.run(Operation::Restart, options)
    }

    /// `stop`: stop service containers without removing them.
    pub fn stop(&self, options: &ComposeOptions) -> Result<Outcome> {
        self.run(Operation::Stop, options)
    }

    /// `start`: start existing service containers.
    pub fn start(&self, options: &ComposeOptions) -> Result<Outcome> {
        self.run(Operation::Start, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_is_a_spawn_error() {
        let compose = Compose::with_executable("/nonexistent/compose-bridge-test-bin");
        let err = compose
            .run(Operation::Up, &ComposeOptions::default())
            .unwrap_err();

        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[cfg(unix)]
    mod unix {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;

        use tempfile::TempDir;

        use super::super::*;

        fn fake_compose(dir: &TempDir, script: &str) -> PathBuf {
            let path = dir.path().join("fake-compose");
            fs::write(&path, script).unwrap();
            let mut perms = fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms).unwrap();
            path
        }

        #[test]
        fn test_zero_exit_is_success_with_output() {
            let dir = TempDir::new().unwrap();
            let compose = Compose::with_executable(fake_compose(
                &dir,
                "#!/bin/sh\necho started\nexit 0\n",
            ));

            let outcome = compose
                .run(Operation::Start, &ComposeOptions::default())
                .unwrap();

            assert_eq!(
                outcome,
                Outcome::Success {
                    output: "started\n".to_string()
                }
            );
            assert!(outcome.is_success());
            assert_eq!(outcome.exit_code(), 0);
        }

        #[test]
        fn test_nonzero_exit_carries_exact_code_and_output() {
            let dir = TempDir::new().unwrap();
            let compose = Compose::with_executable(fake_compose(
                &dir,
                "#!/bin/sh\necho no such service >&2\nexit 17\n",
            ));

            let outcome = compose
                .run(Operation::Stop, &ComposeOptions::default())
                .unwrap();

            assert_eq!(
                outcome,
                Outcome::Failure {
                    code: 17,
                    output: "no such service\n".to_string()
                }
            );
            assert!(!outcome.is_success());
            assert_eq!(outcome.exit_code(), 17);
        }

        #[test]
        fn test_stderr_merges_into_stdout_in_write_order() {
            let dir = TempDir::new().unwrap();
            let compose = Compose::with_executable(fake_compose(
                &dir,
                "#!/bin/sh\necho one\necho two >&2\necho three\n",
            ));

            let outcome = compose
                .run(Operation::Restart, &ComposeOptions::default())
                .unwrap();

            assert_eq!(outcome.output(), "one\ntwo\nthree\n");
        }

        #[test]
        fn test_arguments_reach_the_subprocess_in_order() {
            let dir = TempDir::new().unwrap();
            let compose =
                Compose::with_executable(fake_compose(&dir, "#!/bin/sh\necho \"$@\"\n"));

            let options = ComposeOptions {
                force_recreate: true,
                services: vec!["web".to_string()],
                ..ComposeOptions::default()
            };
            let outcome = compose.run(Operation::Up, &options).unwrap();

            assert_eq!(
                outcome.output(),
                "--ansi never up --force-recreate -d --no-color web\n"
            );
        }

        #[test]
        fn test_compose_path_sets_working_directory_to_parent() {
            let dir = TempDir::new().unwrap();
            let compose = Compose::with_executable(fake_compose(&dir, "#!/bin/sh\npwd\n"));

            let project_dir = dir.path().join("project");
            fs::create_dir(&project_dir).unwrap();

            let options = ComposeOptions {
                compose_path: Some(project_dir.join("docker-compose.yml")),
                ..ComposeOptions::default()
            };
            let outcome = compose.run(Operation::Up, &options).unwrap();

            let expected = fs::canonicalize(&project_dir).unwrap();
            assert_eq!(outcome.output().trim(), expected.display().to_string());
        }

        #[test]
        fn test_bare_compose_file_name_keeps_current_directory() {
            let dir = TempDir::new().unwrap();
            let compose = Compose::with_executable(fake_compose(&dir, "#!/bin/sh\npwd\n"));

            let options = ComposeOptions {
                compose_path: Some(PathBuf::from("docker-compose.yml")),
                ..ComposeOptions::default()
            };

            // Must not fail trying to chdir into an empty path.
            let outcome = compose.run(Operation::Up, &options).unwrap();
            assert!(outcome.is_success());
        }

        #[test]
        fn test_sink_receives_streamed_output() {
            let dir = TempDir::new().unwrap();
            let compose = Compose::with_executable(fake_compose(
                &dir,
                "#!/bin/sh\necho captured\nexit 2\n",
            ));

            let mut sink = Vec::new();
            let code = compose
                .run_with_sink(Operation::Down, &ComposeOptions::default(), &mut sink)
                .unwrap();

            assert_eq!(code, 2);
            assert_eq!(String::from_utf8(sink).unwrap(), "captured\n");
        }

        #[test]
        fn test_non_executable_file_is_a_spawn_error() {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("not-executable");
            fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();

            let compose = Compose::with_executable(&path);
            let err = compose
                .run(Operation::Up, &ComposeOptions::default())
                .unwrap_err();

            assert!(matches!(err, Error::Spawn { .. }));
        }
    }
}
