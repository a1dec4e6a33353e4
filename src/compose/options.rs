//! Invocation options shared by every docker-compose operation.

use std::path::PathBuf;

/// Options for a single docker-compose invocation.
///
/// All fields are optional; the default value runs the operation in the
/// current directory against whatever compose file docker-compose discovers
/// on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Emit the wrapper-level `--always-yes` flag.
    pub always_yes: bool,
    /// Compose file. Its parent directory becomes the subprocess working
    /// directory; only the file name is passed as `-f`.
    pub compose_path: Option<PathBuf>,
    /// Project name, passed as `-p`.
    pub project_name: Option<String>,
    /// Recreate containers even if their configuration is unchanged
    /// (`up` only).
    pub force_recreate: bool,
    /// Remove containers for services not defined in the compose file
    /// (`up` and `down`).
    pub remove_orphans: bool,
    /// Services to restrict the operation to, in supplied order.
    /// Ignored by `down`.
    pub services: Vec<String>,
}

impl ComposeOptions {
    /// Create options with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from dynamic `key=value` pairs.
    ///
    /// This is the mapping form of the invocation surface: recognized keys
    /// are `always_yes`, `compose_path`, `project_name`, `force_recreate`,
    /// `remove_orphans` and the repeatable `service`. Unrecognized keys are
    /// ignored, never errors; each one is reported in the returned warning
    /// list so callers can surface probable typos.
    pub fn from_key_values<I, K, V>(pairs: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        let warnings = options.apply_key_values(pairs);
        (options, warnings)
    }

    /// Apply dynamic `key=value` pairs on top of existing options.
    ///
    /// Returns one warning per ignored key.
    pub fn apply_key_values<I, K, V>(&mut self, pairs: I) -> Vec<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut warnings = Vec::new();

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "always_yes" => self.always_yes = parse_bool(value),
                "compose_path" => self.compose_path = Some(PathBuf::from(value)),
                "project_name" => self.project_name = Some(value.to_string()),
                "force_recreate" => self.force_recreate = parse_bool(value),
                "remove_orphans" => self.remove_orphans = parse_bool(value),
                "service" => self.services.push(value.to_string()),
                // The output destination is not expressible as a string
                // value; it is the sink argument of run_with_sink.
                "into" => warnings.push(
                    "option `into` has no key=value form; pass a sink to run_with_sink".to_string(),
                ),
                other => warnings.push(format!("ignoring unrecognized option `{}`", other)),
            }
        }

        warnings
    }
}

/// Parse a boolean option value. Anything other than the truthy spellings
/// counts as false.
fn parse_bool(value: &str) -> bool {
    matches!(value, "true" | "1" | "yes")
}
