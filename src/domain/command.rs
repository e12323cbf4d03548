use std::path::PathBuf;

/// Result of running an external program.
///
/// A failed outcome is a value, not an error: callers log it and move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub succeeded: bool,
    /// `None` when the process could not be spawned or was killed by a signal
    pub exit_code: Option<i32>,
    pub output: String,
}

impl CommandOutcome {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            exit_code: Some(0),
            output: output.into(),
        }
    }

    pub fn failure(exit_code: i32, output: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            exit_code: Some(exit_code),
            output: output.into(),
        }
    }

    pub fn spawn_failure(error: impl std::fmt::Display) -> Self {
        Self {
            succeeded: false,
            exit_code: None,
            output: error.to_string(),
        }
    }

    pub fn exit_code_label(&self) -> String {
        self.exit_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "none".to_string())
    }
}

/// A program invocation, kept as data so it can be logged and faked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub workdir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
    pub stdin_file: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    pub fn stdin_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdin_file = Some(path.into());
        self
    }

    /// Shell-like rendering for logs. Environment values are not shown.
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        if let Some(stdin) = &self.stdin_file {
            line.push_str(&format!(" < {}", stdin.display()));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_constructors() {
        let ok = CommandOutcome::success("out");
        assert!(ok.succeeded);
        assert_eq!(ok.exit_code, Some(0));

        let failed = CommandOutcome::failure(125, "no such container");
        assert!(!failed.succeeded);
        assert_eq!(failed.exit_code_label(), "125");

        let spawn = CommandOutcome::spawn_failure("podman: not found");
        assert_eq!(spawn.exit_code, None);
        assert_eq!(spawn.exit_code_label(), "none");
        assert_eq!(spawn.output, "podman: not found");
    }

    #[test]
    fn test_spec_display() {
        let spec = CommandSpec::new("psql", ["--port=5432", "brixdb"])
            .env("PGPASSWORD", "secret")
            .stdin_file("import.sql");
        assert_eq!(spec.display(), "psql --port=5432 brixdb < import.sql");
    }
}
