use crate::domain::{CommandOutcome, CommandRunner, CommandSpec};
use anyhow::{Context, Result};
use std::fs::File;
use std::process::{Command, Stdio};

/// Runs programs with `std::process`, capturing stdout and stderr
#[derive(Debug, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);

        if let Some(dir) = &spec.workdir {
            cmd.current_dir(dir);
        }

        for (key, value) in &spec.env {
            cmd.env(key, value);
        }

        match &spec.stdin_file {
            Some(path) => {
                let file = File::open(path).with_context(|| format!("opening {:?}", path))?;
                cmd.stdin(Stdio::from(file));
            }
            None => {
                cmd.stdin(Stdio::null());
            }
        }

        let output = cmd
            .output()
            .with_context(|| format!("running {}", spec.program))?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutcome {
            succeeded: output.status.success(),
            exit_code: output.status.code(),
            output: text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_an_error() {
        let runner = SystemCommandRunner::new();
        let spec = CommandSpec::new("brixdev-definitely-not-a-program", Vec::<String>::new());
        assert!(runner.run(&spec).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_output_and_exit_code() {
        let runner = SystemCommandRunner::new();

        let ok = runner
            .run(&CommandSpec::new("sh", ["-c", "echo hello"]))
            .unwrap();
        assert!(ok.succeeded);
        assert_eq!(ok.exit_code, Some(0));
        assert_eq!(ok.output.trim(), "hello");

        let failed = runner
            .run(&CommandSpec::new("sh", ["-c", "echo oops >&2; exit 3"]))
            .unwrap();
        assert!(!failed.succeeded);
        assert_eq!(failed.exit_code, Some(3));
        assert_eq!(failed.output.trim(), "oops");
    }

    #[cfg(unix)]
    #[test]
    fn test_env_and_stdin_are_passed() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.sql");
        std::fs::write(&input, "select 1;\n").unwrap();

        let runner = SystemCommandRunner::new();
        let spec = CommandSpec::new("sh", ["-c", "echo $PGPASSWORD; cat"])
            .env("PGPASSWORD", "secret")
            .stdin_file(&input)
            .workdir(dir.path());

        let outcome = runner.run(&spec).unwrap();
        assert!(outcome.succeeded);
        assert_eq!(outcome.output, "secret\nselect 1;\n");
    }
}
