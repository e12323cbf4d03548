use crate::domain::{CommandOutcome, CommandRunner, CommandSpec, ContainerRuntime};
use crate::infra::process::SystemCommandRunner;
use std::sync::Arc;
use tracing::debug;

const PODMAN: &str = "podman";

/// Container controller backed by the `podman` CLI
#[derive(Debug)]
pub struct PodmanAdapter {
    runner: Arc<dyn CommandRunner>,
}

impl PodmanAdapter {
    pub fn new() -> Self {
        Self::with_runner(Arc::new(SystemCommandRunner::new()))
    }

    pub fn with_runner(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn podman<I, S>(&self, args: I) -> CommandOutcome
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let spec = CommandSpec::new(PODMAN, args);
        debug!("{}", spec.display());

        let outcome = match self.runner.run(&spec) {
            Ok(outcome) => outcome,
            Err(e) => CommandOutcome::spawn_failure(format!("{e:#}")),
        };

        debug!(
            exit_code = %outcome.exit_code_label(),
            "{}",
            outcome.output.trim_end()
        );

        outcome
    }
}

impl Default for PodmanAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerRuntime for PodmanAdapter {
    fn is_running(&self, name: &str) -> CommandOutcome {
        let outcome = self.podman([
            "ps".to_string(),
            "--filter".to_string(),
            format!("name={name}"),
            "--filter".to_string(),
            "status=running".to_string(),
            "--format".to_string(),
            "{{.Names}}".to_string(),
        ]);

        if !outcome.succeeded {
            return outcome;
        }

        // podman's name filter is a substring match; an empty listing exits 0 too
        let listed = outcome.output.lines().any(|line| line.contains(name));
        CommandOutcome {
            succeeded: listed,
            exit_code: Some(if listed { 0 } else { 1 }),
            output: outcome.output,
        }
    }

    fn start_container(&self, name: &str) -> CommandOutcome {
        self.podman(["start", name])
    }

    fn stop_container(&self, name: &str) -> CommandOutcome {
        self.podman(["stop", name])
    }
}
