use crate::domain::{CommandOutcome, ContainerRuntime, ServiceStatus};
use std::sync::Arc;
use tracing::{info, warn};

/// What a start or stop request did to one container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleAction {
    AlreadyRunning,
    Started,
    StartFailed { exit_code: Option<i32> },
    Stopped,
    StopFailed { exit_code: Option<i32> },
}

impl LifecycleAction {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::StartFailed { .. } | Self::StopFailed { .. })
    }
}

pub struct ContainerService {
    runtime: Arc<dyn ContainerRuntime>,
}

impl ContainerService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    pub fn get_status(&self, name: &str) -> ServiceStatus {
        ServiceStatus::from_running(self.runtime.is_running(name).succeeded)
    }

    /// Starts the container only when the engine does not list it as running.
    /// A running container is never touched.
    pub fn ensure_running(&self, name: &str) -> LifecycleAction {
        if self.get_status(name).is_running() {
            info!("Container({name}) is running");
            return LifecycleAction::AlreadyRunning;
        }

        info!("Container({name}) is not running");
        let outcome = self.runtime.start_container(name);
        if outcome.succeeded {
            info!("Container({name}) started.");
            LifecycleAction::Started
        } else {
            log_failure("NOT started", name, &outcome);
            LifecycleAction::StartFailed {
                exit_code: outcome.exit_code,
            }
        }
    }

    /// Stops unconditionally; stopping a stopped container is left to the engine
    pub fn stop(&self, name: &str) -> LifecycleAction {
        let outcome = self.runtime.stop_container(name);
        if outcome.succeeded {
            info!("Container({name}) stopped.");
            LifecycleAction::Stopped
        } else {
            log_failure("NOT stopped", name, &outcome);
            LifecycleAction::StopFailed {
                exit_code: outcome.exit_code,
            }
        }
    }
}

fn log_failure(what: &str, name: &str, outcome: &CommandOutcome) {
    warn!(
        "Container({name}) {what}. exit_code={} {}",
        outcome.exit_code_label(),
        outcome.output.trim()
    );
}
