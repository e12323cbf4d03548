use super::{CommandOutcome, CommandSpec, ServiceStatus};
use anyhow::Result;
use std::fmt::Debug;

/// Container engine operations used by the orchestrator.
///
/// Every call reports through a [`CommandOutcome`]; a failing engine never
/// aborts the caller.
pub trait ContainerRuntime: Send + Sync + Debug {
    /// Succeeds when the named container is listed as running
    fn is_running(&self, name: &str) -> CommandOutcome;

    /// Start a container
    fn start_container(&self, name: &str) -> CommandOutcome;

    /// Stop a container
    fn stop_container(&self, name: &str) -> CommandOutcome;
}

/// TCP reachability check. Implementations never fail: unreachable is `Stopped`.
pub trait PortProbe: Send + Sync + Debug {
    fn probe(&self, host: &str, port: u16) -> ServiceStatus;
}

/// Runs external programs and captures their output
pub trait CommandRunner: Send + Sync + Debug {
    /// `Err` only when the process could not be started
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome>;
}

/// Read access to the `[Default]` configuration section
pub trait ConfigLookup {
    /// String value for `key`; anything missing or non-string is `None`
    fn default_value(&self, key: &str) -> Option<&str>;
}
