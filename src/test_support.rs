use crate::domain::{
    CommandOutcome, CommandRunner, CommandSpec, ContainerRuntime, PortProbe, ServiceStatus,
};
use anyhow::{Result, anyhow};
use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex, RwLock};

/// In-memory container engine that records every call as `"<op>:<name>"`
#[derive(Debug)]
pub struct MockRuntime {
    containers: RwLock<HashMap<String, ServiceStatus>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self {
            containers: RwLock::new(HashMap::new()),
            commands: RwLock::new(Vec::new()),
            fail_on: RwLock::new(None),
        }
    }

    pub fn add_container(&self, name: &str, status: ServiceStatus) {
        self.containers
            .write()
            .unwrap()
            .insert(name.to_string(), status);
    }

    /// Makes the given operation (`is_running`, `start` or `stop`) fail
    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.write().unwrap() = Some(operation.to_string());
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    /// Commands other than `is_running` queries
    pub fn get_mutations(&self) -> Vec<String> {
        self.get_commands()
            .into_iter()
            .filter(|c| !c.starts_with("is_running:"))
            .collect()
    }

    pub fn get_state(&self, name: &str) -> Option<ServiceStatus> {
        self.containers.read().unwrap().get(name).copied()
    }

    fn record_command(&self, cmd: String) {
        self.commands.write().unwrap().push(cmd);
    }

    fn should_fail(&self, operation: &str) -> bool {
        self.fail_on.read().unwrap().as_deref() == Some(operation)
    }
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new()
    }
}

fn no_such_container(name: &str) -> CommandOutcome {
    CommandOutcome::failure(125, format!("Error: no container with name or ID \"{name}\""))
}

impl ContainerRuntime for MockRuntime {
    fn is_running(&self, name: &str) -> CommandOutcome {
        self.record_command(format!("is_running:{name}"));
        if self.should_fail("is_running") {
            return CommandOutcome::failure(125, "mock failure on: is_running");
        }

        match self.get_state(name) {
            Some(ServiceStatus::Running) => CommandOutcome::success(format!("{name}\n")),
            _ => CommandOutcome::failure(1, ""),
        }
    }

    fn start_container(&self, name: &str) -> CommandOutcome {
        self.record_command(format!("start:{name}"));
        if self.should_fail("start") {
            return CommandOutcome::failure(125, "mock failure on: start");
        }

        match self.containers.write().unwrap().get_mut(name) {
            Some(state) => {
                *state = ServiceStatus::Running;
                CommandOutcome::success(name)
            }
            None => no_such_container(name),
        }
    }

    fn stop_container(&self, name: &str) -> CommandOutcome {
        self.record_command(format!("stop:{name}"));
        if self.should_fail("stop") {
            return CommandOutcome::failure(125, "mock failure on: stop");
        }

        match self.containers.write().unwrap().get_mut(name) {
            Some(state) => {
                *state = ServiceStatus::Stopped;
                CommandOutcome::success(name)
            }
            None => no_such_container(name),
        }
    }
}

/// Port probe answering from a fixed table; unknown ports are stopped
#[derive(Debug, Default)]
pub struct StaticProbe {
    ports: RwLock<HashMap<u16, ServiceStatus>>,
    probed: RwLock<Vec<(String, u16)>>,
}

impl StaticProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_port(&self, port: u16, status: ServiceStatus) {
        self.ports.write().unwrap().insert(port, status);
    }

    pub fn probed(&self) -> Vec<(String, u16)> {
        self.probed.read().unwrap().clone()
    }
}

impl PortProbe for StaticProbe {
    fn probe(&self, host: &str, port: u16) -> ServiceStatus {
        self.probed.write().unwrap().push((host.to_string(), port));
        self.ports
            .read()
            .unwrap()
            .get(&port)
            .copied()
            .unwrap_or(ServiceStatus::Stopped)
    }
}

/// Fake command runner. Replies are consumed in order; once they run out
/// every command succeeds with empty output.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    specs: RwLock<Vec<CommandSpec>>,
    replies: RwLock<VecDeque<std::result::Result<CommandOutcome, String>>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_outcome(&self, outcome: CommandOutcome) {
        self.replies.write().unwrap().push_back(Ok(outcome));
    }

    pub fn push_spawn_error(&self, message: &str) {
        self.replies
            .write()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn specs(&self) -> Vec<CommandSpec> {
        self.specs.read().unwrap().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.specs().iter().map(CommandSpec::display).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
        self.specs.write().unwrap().push(spec.clone());
        match self.replies.write().unwrap().pop_front() {
            Some(Ok(outcome)) => Ok(outcome),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Ok(CommandOutcome::success("")),
        }
    }
}

/// Collects formatted log lines so tests can assert on emitted warnings
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with a subscriber scoped to this thread that writes here
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_target(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.buffer.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains("WARN"))
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
