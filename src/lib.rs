pub mod cli;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod services;

// Fakes for the engine, the port probe and the command runner, shared by
// unit and integration tests
pub mod test_support;

pub use domain::{
    CommandOutcome, ContainerRuntime, PortProbe, ResolvedService, ServiceDescriptor, ServiceKey,
    ServiceSelector, ServiceStatus, StatusReport,
};
pub use infra::{PodmanAdapter, TcpPortProbe};
pub use services::{ContainerService, Orchestrator, StatusReconciler};
