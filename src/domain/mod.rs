mod command;
mod selector;
pub mod service;
pub mod traits;

pub use command::{CommandOutcome, CommandSpec};
pub use selector::{ALL_SERVICES, ServiceSelector};
pub use service::{
    ResolvedService, ServiceDescriptor, ServiceKey, ServiceStatus, StatusReport, UnknownService,
};
pub use traits::{CommandRunner, ConfigLookup, ContainerRuntime, PortProbe};
