use crate::domain::{PortProbe, ResolvedService, StatusReport};
use crate::infra::port_probe::DEFAULT_HOST;
use crate::services::ContainerService;
use std::sync::Arc;
use tracing::{debug, warn};

/// Combines the engine's view of a container with a direct port probe.
///
/// The port is the displayed status: a container can be listed as running
/// while the service inside has not opened its port yet, or has crashed.
pub struct StatusReconciler {
    container_service: Arc<ContainerService>,
    probe: Arc<dyn PortProbe>,
    host: String,
}

impl StatusReconciler {
    pub fn new(container_service: Arc<ContainerService>, probe: Arc<dyn PortProbe>) -> Self {
        Self::with_host(container_service, probe, DEFAULT_HOST)
    }

    pub fn with_host(
        container_service: Arc<ContainerService>,
        probe: Arc<dyn PortProbe>,
        host: &str,
    ) -> Self {
        Self {
            container_service,
            probe,
            host: host.to_string(),
        }
    }

    pub fn reconcile(&self, service: &ResolvedService) -> StatusReport {
        debug!(
            "Checking status of service={} on port={}",
            service.key, service.port
        );

        let container_status = self.container_service.get_status(&service.name);
        let port_status = self.probe.probe(&self.host, service.port);

        let report = StatusReport {
            key: service.key,
            name: service.name.clone(),
            port: service.port,
            port_status,
            container_status,
        };

        if !report.agreement() {
            warn!(
                "port status({}) doesn't match pod status({}) for {}",
                port_status, container_status, service.name
            );
        }

        report
    }
}
