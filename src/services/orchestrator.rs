use crate::domain::service::{self, REGISTRY};
use crate::domain::{ResolvedService, ServiceDescriptor, ServiceKey, ServiceSelector, StatusReport};
use crate::infra::config::ServiceConfig;
use crate::services::{ContainerService, LifecycleAction, StatusReconciler};
use std::sync::Arc;
use tracing::{debug, info};

/// One step taken for one service during start/stop/restart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub key: ServiceKey,
    pub name: String,
    pub action: LifecycleAction,
}

/// Drives status/start/stop/restart across the registry.
///
/// Services are handled one at a time in registry order. A failing engine
/// command is logged and the batch moves on.
pub struct Orchestrator {
    config: ServiceConfig,
    container_service: Arc<ContainerService>,
    reconciler: Arc<StatusReconciler>,
}

impl Orchestrator {
    pub fn new(
        config: ServiceConfig,
        container_service: Arc<ContainerService>,
        reconciler: Arc<StatusReconciler>,
    ) -> Self {
        Self {
            config,
            container_service,
            reconciler,
        }
    }

    /// Reconciles every registry entry matched by the selector
    pub fn status(&self, selector: &ServiceSelector) -> Vec<StatusReport> {
        info!("Status of dependency: {selector}");

        self.select(REGISTRY.iter(), selector)
            .iter()
            .map(|svc| self.reconciler.reconcile(svc))
            .collect()
    }

    /// Starts matching startable services that are not already running
    pub fn start(&self, selector: &ServiceSelector) -> Vec<LifecycleEvent> {
        info!("Starting dependency: {selector}");

        self.select(service::startable(), selector)
            .iter()
            .map(|svc| {
                debug!("Starting matching dependency={}", svc.key);
                self.event(svc, self.container_service.ensure_running(&svc.name))
            })
            .collect()
    }

    /// Stops matching startable services without checking their state first
    pub fn stop(&self, selector: &ServiceSelector) -> Vec<LifecycleEvent> {
        info!("Stopping dependency: {selector}");

        self.select(service::startable(), selector)
            .iter()
            .map(|svc| {
                debug!("Stopping matching dependency={}", svc.key);
                self.event(svc, self.container_service.stop(&svc.name))
            })
            .collect()
    }

    /// Stop followed by the idempotent start, service by service
    pub fn restart(&self, selector: &ServiceSelector) -> Vec<LifecycleEvent> {
        info!("Restarting dependency: {selector}");

        let mut events = Vec::new();
        for svc in self.select(service::startable(), selector) {
            debug!("Restarting matching dependency={}", svc.key);

            info!("Stopping {}", svc.name);
            events.push(self.event(&svc, self.container_service.stop(&svc.name)));

            info!("Starting {}", svc.name);
            events.push(self.event(&svc, self.container_service.ensure_running(&svc.name)));
        }
        events
    }

    fn select<I>(&self, descriptors: I, selector: &ServiceSelector) -> Vec<ResolvedService>
    where
        I: Iterator<Item = &'static ServiceDescriptor>,
    {
        let selected: Vec<_> = descriptors
            .filter(|d| selector.matches(d.key))
            .map(|d| d.resolve(&self.config))
            .collect();

        if selected.is_empty() {
            debug!("No service matches '{selector}'");
        }

        selected
    }

    fn event(&self, svc: &ResolvedService, action: LifecycleAction) -> LifecycleEvent {
        LifecycleEvent {
            key: svc.key,
            name: svc.name.clone(),
            action,
        }
    }
}
