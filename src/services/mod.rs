mod container_service;
mod database_tasks;
mod orchestrator;
mod status_reconciler;

pub use container_service::{ContainerService, LifecycleAction};
pub use database_tasks::{
    DEFAULT_IMPORT_FILE, DEFAULT_PASSWORD, DatabaseSettings, DatabaseTasks, PASSWORD_ENV,
};
pub use orchestrator::{LifecycleEvent, Orchestrator};
pub use status_reconciler::StatusReconciler;
