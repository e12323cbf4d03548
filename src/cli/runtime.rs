use crate::cli::output::status_table;
use crate::cli::{Cli, Commands};
use crate::domain::{CommandRunner, ContainerRuntime, PortProbe};
use crate::infra::config::{ServiceConfig, config_file_path, load_config};
use crate::infra::{PodmanAdapter, SystemCommandRunner, TcpPortProbe};
use crate::services::{
    ContainerService, DatabaseSettings, DatabaseTasks, LifecycleEvent, Orchestrator,
    StatusReconciler,
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Wires the services together and dispatches a parsed command
pub struct Runtime {
    orchestrator: Orchestrator,
    database: DatabaseTasks,
}

impl Runtime {
    /// Loads configuration and binds to podman, TCP and the local shell.
    /// A configuration that cannot be loaded is fatal.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let path = config_file_path(&cli.config_dir, cli.config_file.as_deref());
        let config = load_config(&path)?;

        let runner: Arc<dyn CommandRunner> = Arc::new(SystemCommandRunner::new());
        let settings = DatabaseSettings::from_config(&config, &cli.db_password, &cli.project_root);

        Ok(Self::with_runtime(
            config,
            settings,
            Arc::new(PodmanAdapter::with_runner(runner.clone())),
            Arc::new(TcpPortProbe::default()),
            runner,
        ))
    }

    pub fn with_runtime(
        config: ServiceConfig,
        settings: DatabaseSettings,
        runtime: Arc<dyn ContainerRuntime>,
        probe: Arc<dyn PortProbe>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let container_service = Arc::new(ContainerService::new(runtime));
        let reconciler = Arc::new(StatusReconciler::new(container_service.clone(), probe));
        Self {
            orchestrator: Orchestrator::new(config, container_service, reconciler),
            database: DatabaseTasks::new(runner, settings),
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Runs one command. Failing engine or database commands are logged
    /// only; the exit status stays successful.
    pub fn run(&self, command: &Commands) -> Result<()> {
        match command {
            Commands::Status(args) => {
                let reports = self.orchestrator.status(&args.service);
                println!("{}", status_table(&reports));
            }
            Commands::Start(args) => summarize(&self.orchestrator.start(&args.service)),
            Commands::Stop(args) => summarize(&self.orchestrator.stop(&args.service)),
            Commands::Restart(args) => summarize(&self.orchestrator.restart(&args.service)),
            Commands::Clean => {
                self.database.clean();
            }
            Commands::Migrate => {
                self.database.migrate();
            }
            Commands::Import { import_file } => {
                let file = import_file.as_deref().map(expand_path);
                self.database.import(file.as_deref());
            }
        }

        Ok(())
    }
}

fn summarize(events: &[LifecycleEvent]) {
    let failed = events.iter().filter(|e| e.action.is_failure()).count();
    if failed > 0 {
        warn!("{failed} of {} container operation(s) failed", events.len());
    } else if !events.is_empty() {
        info!("{} container operation(s) completed", events.len());
    }
}

fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.to_string_lossy().as_ref()).into_owned())
}
