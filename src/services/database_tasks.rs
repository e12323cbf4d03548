use crate::domain::service::DATABASE_PORT;
use crate::domain::{CommandOutcome, CommandRunner, CommandSpec};
use crate::infra::config::ServiceConfig;
use crate::infra::port_probe::DEFAULT_HOST;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const PASSWORD_ENV: &str = "quarkus_datasource_password";
pub const DEFAULT_PASSWORD: &str = "brixadmin";
pub const FLYWAY_DIR: &str = "flyway";
pub const DEFAULT_IMPORT_FILE: &str = "brix-app/src/main/resources/import.sql";

/// Connection details for the development database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub database: String,
    pub password: String,
    /// Directory holding `flyway/` and `brix-app/`
    pub project_root: PathBuf,
}

impl DatabaseSettings {
    pub fn from_config(config: &ServiceConfig, password: &str, project_root: &Path) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DATABASE_PORT,
            user: config.database_user().to_string(),
            database: config.database_db().to_string(),
            password: password.to_string(),
            project_root: project_root.to_path_buf(),
        }
    }

    fn jdbc_url(&self) -> String {
        format!(
            "jdbc:postgresql://{}:{}/{}",
            self.host, self.port, self.database
        )
    }
}

/// Schema maintenance commands (flyway, psql). Their output is echoed at
/// info level; a failure is logged and reported, never raised.
pub struct DatabaseTasks {
    runner: Arc<dyn CommandRunner>,
    settings: DatabaseSettings,
}

impl DatabaseTasks {
    pub fn new(runner: Arc<dyn CommandRunner>, settings: DatabaseSettings) -> Self {
        Self { runner, settings }
    }

    /// Drops every table and all data
    pub fn clean(&self) -> CommandOutcome {
        info!("Cleaning out tables and data from database");
        let spec = self.flyway(&["-cleanDisabled=false"], "clean");
        self.run_echo(&spec)
    }

    pub fn migrate(&self) -> CommandOutcome {
        info!("Migrating database to current schema");
        let spec = self.flyway(&[], "migrate");
        self.run_echo(&spec)
    }

    /// Feeds an SQL file to psql; the default is the application's import.sql
    pub fn import(&self, file: Option<&Path>) -> CommandOutcome {
        info!("Importing data into database");

        let s = &self.settings;
        let file = file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| s.project_root.join(DEFAULT_IMPORT_FILE));

        let spec = CommandSpec::new(
            "psql",
            [
                format!("--host={}", s.host),
                format!("--port={}", s.port),
                format!("--username={}", s.user),
                s.database.clone(),
            ],
        )
        .workdir(&s.project_root)
        .env("PGPASSWORD", &s.password)
        .stdin_file(file);

        self.run_echo(&spec)
    }

    fn flyway(&self, extra: &[&str], action: &str) -> CommandSpec {
        let s = &self.settings;
        let mut args: Vec<String> = extra.iter().map(|a| a.to_string()).collect();
        args.push(format!("-user={}", s.user));
        args.push(format!("-password={}", s.password));
        args.push(format!("-url={}", s.jdbc_url()));
        args.push(action.to_string());

        CommandSpec::new("flyway", args).workdir(s.project_root.join(FLYWAY_DIR))
    }

    fn run_echo(&self, spec: &CommandSpec) -> CommandOutcome {
        debug!("{}", self.redact(&spec.display()));

        let outcome = match self.runner.run(spec) {
            Ok(outcome) => outcome,
            Err(e) => CommandOutcome::spawn_failure(format!("{e:#}")),
        };

        if !outcome.output.trim().is_empty() {
            info!("{}", outcome.output.trim_end());
        }

        if !outcome.succeeded {
            warn!(
                "{} failed. exit_code={}",
                spec.program,
                outcome.exit_code_label()
            );
        }

        outcome
    }

    fn redact(&self, line: &str) -> String {
        if self.settings.password.is_empty() {
            return line.to_string();
        }
        line.replace(&self.settings.password, "****")
    }
}
