pub mod output;
pub mod runtime;

use crate::domain::{ALL_SERVICES, ServiceSelector};
use crate::infra::config::default_config_dir;
use crate::logging::LogOptions;
use crate::services::{DEFAULT_PASSWORD, PASSWORD_ENV};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use runtime::Runtime;

#[derive(Parser)]
#[command(
    name = "brixdev",
    version,
    about = "Checks, starts and stops the containers a BrIX development environment depends on"
)]
pub struct Cli {
    /// Directory holding brixdev.toml (default: ~/.config/brixdev)
    #[arg(
        long,
        env = "BRIXDEV_CONFIG_DIR",
        default_value_os_t = default_config_dir(),
        global = true
    )]
    pub config_dir: PathBuf,

    /// Config file to read instead of brixdev.toml; `.toml` is appended when missing
    #[arg(long, value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Root of the checkout containing flyway/ and brix-app/
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    pub project_root: PathBuf,

    /// Database password used by clean, migrate and import
    #[arg(
        long,
        env = PASSWORD_ENV,
        default_value = DEFAULT_PASSWORD,
        hide_env_values = true,
        hide_default_value = true,
        global = true
    )]
    pub db_password: String,

    /// Write extra information to help debug
    #[arg(long, global = true)]
    pub debug: bool,

    /// Write logs in JSON format
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Append logs to brixdev.log instead of stdout
    #[arg(long, global = true)]
    pub log_to_file: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            debug: self.debug,
            json: self.json_logs,
            to_file: self.log_to_file,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Status of dependency (container and port)
    Status(ServiceArgs),
    /// Start dependency unless it is already running
    Start(ServiceArgs),
    /// Stop dependency
    Stop(ServiceArgs),
    /// Restart dependency (stop followed by start)
    Restart(ServiceArgs),
    /// Clean out tables and data from database
    Clean,
    /// Migrate the database to the latest schema
    Migrate,
    /// Import data into the database
    Import {
        /// SQL file to import (default: brix-app/src/main/resources/import.sql)
        #[arg(long, value_name = "FILE")]
        import_file: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServiceArgs {
    /// Service to act on: `all`, or a key such as db or amq
    #[arg(long, default_value = ALL_SERVICES)]
    pub service: ServiceSelector,
}
