use anyhow::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOGFILE_NAME: &str = "brixdev.log";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOptions {
    pub debug: bool,
    pub json: bool,
    pub to_file: bool,
}

impl LogOptions {
    fn default_filter(&self) -> &'static str {
        if self.debug {
            "brixdev=debug"
        } else {
            "brixdev=info"
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the level chosen
/// by `--debug`.
pub fn init_logger(options: &LogOptions) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.default_filter()));

    let (writer, ansi) = if options.to_file {
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(LOGFILE_NAME)
        {
            Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), false),
            Err(e) => {
                eprintln!("could not open {LOGFILE_NAME}: {e}; logging to stdout");
                (BoxMakeWriter::new(std::io::stdout), true)
            }
        }
    } else {
        (BoxMakeWriter::new(std::io::stdout), true)
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(ansi && !options.json)
        .with_writer(writer);

    if options.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_follows_debug_flag() {
        let quiet = LogOptions::default();
        assert_eq!(quiet.default_filter(), "brixdev=info");

        let verbose = LogOptions {
            debug: true,
            ..Default::default()
        };
        assert_eq!(verbose.default_filter(), "brixdev=debug");
    }
}
