use std::io;
use std::sync::Once;

use tracing::Level;
use tracing_appender::rolling;
use tracing_subscriber::fmt::writer::MakeWriterExt;

static INIT: Once = Once::new();

/// Where log events are written once tracing is initialized.
#[derive(Debug, Clone)]
pub enum OutputType {
    Stdout,
    /// Daily-rolling file under `log_dir`, mirrored to stdout.
    File { log_dir: String },
}

#[derive(Debug, Clone)]
pub struct TracingFactoryOptions {
    pub level: Level,
    pub output: OutputType,
}

impl TracingFactoryOptions {
    pub fn new(debug: bool, output: OutputType) -> Self {
        let level = if debug { Level::DEBUG } else { Level::INFO };
        TracingFactoryOptions { level, output }
    }
}

impl Default for TracingFactoryOptions {
    fn default() -> Self {
        TracingFactoryOptions::new(false, OutputType::Stdout)
    }
}

/// Initializes the global tracing subscriber exactly once per process.
///
/// Subsequent calls are no-ops, so callers (CLI entry points, tests) can
/// invoke this unconditionally.
pub fn init_tracing(options: TracingFactoryOptions) {
    INIT.call_once(|| {
        let format = tracing_subscriber::fmt::format()
            .with_file(true)
            .with_line_number(false)
            .with_target(false)
            .compact();

        let builder = tracing_subscriber::fmt().with_max_level(options.level).event_format(format);

        let _ = match options.output {
            OutputType::Stdout => builder.try_init(),
            OutputType::File { log_dir } => {
                let file_appender = rolling::daily(format!("{log_dir}/binlog-cdc"), "file.log");
                builder.with_writer(file_appender.and(io::stdout)).try_init()
            }
        };
    });
}

#[cfg(test)]
mod test {
    use super::*;
    use tracing::{debug, info};

    #[test]
    fn init_is_idempotent() {
        init_tracing(TracingFactoryOptions::default());
        init_tracing(TracingFactoryOptions::default());

        debug!("tracing init test");
        info!("tracing init test");
    }
}
