mod config;
mod event_source;
mod metadata_provider;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use binlog::dispatcher::Dispatcher;
use binlog::filter::{json_lines_sink, FilterChain};
use binlog::metadata::Catalog;
use common::config::read_toml_config;
use common::log::{init_tracing, OutputType, TracingFactoryOptions};

use crate::config::BinlogCdcConfig;
use crate::event_source::read_fixture_events;
use crate::metadata_provider::TomlMetadataProvider;

#[derive(Parser, Debug, Clone)]
#[command(name = "binlog-cdc")]
#[command(version)]
#[command(about = "Reconstructs a change-data-capture stream from a MySQL/MariaDB row-based binlog")]
pub(crate) struct CliArgs {
    /// Path to the BinlogCdcConfig TOML file.
    #[arg(short, long, help = "Path to loaded configuration file", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "enable debug logging", default_value_t = false)]
    pub debug: bool,

    /// Overrides the configured table include-set; repeatable.
    #[arg(long = "table", help = "only emit messages for this table (repeatable)")]
    pub tables: Vec<String>,

    /// Overrides the configured schema include-set; repeatable.
    #[arg(long = "schema", help = "only emit messages for this schema (repeatable)")]
    pub schemas: Vec<String>,

    #[arg(long, help = "pretty-print JSON output", default_value_t = false)]
    pub pretty: bool,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(TracingFactoryOptions::new(args.debug, OutputType::Stdout));

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "binlog-cdc aborted");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> binlog::error::Result<()> {
    let config_path = args.config.clone().unwrap_or_else(|| PathBuf::from("binlog-cdc.toml"));
    let mut config: BinlogCdcConfig =
        read_toml_config(&config_path).map_err(|e| binlog::error::Error::Config(format!("{}: {e}", config_path.display())))?;

    if !args.tables.is_empty() {
        config.include_tables = args.tables.clone();
    }
    if !args.schemas.is_empty() {
        config.include_schemas = args.schemas.clone();
    }
    config.pretty = config.pretty || args.pretty;

    let provider = TomlMetadataProvider::load(&config.metadata_path)?;
    let mut catalog = Catalog::new(Box::new(provider));
    catalog.populate()?;

    let events = read_fixture_events(&config.binlog_events_path)?;

    let mut chain = FilterChain::new()
        .include_tables(config.include_tables.clone())
        .include_schemas(config.include_schemas.clone())
        .add_sink(json_lines_sink(std::io::stdout(), config.pretty));

    let mut dispatcher = Dispatcher::new(catalog);
    dispatcher.run(events, &mut chain)
}
