use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches, Parser};
use jsonflat::{
    DOCUMENT_TYPE, FlattenConfig, FlattenedStatement, SamplingMode, SnapshotWarehouse,
    SqlDialect, TableRef, confirmation, construct_flattened_sql, write_statement,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jsonflat")]
#[command(
    about = "Flatten the JSON columns of a BigQuery table into a SELECT statement",
    long_about = None
)]
struct Cli {
    /// Project (catalog) of the table
    #[arg(long, env = "JSONFLAT_PROJECT")]
    project: Option<String>,

    /// Dataset (schema) of the table
    #[arg(long, env = "JSONFLAT_DATASET")]
    dataset: Option<String>,

    /// Table id
    #[arg(long, env = "JSONFLAT_TABLE")]
    table: Option<String>,

    /// Fully qualified table, instead of --project/--dataset/--table
    #[arg(long, value_name = "PROJECT.DATASET.TABLE")]
    target: Option<String>,

    /// JSON snapshot of the warehouse catalog and rows
    #[arg(long, env = "JSONFLAT_SNAPSHOT")]
    snapshot: PathBuf,

    /// Quoting convention of the emitted statement
    #[arg(long, default_value_t = SqlDialect::BigQuery)]
    dialect: SqlDialect,

    /// Declared type marking document-valued columns
    #[arg(long, default_value = DOCUMENT_TYPE)]
    document_type: String,

    /// Directory receiving <table>_flattened.sql (default: current directory)
    #[arg(long, env = "JSONFLAT_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Issue all sample queries at once
    #[arg(long)]
    concurrent_sampling: bool,

    /// Print the statement without writing the file
    #[arg(long)]
    no_write: bool,

    /// -v for info, -vv for debug logs on stderr
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

const SEPARATE_IDENTIFIERS: [&str; 3] = ["project", "dataset", "table"];

impl Cli {
    fn parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::parse_with(Self::command(), args)
    }

    /// `--target` conflicts only with identifiers typed on the command line;
    /// `JSONFLAT_*` environment values stay overridable.
    fn parse_with<I, T>(mut command: Command, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command.try_get_matches_from_mut(args)?;
        if let Some(flag) = conflicting_identifier(&matches) {
            return Err(command.error(
                ErrorKind::ArgumentConflict,
                format!("--target cannot be used with --{}", flag),
            ));
        }
        Self::from_arg_matches(&matches).map_err(|e| e.format(&mut command))
    }

    fn table_ref(&self) -> Result<TableRef> {
        if let Some(target) = &self.target {
            return Ok(TableRef::parse(target)?);
        }
        match (&self.project, &self.dataset, &self.table) {
            (Some(project), Some(dataset), Some(table)) => {
                Ok(TableRef::new(project, dataset, table)?)
            }
            _ => bail!("either --target or all of --project, --dataset and --table are required"),
        }
    }

    fn flatten_config(&self) -> Result<FlattenConfig> {
        let sampling = if self.concurrent_sampling {
            SamplingMode::Concurrent
        } else {
            SamplingMode::Sequential
        };
        Ok(FlattenConfig::new(self.table_ref()?)
            .with_dialect(self.dialect)
            .with_document_type(&self.document_type)
            .with_sampling(sampling))
    }
}

fn conflicting_identifier(matches: &ArgMatches) -> Option<&'static str> {
    let on_command_line = |id: &str| matches.value_source(id) == Some(ValueSource::CommandLine);
    if !on_command_line("target") {
        return None;
    }
    SEPARATE_IDENTIFIERS.into_iter().find(|id| on_command_line(*id))
}

/// Prints the statement, then the confirmation when a file was written.
fn report(
    out: &mut impl Write,
    statement: &FlattenedStatement,
    saved: Option<&Path>,
) -> io::Result<()> {
    writeln!(out, "{}", statement.sql)?;
    if let Some(path) = saved {
        writeln!(out, "{}", confirmation(path))?;
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit());
    init_tracing(cli.verbose);

    let config = cli.flatten_config()?;
    debug!(?config, "Resolved configuration");

    let warehouse = SnapshotWarehouse::load(&cli.snapshot)
        .await
        .with_context(|| format!("Failed to load snapshot {}", cli.snapshot.display()))?;
    let statement = construct_flattened_sql(&warehouse, &config)
        .await
        .with_context(|| format!("Failed to flatten {}", config.table))?;

    let saved = if cli.no_write {
        None
    } else {
        let dir = cli.output_dir.clone().unwrap_or_default();
        let path = write_statement(&statement, &dir)
            .await
            .context("Failed to write flattened SQL")?;
        Some(path)
    };

    report(&mut io::stdout().lock(), &statement, saved.as_deref())
        .context("Failed to print flattened SQL")?;
    Ok(())
}
