use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use namekeeper_lib::{Error, Store};
use sysexits::ExitCode as SysExit;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod name;

#[derive(Parser, Debug)]
#[command(name = "namekeeper")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: name::Command,

    /// Use this database file instead of the configured one
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    human_panic::setup_panic!();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {e}");
    }

    let cli = Cli::parse();

    let store = match &cli.db {
        Some(path) => Store::open(path),
        None => Store::open_default(),
    };

    let result = match store {
        Ok(store) => name::handle(&store, &cli.command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => SysExit::Ok.into(),
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            exit_code(&e).into()
        }
    }
}

fn exit_code(error: &Error) -> SysExit {
    match error {
        Error::Internal(_) | Error::Io(_) => SysExit::IoErr,
        Error::Config(_) => SysExit::CantCreat,
        Error::SchemaMismatch { .. } | Error::Corrupt(_) => SysExit::DataErr,
        Error::NoHomeDir => SysExit::OsFile,
        Error::NonUtf8Path(_) => SysExit::Usage,
        Error::Task(_) | Error::UnexpectedResult => SysExit::Software,
    }
}
