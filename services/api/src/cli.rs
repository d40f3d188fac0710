use crate::backup::{run_export, run_import, ExportArgs, ImportArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use kpi_tracker::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "KPI Tracker",
    about = "Track daily task performance and run the KPI tracker from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Export or import backup documents against the stored data
    Backup {
        #[command(subcommand)]
        command: BackupCommand,
    },
    /// Run a seeded CLI demo covering scoring, carry-over, and the dashboard
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum BackupCommand {
    /// Write the stored days and categories to a backup document
    Export(ExportArgs),
    /// Replace the stored days and categories with a backup document
    Import(ImportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured data directory
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Backup {
            command: BackupCommand::Export(args),
        } => run_export(args),
        Command::Backup {
            command: BackupCommand::Import(args),
        } => run_import(args),
        Command::Demo(args) => run_demo(args),
    }
}
