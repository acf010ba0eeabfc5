use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sheet_merge::io::{PathInput, csv_write};
use sheet_merge::merge;
use sheet_merge::preview::{self, DEFAULT_PREVIEW_ROWS};
use sheet_merge::report::{self, MergeReport};
use sheet_merge::session::UploadSession;
use sheet_merge::{Result, ToolError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_tracing().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Merge(args) => execute_merge(args),
    }
}

fn execute_merge(args: MergeArgs) -> Result<()> {
    let mut session: UploadSession<PathInput> = UploadSession::new();
    for path in &args.inputs {
        session.stage(PathInput::new(path.clone()));
    }
    info!(
        staged = session.len(),
        widget = %session.widget_key(),
        "files uploaded"
    );

    let outcome = merge::merge_files_with_progress(session.files_mut(), |progress| {
        info!(
            completed = progress.completed,
            total = progress.total,
            file = progress.file,
            succeeded = progress.succeeded,
            "progress {:.0}%",
            progress.fraction() * 100.0
        );
    });

    for error in &outcome.errors {
        eprintln!("error processing {}: {}", error.file, error.message);
    }

    let written = match outcome.require_table() {
        Ok(table) => {
            csv_write::write_file(&args.output, table)?;
            info!(output = %args.output.display(), rows = table.row_count(), "files merged");
            if !args.no_preview {
                println!("{}", preview::render(table, args.preview_rows));
            }
            true
        }
        Err(error) => {
            warn!(%error, "nothing written");
            false
        }
    };

    if let Some(report_path) = &args.report {
        let output = written.then_some(args.output.as_path());
        report::write_report(report_path, &MergeReport::new(&outcome, output))?;
    }

    if written {
        Ok(())
    } else {
        Err(ToolError::NoValidData)
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Merge CSV and Excel files into one CSV, detecting each file's header row."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge the given files into a single CSV.
    Merge(MergeArgs),
}

#[derive(clap::Args)]
struct MergeArgs {
    /// Input files (.csv, .xlsx, .xls), merged in the order given.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output CSV path.
    #[arg(long, short, default_value = csv_write::MERGED_FILE_NAME)]
    output: PathBuf,

    /// Number of merged rows to print as a preview.
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    preview_rows: usize,

    /// Do not print the preview.
    #[arg(long)]
    no_preview: bool,

    /// Optional path of a JSON report describing the merge.
    #[arg(long)]
    report: Option<PathBuf>,
}
