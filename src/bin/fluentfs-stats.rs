//! Line statistics for the source files of a project.
//!
//! Usage:
//!   fluentfs-stats --dir . --globs '*.rs,*.toml' --include src
//!   fluentfs-stats --dir . --globs '*.rs' --exclude target,tests
//!
//! Prints a table of total, source (non-blank) and blank line counts per
//! matching file, followed by a `TOTAL` row. Set `RUST_LOG=fluentfs=debug`
//! to see which entries the walk skipped. Requires the `cli` feature.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use fluentfs::{Directory, FileLike, FsError, Table, relative_path};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Get project statistics.
#[derive(Parser, Debug)]
#[command(name = "fluentfs-stats")]
#[command(version)]
struct Cli {
    /// Project directory.
    #[arg(long)]
    dir: PathBuf,

    /// Globs to look for, separated by commas.
    #[arg(long, required = true, value_delimiter = ',')]
    globs: Vec<String>,

    /// Directories to include, separated by commas.
    #[arg(long, value_delimiter = ',', conflicts_with = "exclude")]
    include: Vec<PathBuf>,

    /// Directories to exclude, separated by commas.
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<PathBuf>,
}

const COLUMNS: [&str; 4] = ["Path", "Total lines", "Source lines", "Blank lines"];

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(table) => {
            println!("{table}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Table, FsError> {
    let project = Directory::new(&cli.dir)?;
    let mut files = project.files();
    if !cli.include.is_empty() {
        files = files.filter_base_path(cli.include.clone())?;
    } else if !cli.exclude.is_empty() {
        files = files.filter_not_base_path(cli.exclude.clone())?;
    }
    let files = files.filter_glob(cli.globs.clone())?.text_files();

    let mut table = Table::new(COLUMNS)?;
    let (mut total_all, mut source_all, mut blank_all) = (0, 0, 0);

    for file in files {
        let total = file.line_count()?;
        let blank = file.empty_line_count()?;
        let source = total - blank;

        total_all += total;
        source_all += source;
        blank_all += blank;

        let path = relative_path(file.path(), Some(project.path()))?;
        table.add_row_map(row(&display(&path), total, source, blank))?;
    }
    table.add_row_map(row("TOTAL", total_all, source_all, blank_all))?;

    tracing::debug!(files = table.n_rows() - 1, "collected line statistics");
    Ok(table)
}

fn row(path: &str, total: usize, source: usize, blank: usize) -> [(&'static str, String); 4] {
    [
        (COLUMNS[0], path.to_owned()),
        (COLUMNS[1], total.to_string()),
        (COLUMNS[2], source.to_string()),
        (COLUMNS[3], blank.to_string()),
    ]
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
