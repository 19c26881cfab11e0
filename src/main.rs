//! prefix-dupes CLI
//!
//! Find duplicate files across one or more directory trees.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};

use prefix_dupes::logging::{attach_progress, detach_progress, init_logging};
use prefix_dupes::report::{format_report, format_summary};
use prefix_dupes::scanner::{ScanProgress, scan, scan_with_progress};
use prefix_dupes::types::{OutputFormat, ScanConfig, ScanReport};

#[derive(Parser, Debug)]
#[command(name = "prefix-dupes")]
#[command(about = "Find duplicate files by size and the hash of their first MiB")]
#[command(version)]
struct Cli {
    /// Directories to scan
    dirs: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormatArg,

    /// Number of threads used for hashing (default: number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Descend into symbolically linked directories
    #[arg(long)]
    follow_symlinks: bool,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only errors on stderr, no progress
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.dirs.is_empty() {
        eprint!("{}", Cli::command().render_help());
        return ExitCode::FAILURE;
    }

    init_logging(cli.verbose, cli.quiet);
    debug!("{:?}", cli);

    if let Some(jobs) = cli.jobs {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
        {
            warn!("unable to size hashing pool to {} threads: {}", jobs, e);
        }
    }

    let format = OutputFormat::from(cli.format);
    let config = ScanConfig {
        roots: cli.dirs,
        follow_symlinks: cli.follow_symlinks,
    };

    let report = if format == OutputFormat::Human && !cli.quiet {
        scan_with_bar(&config)
    } else {
        scan(&config)
    };

    print!("{}", format_report(&report, format));
    info!("{}", format_summary(&report));

    if report.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// ============================================================================
// PROGRESS
// ============================================================================

fn scan_with_bar(config: &ScanConfig) -> ScanReport {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message("Walking directories...");
    pb.enable_steady_tick(Duration::from_millis(100));
    attach_progress(&pb);

    let report = scan_with_progress(config, |event| match event {
        ScanProgress::Walked { files } => {
            pb.set_message(format!("Walked {} files...", files));
        }
        ScanProgress::HashingStarted { total } => {
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("█▓░"),
            );
            pb.set_length(total as u64);
            pb.set_position(0);
            pb.set_message("Hashing...");
        }
        ScanProgress::Hashed => pb.inc(1),
    });

    detach_progress();
    pb.finish_and_clear();
    report
}
