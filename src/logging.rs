//! Diagnostics on standard error.
//!
//! Uses the `log` facade with an `env_logger` backend. Standard output is
//! reserved for the report, so everything logged goes to stderr.
//!
//! Level, in priority order:
//! 1. `RUST_LOG`, if set
//! 2. `--quiet`: errors only (bad roots, unreadable files)
//! 3. `--verbose` count: 1 = info, 2 = debug, 3+ = trace
//! 4. Default: warn
//!
//! While a progress bar is attached with [`attach_progress`], each record is
//! written with the bar suspended so the two never interleave on a terminal.

use std::env;
use std::io::Write;
use std::sync::RwLock;

use env_logger::{Builder, Logger, Target};
use indicatif::ProgressBar;
use log::{LevelFilter, Log, Metadata, Record};

static PROGRESS: RwLock<Option<ProgressBar>> = RwLock::new(None);

struct ProgressAwareLogger {
    inner: Logger,
}

impl Log for ProgressAwareLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.inner.matches(record) {
            return;
        }
        let bar = PROGRESS.read().ok().and_then(|guard| guard.clone());
        match bar {
            Some(pb) => pb.suspend(|| self.inner.log(record)),
            None => self.inner.log(record),
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Initialize logging. Call once, before anything is logged.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();
    builder.target(Target::Stderr);

    if env::var_os("RUST_LOG").is_some() {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    builder.format(|buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);
        writeln!(
            buf,
            "{style}{}{style:#}: {}",
            level.as_str().to_lowercase(),
            record.args()
        )
    });

    let inner = builder.build();
    let max_level = inner.filter();
    let logger: &'static ProgressAwareLogger = Box::leak(Box::new(ProgressAwareLogger { inner }));

    // A logger may already be installed when embedded in tests.
    if log::set_logger(logger).is_ok() {
        log::set_max_level(max_level);
    }
}

/// Route log output around `pb` until [`detach_progress`] is called.
pub fn attach_progress(pb: &ProgressBar) {
    if let Ok(mut guard) = PROGRESS.write() {
        *guard = Some(pb.clone());
    }
}

pub fn detach_progress() {
    if let Ok(mut guard) = PROGRESS.write() {
        *guard = None;
    }
}

fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
