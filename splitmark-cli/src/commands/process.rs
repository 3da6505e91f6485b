//! Process command implementation

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use splitmark_core::{Document, Segmentation, SegmentationEngine};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{read_document, resolve_patterns};
use crate::output::OutputFormat;
use crate::progress::ProgressReporter;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output directory, one result file per input (default: stdout)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum segment length in characters
    #[arg(long, value_name = "CHARS")]
    pub max_length: Option<usize>,

    /// Minimum segment length in characters
    #[arg(long, value_name = "CHARS")]
    pub min_length: Option<usize>,

    /// Penalty for splitting inside a sentence (0 disables it)
    #[arg(long, value_name = "WEIGHT")]
    pub integrity_weight: Option<f64>,

    /// How far a split may move to reach a sentence boundary
    #[arg(long, value_name = "CHARS")]
    pub search_window: Option<usize>,

    /// Record scored candidates and corrections
    #[arg(long)]
    pub debug: bool,

    /// Process files on a thread pool
    #[arg(short, long, conflicts_with = "sequential")]
    pub parallel: bool,

    /// Process files one after another
    #[arg(long)]
    pub sequential: bool,

    /// Number of worker threads (0 = number of CPUs)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Leave existing result files untouched
    #[arg(long)]
    pub skip_existing: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging();

        log::info!("Starting segmentation");
        log::debug!("Arguments: {:?}", self);

        let config = self.effective_config()?;
        let engine = SegmentationEngine::new(config.segment_config()).map_err(CliError::from)?;

        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} file(s) to process", files.len());

        let output_dir = config.processing.output_folder.as_deref();
        if let Some(dir) = output_dir {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        }

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        let job = FileJob {
            engine: &engine,
            format: self.format,
            output_dir,
            skip_existing: config.processing.skip_existing,
            progress: &progress,
        };

        let started = Instant::now();
        let outcomes: Vec<FileOutcome> = if config.performance.parallel && files.len() > 1 {
            let threads = worker_count(config.performance.worker_threads, files.len());
            log::debug!("Using {} worker thread(s)", threads);
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to build worker pool")?;
            pool.install(|| files.par_iter().map(|path| job.run(path)).collect())
        } else {
            files.iter().map(|path| job.run(path)).collect()
        };
        progress.finish();

        if output_dir.is_none() {
            let mut formatter = self.format.formatter(io::stdout());
            for outcome in &outcomes {
                if let FileOutcome::Segmented {
                    source,
                    document,
                    segmentation,
                } = outcome
                {
                    formatter.format_document(source, document, segmentation)?;
                }
            }
            formatter.finish()?;
        }

        let summary = Summary::new(&outcomes, started.elapsed());
        summary.report(self.quiet);

        if summary.failed.is_empty() {
            Ok(())
        } else {
            Err(CliError::ProcessingError(format!(
                "{} of {} file(s) failed",
                summary.failed.len(),
                summary.total
            ))
            .into())
        }
    }

    /// Configuration file values with command-line overrides applied
    pub fn effective_config(&self) -> Result<CliConfig> {
        let mut config = CliConfig::load_or_default(self.config.as_deref())?;

        if let Some(max_length) = self.max_length {
            config.document.max_length = max_length;
        }
        if let Some(min_length) = self.min_length {
            config.document.min_length = min_length;
        }
        if let Some(weight) = self.integrity_weight {
            config.document.sentence_integrity_weight = weight;
        }
        if let Some(window) = self.search_window {
            config.advanced.search_window = window;
        }
        if self.debug {
            config.processing.debug_mode = true;
        }
        if let Some(dir) = &self.output {
            config.processing.output_folder = Some(dir.clone());
        }
        if self.skip_existing {
            config.processing.skip_existing = true;
        }
        if self.parallel {
            config.performance.parallel = true;
        } else if self.sequential {
            config.performance.parallel = false;
        }
        if let Some(threads) = self.threads {
            config.performance.worker_threads = threads;
        }

        Ok(config)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when commands run in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

/// Path of the result file for `input`: its file name plus the format extension
pub fn output_path(dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let mut name = input
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".");
    name.push(format.extension());
    dir.join(name)
}

/// Pool size: configured count (0 = CPUs), at most one thread per file
fn worker_count(configured: usize, files: usize) -> usize {
    let threads = if configured == 0 {
        num_cpus::get()
    } else {
        configured
    };
    threads.clamp(1, files.max(1))
}

/// What happened to one input file
enum FileOutcome {
    /// Segmented, result held back for stdout
    Segmented {
        source: String,
        document: Document,
        segmentation: Segmentation,
    },
    /// Result written to the output directory
    Written,
    /// Result file already present
    Skipped,
    Failed {
        source: String,
        error: anyhow::Error,
    },
}

/// Per-file work shared by all workers
struct FileJob<'a> {
    engine: &'a SegmentationEngine,
    format: OutputFormat,
    output_dir: Option<&'a Path>,
    skip_existing: bool,
    progress: &'a ProgressReporter,
}

impl FileJob<'_> {
    fn run(&self, path: &Path) -> FileOutcome {
        let outcome = match self.process(path) {
            Ok(outcome) => outcome,
            Err(error) => {
                log::error!("Failed to process {}: {:#}", path.display(), error);
                FileOutcome::Failed {
                    source: path.display().to_string(),
                    error,
                }
            }
        };

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.progress.file_completed(&name);
        outcome
    }

    fn process(&self, path: &Path) -> Result<FileOutcome> {
        let target = self.output_dir.map(|dir| output_path(dir, path, self.format));

        if let Some(target) = &target {
            if self.skip_existing && target.exists() {
                log::info!("Skipping {}: {} exists", path.display(), target.display());
                return Ok(FileOutcome::Skipped);
            }
        }

        let document = read_document(path)?;
        log::debug!(
            "{}: {} paragraph(s), {} character(s)",
            path.display(),
            document.len(),
            document.char_len()
        );
        let segmentation = self.engine.segment(&document);
        if segmentation.has_diagnostics() {
            log::warn!(
                "{}: {} diagnostic(s), see the JSON output for details",
                path.display(),
                segmentation.diagnostics.len()
            );
        }
        let source = path.display().to_string();

        match target {
            None => Ok(FileOutcome::Segmented {
                source,
                document,
                segmentation,
            }),
            Some(target) => {
                let file = File::create(&target)
                    .with_context(|| format!("Failed to create {}", target.display()))?;
                let mut formatter = self.format.formatter(BufWriter::new(file));
                formatter
                    .format_document(&source, &document, &segmentation)
                    .and_then(|()| formatter.finish())
                    .with_context(|| format!("Failed to write {}", target.display()))?;
                log::info!("Wrote {}", target.display());
                Ok(FileOutcome::Written)
            }
        }
    }
}

/// End-of-run counts
struct Summary {
    total: usize,
    processed: usize,
    skipped: usize,
    failed: Vec<String>,
    elapsed: Duration,
}

impl Summary {
    fn new(outcomes: &[FileOutcome], elapsed: Duration) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            processed: 0,
            skipped: 0,
            failed: Vec::new(),
            elapsed,
        };

        for outcome in outcomes {
            match outcome {
                FileOutcome::Segmented { .. } | FileOutcome::Written => summary.processed += 1,
                FileOutcome::Skipped => summary.skipped += 1,
                FileOutcome::Failed { source, error } => {
                    summary.failed.push(format!("{}: {:#}", source, error));
                }
            }
        }
        summary
    }

    /// Print to stderr; failures are listed even when quiet
    fn report(&self, quiet: bool) {
        if !quiet {
            eprintln!(
                "Processed {} of {} file(s) in {:.2}s ({} skipped, {} failed)",
                self.processed,
                self.total,
                self.elapsed.as_secs_f64(),
                self.skipped,
                self.failed.len()
            );
        }

        if !self.failed.is_empty() {
            eprintln!("Failed files:");
            for failure in &self.failed {
                eprintln!("  {}", failure);
            }
        }
    }
}
