//! chickifier - Easter Messages Hub
//!
//! Type or pick a festive message, wrap it in chicks and bunnies, and copy it
//! to the clipboard.

mod app;
mod config;
mod models;
mod screens;
mod services;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::models::MessageSource;
use crate::services::{ClipboardPublisher, ClipboardSink, MemoryClipboard, SystemClipboard};

/// chickifier - Easter Messages Hub
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Config file path (default: ~/.config/chickifier/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Copy this message without opening the TUI
    #[arg(short, long, conflicts_with = "sample")]
    message: Option<String>,

    /// Copy the sample at this index (see --list-samples) without opening the TUI
    #[arg(short, long)]
    sample: Option<usize>,

    /// Print the sample messages and exit
    #[arg(long, conflicts_with_all = ["message", "sample"])]
    list_samples: bool,

    /// Print the decorated message instead of touching the system clipboard
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn is_headless(&self) -> bool {
        self.message.is_some() || self.sample.is_some() || self.list_samples
    }
}

/// Open (or create) the log file in `dir`.
fn open_log_file(dir: &Path) -> Result<File> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join("chickifier.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(file)
}

/// Set up tracing. The TUI owns the terminal, so it logs to a file instead.
///
/// If the log file cannot be opened the TUI still starts, logging only
/// warnings and errors to stderr.
fn init_logging(debug: bool, to_file: bool) {
    let mut filter = if debug {
        "chickifier=debug,info"
    } else {
        "chickifier=info,warn"
    };
    let mut log_file_error = None;

    let writer = if to_file {
        match open_log_file(&config::Config::data_dir()) {
            Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
            Err(e) => {
                log_file_error = Some(e);
                filter = "warn";
                BoxMakeWriter::new(std::io::stderr)
            }
        }
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };
    let to_file = to_file && log_file_error.is_none();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(!to_file),
        )
        .init();

    if let Some(e) = log_file_error {
        warn!(error = %e, "log file unavailable, logging warnings to stderr");
    }
}

fn clipboard_for(dry_run: bool) -> Box<dyn ClipboardSink> {
    if dry_run {
        Box::new(MemoryClipboard::new())
    } else {
        Box::new(SystemClipboard::new())
    }
}

/// Lines to print for a headless run.
fn headless_output(config: &config::Config, args: &Args) -> Result<Vec<String>> {
    if args.list_samples {
        return Ok(models::samples()
            .iter()
            .enumerate()
            .map(|(i, sample)| format!("{:>2}  {}", i, sample))
            .collect());
    }

    let (raw, source) = match (&args.message, args.sample) {
        (Some(message), _) => (message.clone(), MessageSource::Typed),
        (None, Some(index)) => match models::sample(index) {
            Some(sample) => (sample.to_string(), MessageSource::Sample),
            None => bail!(
                "No sample at index {} (there are {})",
                index,
                models::samples().len()
            ),
        },
        (None, None) => return Ok(Vec::new()),
    };

    if args.dry_run {
        let mut publisher = ClipboardPublisher::new(MemoryClipboard::new(), config.toast_duration());
        let toast = publisher.copy_message(&raw, source)?;
        let copied = publisher.clipboard().contents().unwrap_or_default().to_string();
        return Ok(vec![copied, toast.text]);
    }

    // The process exits right after copying, so hold the selection until
    // another application takes it over.
    let clipboard = SystemClipboard::holding_until_replaced();
    info!(hold = clipboard.holds_until_replaced(), "copying to system clipboard");
    let mut publisher = ClipboardPublisher::new(clipboard, config.toast_duration());
    let toast = publisher.copy_message(&raw, source)?;
    Ok(vec![toast.text])
}

/// Copy a single message from the command line and print the notification.
fn run_headless(config: &config::Config, args: &Args) -> Result<()> {
    for line in headless_output(config, args)? {
        println!("{}", line);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let headless = args.is_headless();

    init_logging(args.debug, !headless);

    // Load configuration
    let config = if let Some(path) = &args.config {
        config::Config::from_file(path)?
    } else {
        config::Config::load()?
    };

    if headless {
        return run_headless(&config, &args);
    }

    info!(dry_run = args.dry_run, "starting tui");
    let mut app = app::App::new(config, clipboard_for(args.dry_run));
    app.run().await?;

    Ok(())
}
