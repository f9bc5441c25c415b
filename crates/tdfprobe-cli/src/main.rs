//! tdfprobe - Find TDF element headers in binary images
//!
//! This tool scans a binary file for byte sequences that look like TDF
//! element headers and lists them with their load addresses.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use tdfprobe_core::report;
use tdfprobe_core::scanner::read_input;
use tdfprobe_core::{ScanStrategy, Scanner, DEFAULT_BASE_ADDRESS};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Find TDF element headers in binary images
#[derive(Parser, Debug)]
#[command(name = "tdfprobe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Binary file to scan (e.g. EBOOT.elf)
    file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so the report on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let found = process_file(&cli.file, &mut out)?;

    info!("Reported {} headers from {}", found, cli.file.display());
    Ok(())
}

/// Scan one binary and write the text report to `out`
fn process_file(path: &Path, out: &mut impl Write) -> Result<usize> {
    let data = read_input(path)
        .with_context(|| format!("Cannot scan {}", path.display()))?;
    debug!("Read {} bytes from {}", data.len(), path.display());

    let result = Scanner::new().scan(&data);
    let text = report::render_text(&result, DEFAULT_BASE_ADDRESS);

    out.write_all(text.as_bytes())
        .context("Failed to write report")?;
    writeln!(out, "Program ended.").context("Failed to write report")?;

    Ok(result.len())
}
