use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pdfrefs_parsing::ReferenceExtractor;
use pdfrefs_pdf_mupdf::MupdfBackend;

mod output;

/// Find references in a PDF
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input PDF path (defaults to STDIN)
    infile: Option<PathBuf>,

    /// Output txt path (defaults to STDOUT)
    outfile: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout may be the output stream.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli.infile.as_deref(), cli.outfile.as_deref())
}

fn run(infile: Option<&Path>, outfile: Option<&Path>) -> anyhow::Result<()> {
    let input_name = infile
        .filter(|p| *p != Path::new("-"))
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());

    let data = read_input(infile)?;
    tracing::debug!(input = %input_name, bytes = data.len(), "read input");

    let backend = MupdfBackend::default();
    let paragraphs = ReferenceExtractor::new()
        .extract_from_bytes(&data, &backend)
        .with_context(|| format!("failed to extract references from {}", input_name))?;

    // Only touch the output once extraction has fully succeeded.
    let mut writer = output::open_writer(outfile).with_context(|| match outfile {
        Some(p) => format!("failed to create {}", p.display()),
        None => "failed to open stdout".to_string(),
    })?;
    output::write_paragraphs(&mut writer, &paragraphs).context("failed to write output")?;
    Ok(())
}

/// Read the raw PDF bytes; `None` or `-` means stdin.
fn read_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(p) if p != Path::new("-") => {
            if !p.exists() {
                anyhow::bail!("File not found: {}", p.display());
            }
            std::fs::read(p).with_context(|| format!("failed to read {}", p.display()))
        }
        _ => {
            let mut data = Vec::new();
            std::io::stdin()
                .read_to_end(&mut data)
                .context("failed to read PDF from stdin")?;
            Ok(data)
        }
    }
}
