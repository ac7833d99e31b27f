//! Summarize a local document from the command line.
//!
//! Runs the same pipeline as the HTTP server and prints the JSON result to stdout. Shares all
//! runtime configuration with the server binary.
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use docsum::{
    config, extraction::UploadedFile, logging, processing::SummarizationService,
    processing::SummarizeInput,
};

#[derive(Parser)]
#[command(
    name = "docsum-file",
    about = "Summarize a PDF, DOCX, or TXT file (or inline text) and print the JSON result"
)]
struct Cli {
    /// Document to summarize.
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    path: Option<PathBuf>,
    /// Summarize this text instead of a file.
    #[arg(long)]
    text: Option<String>,
    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    config::init_config();
    logging::init_tracing();

    let input = match (cli.text, cli.path) {
        (Some(text), _) => SummarizeInput::from_text(text),
        (None, Some(path)) => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            SummarizeInput::from_file(UploadedFile::new(file_name, bytes))
        }
        (None, None) => bail!("provide a file path or --text"),
    };

    let service = SummarizationService::new(config::get_config())
        .context("failed to initialize summarization backend")?;
    let result = service
        .summarize(input)
        .await
        .context("summarization failed")?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{output}");
    Ok(())
}
