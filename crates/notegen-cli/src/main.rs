//! notegen - turn pasted text, PDFs, and images into exam-ready notes
//!
//! Reads input text from a file or stdin, optionally OCR-extracts
//! attachments, streams the generated notes to stdout as they arrive,
//! and can export the result as a paginated PDF, save the raw text, or
//! copy it to the clipboard.

mod attach;

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use notegen_core::pdf::{export_pdf, paginate, PageGeometry, DEFAULT_PDF_FILE};
use notegen_core::{clipboard, Config, Mode, NotesClient, NotesError};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "notegen", version, about = "AI study-notes generator")]
struct Args {
    /// Input text file ('-' or omitted reads stdin)
    input: Option<PathBuf>,

    /// Transformation mode: normal, important, mcqs, or summarise
    #[arg(short, long, default_value = "normal")]
    mode: Mode,

    /// PDF or image files to OCR and prepend to the input text
    #[arg(short, long)]
    attach: Vec<PathBuf>,

    /// Export the generated notes as a paginated PDF
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_PDF_FILE)]
    pdf: Option<PathBuf>,

    /// Save the raw generated text to a file
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Copy the generated text to the clipboard
    #[arg(long)]
    copy: bool,
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Report a pipeline failure the way the UI shell would: one
/// user-facing line, details to the log.
fn report(err: &NotesError) {
    warn!("{err}");
    eprintln!("{}", err.user_message());
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load()?;
    if config.generate_url.is_empty() {
        bail!("no generation endpoint configured (set NOTEGEN_GENERATE_URL)");
    }
    let client = NotesClient::new(config.clone());

    let mut text = read_input(args.input.as_ref())?;

    if !args.attach.is_empty() {
        if config.extract_url.is_empty() {
            bail!("no extraction endpoint configured (set NOTEGEN_EXTRACT_URL)");
        }
        let mut attachments = Vec::new();
        for path in &args.attach {
            attachments.push(attach::load(path)?);
        }
        let outcomes = client.extract_batch(&attachments).await;
        for outcome in &outcomes {
            if let Err(err) = &outcome.result {
                report(err);
            }
        }
        let extracted = NotesClient::combine_extracted(&outcomes);
        if !extracted.is_empty() {
            if !text.trim().is_empty() {
                text.push_str("\n\n");
            }
            text.push_str(&extracted);
        }
    }

    if text.trim().is_empty() {
        bail!("Please enter some text to generate notes");
    }

    // Stream to stdout as deltas arrive; the sink receives the full
    // accumulated text, so print only the unseen suffix.
    let mut notes = String::new();
    let mut printed = 0usize;
    let result = client
        .generate(&text, args.mode, |accumulated| {
            let suffix = &accumulated[printed..];
            let mut stdout = std::io::stdout().lock();
            let _ = stdout.write_all(suffix.as_bytes());
            let _ = stdout.flush();
            notes.push_str(suffix);
            printed = accumulated.len();
        })
        .await;

    let stream_error = match result {
        Ok(final_text) => {
            notes = final_text;
            None
        }
        // Partial output stays usable; exports below still run on it
        Err(err) => {
            report(&err);
            Some(err)
        }
    };
    println!();

    let mut export_failed = false;
    if !notes.trim().is_empty() {
        if let Some(path) = &args.pdf {
            let document = paginate(&notes, PageGeometry::default());
            match export_pdf(&document, path) {
                Ok(()) => eprintln!("PDF saved to {}", path.display()),
                Err(err) => {
                    report(&err);
                    export_failed = true;
                }
            }
        }
        if let Some(path) = &args.out {
            std::fs::write(path, &notes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Notes saved to {}", path.display());
        }
        if args.copy {
            match clipboard::copy_text(&notes) {
                Ok(()) => eprintln!("Copied to clipboard!"),
                Err(err) => {
                    report(&err);
                    export_failed = true;
                }
            }
        }
    }

    if let Some(err) = stream_error {
        bail!(err.user_message());
    }
    if export_failed {
        bail!("one or more exports failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_defaults() {
        let args = Args::parse_from(["notegen"]);
        assert_eq!(args.mode, Mode::Normal);
        assert!(args.input.is_none());
        assert!(args.pdf.is_none());
        assert!(!args.copy);
    }

    #[test]
    fn test_pdf_flag_without_value_uses_default_name() {
        let args = Args::parse_from(["notegen", "--pdf"]);
        assert_eq!(args.pdf.unwrap(), PathBuf::from(DEFAULT_PDF_FILE));
    }

    #[test]
    fn test_mode_flag() {
        let args = Args::parse_from(["notegen", "--mode", "mcqs", "input.txt"]);
        assert_eq!(args.mode, Mode::Mcqs);
        assert_eq!(args.input.unwrap(), PathBuf::from("input.txt"));
    }
}
