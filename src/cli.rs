//! The `generate` command: collect the prompt, run one generation and write
//! the resulting page.

use crate::api::MockGenerationClient;
use crate::app::App;
use crate::models::{parse_top_k, Config};
use crate::Result;
use clap::Args;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Song description. Read from stdin when omitted.
    pub query: Option<String>,

    /// Number of reference examples to retrieve (overrides LYRICS_TOP_K).
    #[arg(long, value_parser = parse_top_k)]
    pub top_k: Option<u32>,

    /// Write the page to this file instead of stdout.
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Render an offline preview without contacting the API.
    #[arg(long)]
    pub dry_run: bool,
}

/// Write the page to `output`, or to `stdout` when no file is given.
pub fn write_page<W: Write>(html: &str, output: Option<&Path>, stdout: &mut W) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, html)?;
            info!("Saved page at: {}", path.display());
        }
        None => writeln!(stdout, "{}", html)?,
    }
    Ok(())
}

/// Run one generate action and write the page, whatever the outcome.
///
/// Returns whether generation succeeded; failures have already been rendered
/// into the written page.
pub async fn run_generate<R: Read, W: Write>(
    args: GenerateArgs,
    config: &Config,
    stdin: &mut R,
    stdout: &mut W,
) -> Result<bool> {
    let query = match args.query {
        Some(query) => query,
        None => {
            let mut buffer = String::new();
            stdin.read_to_string(&mut buffer)?;
            buffer
        }
    };
    let top_k = args.top_k.unwrap_or(config.top_k);

    let app = if args.dry_run {
        info!("DRY_RUN enabled, the API will not be contacted");
        App::with_service(Box::new(MockGenerationClient::new()))
    } else {
        App::new(config)?
    };

    let outcome = app.generate(&query, top_k).await;
    write_page(&app.page_html(), args.output.as_deref(), stdout)?;

    match outcome {
        Ok(_) => {
            info!("Generation completed successfully");
            Ok(true)
        }
        Err(e) => {
            error!("Generation failed: {}", e);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_page_to_stdout_when_no_file() {
        let mut stdout = Vec::new();
        write_page("<html></html>", None, &mut stdout).unwrap();
        assert_eq!(String::from_utf8(stdout).unwrap(), "<html></html>\n");
    }

    #[test]
    fn test_write_page_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        let mut stdout = Vec::new();

        write_page("<html></html>", Some(path.as_path()), &mut stdout).unwrap();
        assert!(stdout.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_write_page_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("page.html");

        let err = write_page("x", Some(path.as_path()), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
