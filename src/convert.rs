//! External PDF-to-Markdown conversion engines.
//!
//! Conversion is delegated to external command-line tools invoked as
//! subprocesses; this crate never parses PDFs itself. Engines are wrapped
//! behind [`ConvertEngine`] with typed errors, a configurable timeout, and
//! UTF-8 validation of the captured output.

use crate::error::{Error, Result};
use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Maximum stderr bytes kept for logging when a conversion fails.
const STDERR_CAPTURE_LIMIT: usize = 4096;

/// PDF-to-Markdown conversion engine selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConvertEngine {
    /// Try markitdown first, fall back to pdftotext
    #[default]
    Auto,
    /// `markitdown <file>` (Markdown output)
    Markitdown,
    /// `pdftotext -layout <file> -` (plain text, tables kept columnar)
    Pdftotext,
}

impl ConvertEngine {
    pub fn name(&self) -> &'static str {
        match self {
            ConvertEngine::Auto => "auto",
            ConvertEngine::Markitdown => "markitdown",
            ConvertEngine::Pdftotext => "pdftotext",
        }
    }

    fn command_line(&self, path: &Path) -> Option<(&'static str, Vec<String>)> {
        let path = path.to_string_lossy().to_string();
        match self {
            ConvertEngine::Auto => None,
            ConvertEngine::Markitdown => Some(("markitdown", vec![path])),
            ConvertEngine::Pdftotext => {
                Some(("pdftotext", vec!["-layout".to_string(), path, "-".to_string()]))
            }
        }
    }
}

/// Convert a PDF file to Markdown text using the selected engine.
///
/// `Auto` probes concrete engines in preference order and reports
/// `EngineNotFound` only if none is installed. The subprocess is killed if
/// it outlives `timeout`.
pub async fn convert_to_markdown(
    path: &Path,
    engine: ConvertEngine,
    timeout: Duration,
) -> Result<String> {
    match engine {
        ConvertEngine::Auto => {
            for candidate in [ConvertEngine::Markitdown, ConvertEngine::Pdftotext] {
                match run_engine(candidate, path, timeout).await {
                    Err(Error::EngineNotFound { .. }) => continue,
                    other => return other,
                }
            }
            Err(Error::EngineNotFound {
                engine: "auto (markitdown, pdftotext)".to_string(),
            })
        }
        _ => run_engine(engine, path, timeout).await,
    }
}

async fn run_engine(engine: ConvertEngine, path: &Path, timeout: Duration) -> Result<String> {
    let (program, args) = engine
        .command_line(path)
        .ok_or_else(|| Error::InvalidParams {
            reason: format!("engine {} cannot be invoked directly", engine.name()),
        })?;

    tracing::debug!(engine = engine.name(), path = %path.display(), "invoking converter");
    invoke(program, &args, timeout).await.map_err(|e| match e {
        Error::EngineNotFound { .. } => Error::EngineNotFound {
            engine: engine.name().to_string(),
        },
        other => other,
    })
}

/// Spawn a command, capture stdout, and enforce the timeout.
async fn invoke(program: &str, args: &[String], timeout: Duration) -> Result<String> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::EngineNotFound {
                    engine: program.to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;

    // kill_on_drop reaps the child when the future is dropped on timeout.
    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| Error::ConversionTimeout {
            seconds: timeout.as_secs(),
        })?
        .map_err(Error::Io)?;

    if !output.status.success() {
        let captured = &output.stderr[..output.stderr.len().min(STDERR_CAPTURE_LIMIT)];
        let stderr = String::from_utf8_lossy(captured).to_string();
        return Err(Error::ConversionFailed {
            engine: program.to_string(),
            stderr,
        });
    }

    String::from_utf8(output.stdout).map_err(|e| Error::InvalidOutput {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_names_round_trip_through_serde() {
        let engine: ConvertEngine = serde_json::from_str("\"pdftotext\"").unwrap();
        assert_eq!(engine, ConvertEngine::Pdftotext);
        assert_eq!(serde_json::to_string(&ConvertEngine::Auto).unwrap(), "\"auto\"");
    }

    #[test]
    fn auto_has_no_direct_command_line() {
        assert!(ConvertEngine::Auto.command_line(Path::new("x.pdf")).is_none());
        let (program, args) = ConvertEngine::Pdftotext.command_line(Path::new("x.pdf")).unwrap();
        assert_eq!(program, "pdftotext");
        assert_eq!(args, vec!["-layout", "x.pdf", "-"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_binary_maps_to_engine_not_found() {
        let result = invoke("definitely-not-a-real-binary-qqq", &[], Duration::from_secs(5)).await;
        assert!(matches!(result, Err(Error::EngineNotFound { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stdout_is_captured() {
        let out = invoke("echo", &["hello".to_string()], Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_subprocess_times_out() {
        let result = invoke("sleep", &["5".to_string()], Duration::from_millis(200)).await;
        assert!(matches!(result, Err(Error::ConversionTimeout { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_subprocess_reports_conversion_failed() {
        let result = invoke("false", &[], Duration::from_secs(5)).await;
        assert!(matches!(result, Err(Error::ConversionFailed { .. })));
    }
}
