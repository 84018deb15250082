//! Transcript import.
//!
//! Reads JSONL transcripts: one message object per line, in transcript
//! order. Two modes are supported:
//!
//! - **Lenient mode** (default): skips malformed lines, logs a warning
//! - **Strict mode**: fails on the first parse error
//!
//! Message indices are assigned from line position, so the transcript's
//! ordering is exactly the file's ordering.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{LensError, Result};
use crate::model::{Message, Transcript};

/// JSONL transcript reader.
#[derive(Debug)]
pub struct TranscriptReader {
    /// Whether to skip malformed lines instead of failing.
    lenient: bool,
    /// Statistics about the last import.
    stats: ImportStats,
}

/// Statistics about an import operation.
#[derive(Debug, Clone, Default)]
pub struct ImportStats {
    /// Total lines processed.
    pub lines_processed: usize,
    /// Lines successfully parsed into messages.
    pub lines_parsed: usize,
    /// Lines skipped (blank or malformed in lenient mode).
    pub lines_skipped: usize,
}

impl ImportStats {
    /// Fraction of non-blank lines that parsed successfully.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.lines_processed == 0 {
            return 100.0;
        }
        (self.lines_parsed as f64 / self.lines_processed as f64) * 100.0
    }
}

impl Default for TranscriptReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptReader {
    /// Create a new reader in lenient mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lenient: true,
            stats: ImportStats::default(),
        }
    }

    /// Set lenient mode.
    #[must_use]
    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Statistics about the last import.
    #[must_use]
    pub fn stats(&self) -> &ImportStats {
        &self.stats
    }

    /// Read a transcript from a file.
    pub fn read_file(&mut self, path: impl AsRef<Path>) -> Result<Transcript> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LensError::TranscriptNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)
            .map_err(|e| LensError::io(format!("Failed to open {}", path.display()), e))?;

        let transcript = self.read_from(BufReader::new(file))?;
        debug!(
            path = %path.display(),
            messages = transcript.len(),
            skipped = self.stats.lines_skipped,
            "transcript loaded"
        );
        Ok(transcript)
    }

    /// Read a transcript from a string.
    pub fn read_str(&mut self, content: &str) -> Result<Transcript> {
        self.read_from(content.as_bytes())
    }

    /// Read a transcript from any buffered reader.
    fn read_from(&mut self, reader: impl BufRead) -> Result<Transcript> {
        self.stats = ImportStats::default();
        let mut messages = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line_no = line_no + 1;
            let line = line
                .map_err(|e| LensError::io(format!("Failed to read line {line_no}"), e))?;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.stats.lines_processed += 1;

            match serde_json::from_str::<Message>(trimmed) {
                Ok(message) => {
                    messages.push(message);
                    self.stats.lines_parsed += 1;
                }
                Err(e) if self.lenient => {
                    warn!(line = line_no, error = %e, "skipping malformed line");
                    self.stats.lines_skipped += 1;
                }
                Err(e) => {
                    return Err(LensError::parse_with_source(
                        line_no,
                        "malformed message object",
                        e,
                    ));
                }
            }
        }

        Ok(Transcript::from_messages(messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
{"author":"alice","timestamp":"2024-03-01T09:00:00Z","content":"morning"}
{"author":"bob","timestamp":"2024-03-01T09:01:00Z","content":"hey"}
{"author":"alice","timestamp":"2024-03-02T10:00:00Z","content":"still there?"}
"#;

    #[test]
    fn test_read_ordered_transcript() {
        let mut reader = TranscriptReader::new();
        let transcript = reader.read_str(SAMPLE).unwrap();

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.messages()[0].author.as_deref(), Some("alice"));
        assert_eq!(transcript.messages()[2].index, 2);
        assert_eq!(reader.stats().lines_parsed, 3);
    }

    #[test]
    fn test_lenient_skips_bad_lines() {
        let content = "{\"author\":\"a\",\"timestamp\":\"2024-03-01T09:00:00Z\"}\nnot json\n";
        let mut reader = TranscriptReader::new();
        let transcript = reader.read_str(content).unwrap();

        assert_eq!(transcript.len(), 1);
        assert_eq!(reader.stats().lines_skipped, 1);
    }

    #[test]
    fn test_strict_fails_on_bad_line() {
        let content = "not json\n";
        let mut reader = TranscriptReader::new().with_lenient(false);
        let err = reader.read_str(content).unwrap_err();
        assert!(matches!(err, LensError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_missing_file() {
        let mut reader = TranscriptReader::new();
        let err = reader.read_file("/nonexistent/chat.jsonl").unwrap_err();
        assert!(matches!(err, LensError::TranscriptNotFound { .. }));
    }
}
