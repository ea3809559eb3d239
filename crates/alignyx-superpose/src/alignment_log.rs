//! Plain-text alignment log.
//!
//! One line per processed structure, in the fixed wording downstream tooling
//! greps for.

use std::fmt;
use std::path::Path;

/// In-memory alignment log, persisted as plain text at the end of a run.
#[derive(Debug, Clone, Default)]
pub struct AlignmentLog {
    lines: Vec<String>,
}

impl AlignmentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the designation of the immobile reference structure.
    pub fn record_target(&mut self, structure_id: &str) {
        self.lines.push(format!("Immobile target: {}", structure_id));
    }

    /// Record a query alignment against the reference.
    pub fn record_align(&mut self, query_id: &str, target_id: &str) {
        self.lines.push(format!("-- align {} to {}", query_id, target_id));
    }

    /// Record that the last alignment was discarded for bad fit.
    pub fn record_bad_alignment(&mut self) {
        self.lines.push("--- bad alignment: skip structure".to_string());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Persist the log, one line per entry.
    pub async fn write_to<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let mut text = self.lines.join("\n");
        text.push('\n');
        tokio::fs::write(path.as_ref(), text).await?;
        Ok(())
    }
}

impl fmt::Display for AlignmentLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
