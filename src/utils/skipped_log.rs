// src/utils/skipped_log.rs
use log::warn;

/// Records input rows dropped under a `skip` policy, one line per row:
/// `[STREAM] | REASON | line N | DETAIL`.
///
/// Lines are kept in memory and only reach disk together with the other
/// outputs of a successful run.
#[derive(Debug, Clone, Default)]
pub struct SkippedLog {
    lines: Vec<String>,
}

impl SkippedLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_skipped(&mut self, stream: &str, reason: &str, line: u64, detail: &str) {
        warn!("Skipping {} row at line {}: {} ({})", stream, line, reason, detail);
        self.lines.push(format!(
            "[{}] | {} | line {} | {}",
            stream.to_uppercase(),
            reason,
            line,
            detail.replace('\n', " ")
        ));
    }

    /// Number of rows skipped so far.
    pub fn count(&self) -> usize {
        self.lines.len()
    }

    pub fn render(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for line in &self.lines {
            out.extend_from_slice(line.as_bytes());
            out.push(b'\n');
        }
        out
    }
}
