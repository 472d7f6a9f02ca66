//! Markdown export of the session memory.

use aim_core::alignment::format_alignment;
use aim_core::error::Result;
use aim_core::session::InteractionRecord;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

/// Writes every stored record, oldest first, to a fixed markdown file.
#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    path: PathBuf,
}

impl MarkdownExporter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Renders and writes the export, returning the path written.
    pub fn export(&self, records: &[InteractionRecord]) -> Result<PathBuf> {
        fs::write(&self.path, render_markdown(records))?;
        tracing::info!("Exported {} record(s) to {:?}", records.len(), self.path);
        Ok(self.path.clone())
    }
}

/// Renders records as a markdown list.
pub fn render_markdown(records: &[InteractionRecord]) -> String {
    let mut out = String::from("# SSM-AIM Mini Export\n\n");
    if records.is_empty() {
        out.push_str("_No sessions stored._\n");
        return out;
    }

    for record in records {
        let ts = if record.timestamp.is_empty() {
            "?"
        } else {
            record.timestamp.as_str()
        };
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "- Time:  {}\n  Align: {}\n  User:  {}\n  AI:    {}\n\n",
            ts,
            format_alignment(record.alignment),
            record.user_text,
            record.reply_text
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_empty() {
        assert_eq!(render_markdown(&[]), "# SSM-AIM Mini Export\n\n_No sessions stored._\n");
    }

    #[test]
    fn test_render_records_in_order() {
        let records = vec![
            InteractionRecord::new("2024-05-01T12:00:01Z", "first", "one", -0.2913),
            InteractionRecord::new("", "second", "two", 0.4567),
        ];

        let markdown = render_markdown(&records);

        assert_eq!(
            markdown,
            "# SSM-AIM Mini Export\n\n\
             - Time:  2024-05-01T12:00:01Z\n  Align: -0.29\n  User:  first\n  AI:    one\n\n\
             - Time:  ?\n  Align: +0.46\n  User:  second\n  AI:    two\n\n"
        );
    }

    #[test]
    fn test_export_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = MarkdownExporter::new(temp_dir.path().join("aim_export.md"));

        let path = exporter
            .export(&[InteractionRecord::new("t", "u", "r", 0.0)])
            .unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("  User:  u\n"));
    }

    #[test]
    fn test_export_failure_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let exporter = MarkdownExporter::new(temp_dir.path().join("missing").join("aim_export.md"));

        assert!(exporter.export(&[]).unwrap_err().is_io());
    }
}
