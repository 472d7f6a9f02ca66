//! The console driver: maps input lines to session operations and output.

use crate::command::Command;
use crate::view;
use aim_core::alignment::format_alignment;
use aim_core::session::SessionManager;
use aim_core::text::sanitize;
use aim_infrastructure::MarkdownExporter;
use colored::Colorize;
use std::io::{self, Write};

pub const PROMPT: &str = "you> ";
pub const CLEAR_PROMPT: &str = "This will erase local mini memory. Type 'yes' to confirm: ";
pub const GOODBYE: &str = "Exiting SSM-AIM (Mini Version). Goodbye.";

/// Whether the read loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console {
    manager: SessionManager,
    exporter: MarkdownExporter,
    pending_clear: bool,
}

impl Console {
    pub fn new(manager: SessionManager, exporter: MarkdownExporter) -> Self {
        Self {
            manager,
            exporter,
            pending_clear: false,
        }
    }

    /// The prompt for the next line; a pending clear asks for confirmation.
    pub fn prompt(&self) -> &'static str {
        if self.pending_clear { CLEAR_PROMPT } else { PROMPT }
    }

    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    /// Handles one raw input line.
    pub fn handle_line(&mut self, raw: &str, out: &mut impl Write) -> io::Result<Flow> {
        let sanitized = sanitize(raw);
        let line = sanitized.trim();

        if self.pending_clear {
            self.pending_clear = false;
            return self.confirm_clear(line, out);
        }

        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        match Command::parse(line) {
            Command::Quit => {
                writeln!(out, "{}", GOODBYE.bright_green())?;
                return Ok(Flow::Quit);
            }
            Command::Help => view::write_banner(out)?,
            Command::Lane => view::write_lane_tutorial(out)?,
            Command::History => view::write_history(out, self.manager.store().recent(view::HISTORY_LIMIT))?,
            Command::Verify { full } => self.verify(full, out)?,
            Command::Export => self.export(out)?,
            Command::Clear => self.pending_clear = true,
            Command::Turn(text) => self.turn(&text, out)?,
        }
        Ok(Flow::Continue)
    }

    /// Runs the final save.
    pub fn finish(mut self) {
        self.manager.shutdown();
    }

    fn turn(&mut self, text: &str, out: &mut impl Write) -> io::Result<()> {
        let report = self.manager.record_turn(text);
        if let Some(digest) = &report.digest {
            let short = digest.short(self.manager.config().digest_display_length);
            writeln!(out, "{}", format!("[verify] memory_sha256 = {}", short).bright_black())?;
        }
        writeln!(
            out,
            "{}",
            format!("aim[{}]> {}", format_alignment(report.alignment), report.record.reply_text)
                .bright_blue()
        )?;
        writeln!(out)
    }

    fn verify(&self, full: bool, out: &mut impl Write) -> io::Result<()> {
        let digest = self.manager.current_digest();
        let line = if full {
            let value = digest.as_ref().map_or("NA", |d| d.full());
            format!("[verify] full sealed SHA256 (memory.json content) = {}", value)
        } else {
            let length = self.manager.config().digest_display_length;
            let value = digest.as_ref().map_or("NA", |d| d.short(length));
            format!("[verify] memory_sha256 (short) = {}", value)
        };
        writeln!(out, "{}", line.bright_black())
    }

    fn export(&self, out: &mut impl Write) -> io::Result<()> {
        match self.exporter.export(self.manager.store().records()) {
            Ok(path) => writeln!(
                out,
                "{}",
                format!("[export] History written to {}", path.display()).bright_black()
            )?,
            Err(e) => {
                tracing::warn!("Export failed: {}", e);
                writeln!(out, "{}", "[export] Could not write export file.".yellow())?;
            }
        }
        writeln!(out)
    }

    fn confirm_clear(&mut self, answer: &str, out: &mut impl Write) -> io::Result<Flow> {
        if answer.eq_ignore_ascii_case("yes") {
            self.manager.clear();
            writeln!(out, "{}", "[clear] Mini memory erased.".bright_black())?;
        } else {
            writeln!(out, "{}", "[clear] Cancelled; memory preserved.".bright_black())?;
        }
        writeln!(out)?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aim_core::AimConfig;
    use aim_core::reply::KeywordReplies;
    use aim_infrastructure::{AimPaths, JsonMemoryRepository};
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn console(paths: &AimPaths) -> Console {
        colored::control::set_override(false);
        let repo = Arc::new(JsonMemoryRepository::new(paths.memory_file()));
        let (manager, _) = SessionManager::open(repo, Arc::new(KeywordReplies), AimConfig::default());
        Console::new(manager, MarkdownExporter::new(paths.export_file()))
    }

    fn send(console: &mut Console, line: &str) -> (Flow, String) {
        let mut buf = Vec::new();
        let flow = console.handle_line(line, &mut buf).unwrap();
        (flow, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_turn_prints_digest_and_reply() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AimPaths::new(Some(temp_dir.path().to_path_buf()));
        let mut console = console(&paths);

        let (flow, text) = send(&mut console, "hello");

        assert_eq!(flow, Flow::Continue);
        let mut lines = text.lines();
        let verify = lines.next().unwrap();
        assert!(verify.starts_with("[verify] memory_sha256 = "));
        assert_eq!(verify.len(), "[verify] memory_sha256 = ".len() + 12);
        assert!(lines.next().unwrap().starts_with("aim[-0.26]> Thank you for sharing."));
        assert_eq!(console.manager().store().len(), 1);
    }

    #[test]
    fn test_empty_and_control_only_lines_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AimPaths::new(Some(temp_dir.path().to_path_buf()));
        let mut console = console(&paths);

        assert_eq!(send(&mut console, "   "), (Flow::Continue, String::new()));
        assert_eq!(send(&mut console, "\u{7}\u{1b}"), (Flow::Continue, String::new()));
        assert!(console.manager().store().is_empty());
    }

    #[test]
    fn test_quit() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AimPaths::new(Some(temp_dir.path().to_path_buf()));
        let mut console = console(&paths);

        let (flow, text) = send(&mut console, ":QUIT");

        assert_eq!(flow, Flow::Quit);
        assert_eq!(text, format!("{}\n", GOODBYE));
    }

    #[test]
    fn test_verify_before_any_save_is_na() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AimPaths::new(Some(temp_dir.path().to_path_buf()));
        let mut console = console(&paths);

        let (_, short) = send(&mut console, ":verify");
        let (_, full) = send(&mut console, ":verify full");

        assert_eq!(short, "[verify] memory_sha256 (short) = NA\n");
        assert_eq!(full, "[verify] full sealed SHA256 (memory.json content) = NA\n");
    }

    #[test]
    fn test_verify_matches_turn_digest() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AimPaths::new(Some(temp_dir.path().to_path_buf()));
        let mut console = console(&paths);

        let (_, turn) = send(&mut console, "a note for the journal");
        let short = turn.lines().next().unwrap().rsplit(' ').next().unwrap().to_string();
        let (_, verify) = send(&mut console, "verify");
        let (_, full) = send(&mut console, "verify full");

        assert_eq!(verify, format!("[verify] memory_sha256 (short) = {}\n", short));
        let full_hash = full.trim_end().rsplit(' ').next().unwrap();
        assert_eq!(full_hash.len(), 64);
        assert!(full_hash.starts_with(&short));
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AimPaths::new(Some(temp_dir.path().to_path_buf()));
        let mut console = console(&paths);
        send(&mut console, "keep me");

        let (_, text) = send(&mut console, ":clear");
        assert!(text.is_empty());
        assert_eq!(console.prompt(), CLEAR_PROMPT);

        let (_, text) = send(&mut console, "no");
        assert_eq!(text, "[clear] Cancelled; memory preserved.\n\n");
        assert_eq!(console.prompt(), PROMPT);
        assert_eq!(console.manager().store().len(), 1);

        send(&mut console, "clear");
        let (_, text) = send(&mut console, "");
        assert!(text.starts_with("[clear] Cancelled"));
        assert_eq!(console.manager().store().len(), 1);

        send(&mut console, "clear");
        let (_, text) = send(&mut console, "  YES ");
        assert_eq!(text, "[clear] Mini memory erased.\n\n");
        assert!(console.manager().store().is_empty());
        assert_eq!(console.manager().turn_index(), 0);
        assert!(fs::read_to_string(paths.memory_file()).unwrap().contains("\"sessions\": []"));
    }

    #[test]
    fn test_export_writes_markdown() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AimPaths::new(Some(temp_dir.path().to_path_buf()));
        let mut console = console(&paths);
        send(&mut console, "an idea for a project");

        let (_, text) = send(&mut console, ":export");

        assert!(text.starts_with("[export] History written to "));
        let markdown = fs::read_to_string(paths.export_file()).unwrap();
        assert!(markdown.starts_with("# SSM-AIM Mini Export\n\n- Time:  "));
        assert!(markdown.contains("  User:  an idea for a project\n"));
    }

    #[test]
    fn test_export_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AimPaths::new(Some(temp_dir.path().to_path_buf()));
        fs::create_dir(paths.export_file()).unwrap();
        let mut console = console(&paths);

        let (flow, text) = send(&mut console, "export");

        assert_eq!(flow, Flow::Continue);
        assert_eq!(text, "[export] Could not write export file.\n\n");
    }

    #[test]
    fn test_history_lists_turns() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AimPaths::new(Some(temp_dir.path().to_path_buf()));
        let mut console = console(&paths);

        let (_, empty) = send(&mut console, ":history");
        assert!(empty.contains("No previous sessions stored yet."));

        send(&mut console, "first message");
        let (_, text) = send(&mut console, ":history");
        assert!(text.contains("User:    first message\n"));
    }

    #[test]
    fn test_history_shows_last_ten() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AimPaths::new(Some(temp_dir.path().to_path_buf()));
        let mut console = console(&paths);
        for n in 0..12 {
            send(&mut console, &format!("message {}", n));
        }

        let (_, text) = send(&mut console, "history");

        assert_eq!(text.matches("User:    ").count(), 10);
        assert!(!text.contains("User:    message 1\n"));
        assert!(text.contains("User:    message 2\n"));
        assert!(text.contains("User:    message 11\n"));
    }

    #[test]
    fn test_finish_saves_memory() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AimPaths::new(Some(temp_dir.path().to_path_buf()));
        let console = console(&paths);

        console.finish();

        assert!(paths.memory_file().exists());
    }
}
