//! Fixed console texts: banner, lane tutorial and history listing.

use aim_core::alignment::format_alignment;
use aim_core::session::InteractionRecord;
use colored::Colorize;
use std::io::{self, Write};

/// Number of records shown by the history command.
pub const HISTORY_LIMIT: usize = 10;

const BANNER: &str = "\
SSM-AIM (Mini Version) - Symbolic Mathematical AI mini console
----------------------------------------------------------
- Fully local, file-based mini personal console
- No internet, no remote calls, no tracking
- One JSON memory file: memory.json

Commands:
  :quit           exit this mini console
  :history        show recent interactions
  :help           show this help again
  :clear          erase local mini memory (with confirmation)
  :verify         show short sealed SHA256 of the memory content
  :verify full    show full sealed SHA256 of the memory content
  :lane           tiny tutorial on the alignment lane
  :export         export full history to a markdown file

Type your message and press Enter to talk to SSM-AIM (Mini).
";

const LANE_TUTORIAL: &str = "\
This mini console keeps a tiny symbolic lane a in (-1,+1) per message.
It is a posture hint, not a sentiment score or judgment.

Roughly, for each message:
  - norm_len = clamp(len(text) / 400, 0, 1)
  - raw starts from norm_len (questions are a bit lower)
  - raw is centered around 0 and a small drift term is added
  - we clamp into a safe range and map with tanh(raw)

So in this demo:
  - a near +1.00 suggests detailed, settled, sustained input,
  - a near -1.00 suggests short, questioning, or unsettled input,
  - values near 0.00 are neutral.
";

pub fn write_banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", BANNER.bright_magenta())
}

pub fn write_lane_tutorial(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "[lane] Mini alignment lane overview:".bright_black())?;
    writeln!(out)?;
    write!(out, "{}", LANE_TUTORIAL)?;
    writeln!(out)?;
    writeln!(out, "It is only a tiny symbolic posture signal for reflection.")?;
    writeln!(out)
}

/// Lists the given records, oldest first.
pub fn write_history(out: &mut impl Write, records: &[InteractionRecord]) -> io::Result<()> {
    if records.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "[history] No previous sessions stored yet.".bright_black())?;
        return writeln!(out);
    }

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        format!("[history] Showing up to last {} entries:", HISTORY_LIMIT).bright_black()
    )?;
    writeln!(out)?;

    for record in records {
        let ts = if record.timestamp.is_empty() {
            "?"
        } else {
            record.timestamp.as_str()
        };
        writeln!(out, "Time:    {}", ts)?;
        writeln!(out, "Align:   {}", format_alignment(record.alignment))?;
        writeln!(out, "User:    {}", record.user_text)?;
        writeln!(out, "SSM-AIM: {}", record.reply_text)?;
        writeln!(out, "{}", "-".repeat(40))?;
    }
    writeln!(out)
}
