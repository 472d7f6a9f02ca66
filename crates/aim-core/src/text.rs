//! Input cleaning applied before text reaches the alignment lane or the store.

use unicode_general_category::{GeneralCategory, get_general_category};
use unicode_normalization::UnicodeNormalization;

/// Maximum number of chars kept from a single input line.
pub const MAX_INPUT_CHARS: usize = 4000;

/// Normalizes, filters, and truncates raw console input.
///
/// - NFC normalization
/// - drops non-printable chars, keeping `\n`, `\t` and space
/// - truncates to [`MAX_INPUT_CHARS`] chars
///
/// Surrounding whitespace is left alone; the console trims afterwards.
pub fn sanitize(text: &str) -> String {
    text.nfc()
        .filter(|&ch| is_printable(ch) || matches!(ch, '\n' | '\t' | ' '))
        .take(MAX_INPUT_CHARS)
        .collect()
}

/// Printable in the usual sense: every general category except control,
/// format, surrogate, private use, unassigned and separators, with the
/// ASCII space as the one allowed separator.
fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }
    !matches!(
        get_general_category(ch),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::SpaceSeparator
    )
}
