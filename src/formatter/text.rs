//! Selection formatting, mention extraction and outbound text cleanup

use lazy_static::lazy_static;
use regex::Regex;

use super::html::MENTION;
use super::types::{FormatAction, FormatKind, ShortcutResult};

/// Suffix that turns a phone number into a chat identifier
pub const CHAT_ID_SUFFIX: &str = "@c.us";

const MEDIA_PLACEHOLDER: &str = "[📎 Media attached]";
const IMAGE_PLACEHOLDER: &str = "[🖼️ Image attached]";

lazy_static! {
    static ref TRAILING_WHITESPACE: Regex = Regex::new(r"(?m)[ \t]+$").unwrap();
    static ref EXCESS_NEWLINES: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Byte offset of the `index`-th character, or the text length past the end.
fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Wrap the selected characters `start..end` in the marker pair for `kind`.
///
/// Offsets are character indices and are clamped to the text length. An
/// empty selection returns the text unchanged, as does [`FormatKind::Mention`].
pub fn format_text(text: &str, action: FormatAction) -> String {
    let len = text.chars().count();
    let start = action.start.min(len);
    let end = action.end.min(len);

    if start >= end {
        return text.to_string();
    }

    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end);
    let selected = &text[start_byte..end_byte];

    let formatted = match action.kind {
        FormatKind::Bold => format!("*{}*", selected),
        FormatKind::Italic => format!("_{}_", selected),
        FormatKind::Strikethrough => format!("~{}~", selected),
        FormatKind::Code if selected.contains('\n') => format!("```{}```", selected),
        FormatKind::Code => format!("`{}`", selected),
        FormatKind::Mention => return text.to_string(),
    };

    format!("{}{}{}", &text[..start_byte], formatted, &text[end_byte..])
}

/// Apply a formatting shortcut and move the selection end past the inserted
/// markers. The selection start never moves.
///
/// Both offsets are clamped to the text length first, so the returned
/// selection always lies inside `new_text`.
pub fn apply_shortcut(
    text: &str,
    selection_start: usize,
    selection_end: usize,
    kind: FormatKind,
) -> ShortcutResult {
    let len = text.chars().count();
    let start = selection_start.min(len);
    let end = selection_end.min(len);

    let new_text = format_text(text, FormatAction { kind, start, end });
    let added = new_text.chars().count() - len;

    ShortcutResult {
        new_text,
        new_selection_start: start,
        new_selection_end: end + added,
    }
}

/// Every `@<digits>` mention (ASCII digits) as a chat identifier, in order
/// of appearance.
pub fn extract_mentions(text: &str) -> Vec<String> {
    MENTION
        .captures_iter(text)
        .map(|caps| format!("{}{}", &caps[1], CHAT_ID_SUFFIX))
        .collect()
}

/// Normalise whitespace before sending.
///
/// Strips trailing spaces and tabs from each line, collapses runs of three or
/// more newlines to two and trims the result. Idempotent.
pub fn clean_for_sending(text: &str) -> String {
    let text = TRAILING_WHITESPACE.replace_all(text, "");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

pub fn has_media_placeholder(text: &str) -> bool {
    text.contains(MEDIA_PLACEHOLDER) || text.contains(IMAGE_PLACEHOLDER)
}

/// Append the attachment placeholder for `mime_type` after a blank line.
pub fn add_media_placeholder(text: &str, mime_type: &str) -> String {
    let placeholder = if mime_type.starts_with("image/") {
        IMAGE_PLACEHOLDER
    } else {
        MEDIA_PLACEHOLDER
    };

    if text.is_empty() {
        placeholder.to_string()
    } else {
        format!("{}\n\n{}", text, placeholder)
    }
}
