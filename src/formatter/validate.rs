//! Structural validation of outgoing messages

use super::html::{to_html, MENTION};
use super::types::FormattedMessage;

/// Maximum message length in characters
pub const MAX_MESSAGE_LENGTH: usize = 4096;

const MARKERS: &[(char, &str)] = &[
    ('*', "bold"),
    ('_', "italic"),
    ('~', "strikethrough"),
    ('`', "code"),
];

/// Validate a message and render its preview.
///
/// Reported problems, in order: length over [`MAX_MESSAGE_LENGTH`], empty
/// text, mentions missing from `known_mentions` (only checked when the list
/// is non-empty), and unclosed formatting markers.
///
/// A mention is accepted when its digits appear anywhere inside some known
/// entry, so `@123` matches `49123@c.us`. Unclosed formatting is a parity
/// check on each marker character: an odd count is reported even when a
/// reader would see the stray marker as plain text (e.g. `2 * 3 = *6*`).
pub fn validate(text: &str, known_mentions: Option<&[String]>) -> FormattedMessage {
    let mut errors = Vec::new();
    let character_count = text.chars().count();

    if character_count > MAX_MESSAGE_LENGTH {
        errors.push(format!(
            "Message exceeds maximum length of {} characters",
            MAX_MESSAGE_LENGTH
        ));
    }

    if character_count == 0 {
        errors.push("Message cannot be empty".to_string());
    }

    if let Some(known) = known_mentions.filter(|k| !k.is_empty()) {
        for caps in MENTION.captures_iter(text) {
            let number = &caps[1];
            if !known.iter().any(|mention| mention.contains(number)) {
                errors.push(format!("Mention @{} is not in the contact list", number));
            }
        }
    }

    for (marker, label) in MARKERS {
        let count = text.chars().filter(|c| c == marker).count();
        if count % 2 != 0 {
            errors.push(format!("Unclosed {} formatting ({})", label, marker));
        }
    }

    FormattedMessage {
        text: text.to_string(),
        preview: to_html(text),
        is_valid: errors.is_empty(),
        character_count,
        errors,
    }
}
