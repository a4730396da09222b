//! WhatsApp message formatting.
//!
//! Pure functions over message text:
//! - inline markdown (`*bold*`, `_italic_`, `~strike~`, `` `code` ``) applied to a selection
//! - HTML preview rendering
//! - validation (length, empty text, unknown mentions, unclosed markers)
//! - mention extraction and whitespace cleanup before sending

mod html;
mod text;
mod types;
mod validate;

pub use html::to_html;
pub use text::{
    add_media_placeholder, apply_shortcut, clean_for_sending, extract_mentions, format_text,
    has_media_placeholder, CHAT_ID_SUFFIX,
};
pub use types::{FormatAction, FormatKind, FormattedMessage, ShortcutResult};
pub use validate::{validate, MAX_MESSAGE_LENGTH};
