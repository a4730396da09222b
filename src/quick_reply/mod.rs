//! Quick replies: fixed-text canned responses with usage tracking.

mod store;
mod types;

pub use store::{
    create_quick_reply_store, QuickReplyStore, DEFAULT_POPULAR_LIMIT, QUICK_REPLIES_DOCUMENT,
};
pub use types::{
    CreateQuickReplyRequest, QuickReply, QuickReplyListResponse, UpdateQuickReplyRequest,
};
