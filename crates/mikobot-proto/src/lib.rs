//! Wire-protocol model for mikobot.
//!
//! This crate owns the textual IRC layer, independent of any transport:
//! - Message parsing and rendering (`message`)
//! - ISUPPORT capability accumulation (`isupport`)
//! - CTCP framing for emote detection (`ctcp`)

pub mod ctcp;
pub mod isupport;
pub mod message;

pub use isupport::Isupport;
pub use message::{Message, ParseError, ParseResult, Source, MAX_LINE_LEN};
