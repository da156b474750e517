//! Discovery transport (WebSocket + one-shot HTTP).
//!
//! Frames are decoded once in `codec` and handed to the access broker queue.

pub mod codec;
pub mod http;
pub mod ws;
