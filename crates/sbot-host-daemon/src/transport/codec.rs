//! Decode-once codec for discovery frames.
//!
//! - Text frames => `AccessRequest`
//! - Binary frames are not part of the discovery protocol
//! - Ping/Pong/Close are surfaced for lifecycle management

use axum::extract::ws::Message;
use sbot_host_core::{
    error::{Result, HostError},
    protocol::{decode_request, AccessRequest},
};

#[derive(Debug)]
pub enum Inbound {
    Request(AccessRequest),
    Ping(Vec<u8>),
    Pong,
    Close,
}

/// Frame size without decoding, for the length check.
pub fn frame_len(msg: &Message) -> usize {
    match msg {
        Message::Text(s) => s.len(),
        Message::Binary(b) => b.len(),
        Message::Ping(v) => v.len(),
        Message::Pong(v) => v.len(),
        Message::Close(_) => 0,
    }
}

pub fn decode(msg: Message) -> Result<Inbound> {
    match msg {
        Message::Text(s) => Ok(Inbound::Request(decode_request(&s)?)),
        Message::Binary(_) => Err(HostError::BadRequest("binary frames are not supported".into())),
        Message::Ping(v) => Ok(Inbound::Ping(v)),
        Message::Pong(_) => Ok(Inbound::Pong),
        Message::Close(_) => Ok(Inbound::Close),
    }
}
