//! fade-protocol
//!
//! Wire-level encoding/decoding for the game server.
//!
//! This crate is responsible for turning logical lobby messages
//! (`fade_core::InputMessage` / `OutputMessage`) into JSON text frames
//! and back again. Every frame is an object with a `type` discriminator.
//!
//! - [`wire_types`] : the serde-facing frame shapes
//! - [`json_codec`] : conversions and encode/decode entry points

pub mod wire_types;
pub mod json_codec;

pub use json_codec::{
    ProtocolError,
    decode_input,
    encode_input,
    decode_output,
    encode_output,
};
