//! Network support.
//!
//! Protocol constants of the supported networks and the peer to peer
//! messages this library consumes.

pub mod constants;
pub mod message_sml;
