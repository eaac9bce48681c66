//! Network layer: the slide-generation HTTP client and the WebSocket chat
//! transport.
//!
//! Browser I/O (gloo-net) lives behind the `browser` feature; the state
//! handling around it is transport-independent and tested natively.

pub mod api;
pub mod socket;
