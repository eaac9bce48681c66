//! Shared client-side state models.
//!
//! DESIGN
//! ======
//! State is split by domain (`slides`, `connection`) so consumers can
//! depend on small focused models. Each model is published through a
//! `store::Subject` rather than a framework signal.

pub mod connection;
pub mod slides;
