//! dugout — MLB schedules, live scores, standings, and postseason brackets,
//! served from a tiered freshness cache over the MLB Stats API.
//!
//! The HTTP transport is out of scope; every view here is a plain async
//! function returning serializable data, ready to be wrapped by whatever
//! front-end consumes it.

pub mod cache;
pub mod config;
pub mod error;
pub mod reference;
pub mod service;
