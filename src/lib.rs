//! NAS Cinema - Movie browsing and streaming gateway for NAS web interfaces
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod nas;
pub mod server;
pub mod streaming;
