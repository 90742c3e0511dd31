//! Common test utilities and helpers
//!
//! - An in-memory `TestApp` wrapping the real router
//! - Multipart and JSON request builders, user fixtures
//! - Envelope and cookie assertions

#![allow(dead_code)]

pub mod app;
pub mod assertions;
pub mod auth_helpers;

pub use app::*;
pub use assertions::*;
pub use auth_helpers::*;
