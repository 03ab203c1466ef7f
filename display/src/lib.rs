//! Keyboard-driven controller for the transit display pages.
//!
//! Everything except [`browser`] is platform neutral and runs natively, which
//! is how the test suite and the terminal remote use it.

pub mod api;
pub mod client;
pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod lines;
pub mod notice;
pub mod shortcuts;
pub mod timing;
pub mod transition;

#[cfg(target_arch = "wasm32")]
pub mod browser;
