//! Remote library module.
//!
//! Exposes the terminal session so the binary and the integration tests
//! drive the same code.

pub mod session;
