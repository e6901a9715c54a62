//! Test utilities
//!
//! Hand-written stub implementations of the port traits, fixtures, and
//! loopback servers, shared with the service crates' tests through the
//! `test-support` feature.

pub mod fixtures;
pub mod mocks;
pub mod server;

pub use fixtures::*;
pub use mocks::*;
pub use server::*;
