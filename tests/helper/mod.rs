//! Shared test utilities

pub mod foundation;

pub use foundation::{FakeFoundation, into_clients};
