//! Shared test helpers for `roomkeeper-core` integration tests.
//!
//! These helpers provide in-memory mocks for the core ports and a few
//! fixtures so the tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod clock;
pub mod fixtures;
pub mod repositories;
