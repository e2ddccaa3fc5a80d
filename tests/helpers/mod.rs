//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod diagnostic_helpers;
pub mod source_fixtures;
pub mod table_helpers;
