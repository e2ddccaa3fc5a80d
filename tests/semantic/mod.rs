//! Symbol table tests through the public API
//!
//! - Build order independence and incremental building
//! - End-to-end resolution across packages, classes and instances
//! - Golden dumps

pub mod tests_dumps;
pub mod tests_end_to_end;
pub mod tests_order_independence;
