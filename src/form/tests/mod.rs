//! Tests for multipart form rendering

pub mod builder_tests;

/// Boundary id used by all form tests
pub const TEST_BOUNDARY: &str = "AbC123xyz";
