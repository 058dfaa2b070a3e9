//! Shared test utilities for the backend test suites: unique test data
//! generation and idempotent logging initialization.

pub mod logging;
pub mod test_keys;
pub mod unique_helpers;
