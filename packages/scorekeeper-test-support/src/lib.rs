//! Scorekeeper test support utilities
//!
//! Shared helpers for the scorekeeper test suites. Currently this is the
//! unified logging initializer used by integration test binaries.

pub mod test_logging;
