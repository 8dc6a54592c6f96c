//! Internal test modules - whitebox tests with crate access
//!
//! Harness-driven acceptance tests: keys in, rendered screen and session
//! state out.
