//! End-to-end tests for the Keel loan contracts. The suites live under
//! `tests/`; shared fixtures are in `tests/helpers.rs`.
