//! Single test binary entry point.
//!
//! This consolidates all tests into a single binary following matklad's best practices,
//! reducing linking overhead from 3x to 1x.
//!
//! Structure:
//! - helpers: recording presenter and event builders
//! - unit: single-component tests
//! - integration: full-dispatcher gesture workflows

mod helpers;
