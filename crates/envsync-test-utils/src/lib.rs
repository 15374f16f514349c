//! Shared test utilities for the envsync workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`project`]: [`project::TestProject`] builder for env files and config

pub mod project;

pub use project::TestProject;
