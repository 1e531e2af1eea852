//! Appliance Cost Calculator library
//!
//! This module exposes the core functionality for use in tests
//! and as a library.

pub mod catalog;
pub mod core;
pub mod db;
pub mod exchange;
pub mod i18n;
pub mod pricing;
pub mod report;
pub mod session;
