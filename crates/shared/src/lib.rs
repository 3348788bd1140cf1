//! Shared library for the anime search tool.
//!
//! This crate provides the ambient pieces used by the binary:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;

// Re-export commonly used types
pub use config::Config;
pub use logging::LogConfig;
