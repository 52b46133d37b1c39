//! Core types and configuration for golambda.
//!
//! This crate defines the `golambda.toml` schema ([`GolambdaConfig`]),
//! the per-run [`BuildRequest`], function source inspection
//! ([`FunctionSource`]), and shared error types.

pub mod config;
pub mod error;
pub mod request;
pub mod source;

pub use config::{GolambdaConfig, PackageConfig, TargetConfig, ToolchainConfig};
pub use error::{Error, Result};
pub use request::BuildRequest;
pub use source::FunctionSource;
