pub mod client;
pub mod error;
pub mod executor;

pub use client::{GoToolchain, StepError, ToolchainStep};
pub use error::ToolchainError;
pub use executor::{CommandOutput, Invocation, RealExecutor, ToolchainExecutor};
