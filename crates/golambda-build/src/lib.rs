//! Staging, adapter generation, and zip packaging for golambda.
//!
//! # Package pipeline
//!
//! ```text
//! golambda --source hello.go --output hello.zip
//!   1. Stage      ── temp dir named after the source stem
//!   2. Copy       ── hello.go + go.mod / go.sum (when present)
//!   3. Adapter    ── AdapterTemplate::render() → main.go
//!   4. Toolchain  ── go mod init (no go.mod) → go mod tidy → go build
//!   5. Archive    ── ./main → hello.zip (single deflated entry)
//!   6. Cleanup    ── remove ./main, remove staging (always)
//! ```
//!
//! # Adapter contract
//!
//! The function file must be in package `main` and export
//! `func Handler(http.ResponseWriter, *http.Request)`. The generated
//! `main.go` routes API Gateway proxy events to it and adds permissive
//! CORS headers to every response.

pub mod adapter;
pub mod archive;
pub mod packager;
pub mod staging;

pub use adapter::AdapterTemplate;
pub use packager::{PackageError, PackageOutcome, Packager};
