//! Logging setup for carona services.
//!
//! Installs a `tracing` subscriber with either JSON output (production) or
//! pretty output (development), filtered by `RUST_LOG`.

pub mod init;

pub use init::*;
