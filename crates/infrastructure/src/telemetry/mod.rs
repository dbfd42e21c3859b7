//! Logging initialisation
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` (from `RUST_LOG`,
//! falling back to the configured filter) and a text or JSON formatter.

mod logging;

pub use logging::{LoggingError, build_filter, init_logging};
