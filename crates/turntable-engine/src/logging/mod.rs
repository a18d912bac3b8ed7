//! Logger initialization for binaries built on the engine.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
