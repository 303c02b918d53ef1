/// Shared utilities used across all layers
pub mod error;
pub mod result;
pub mod security;

pub use error::{DvmError, ExitCode};
pub use result::Result;
