//! Infrastructure adapters for Crane.
//!
//! This crate implements the ports defined in `crane-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod process;
pub mod template_root;
pub mod versions;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{CommandInstaller, GitCli};
