//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `crane-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: template reads and destination writes
//!   - `VersionControl`: `git init`
//!   - `PackageInstaller`: dependency install and update
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, PackageInstaller, VersionControl};

#[cfg(test)]
pub use output::{MockFilesystem, MockPackageInstaller, MockVersionControl};
