//! Crane Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Crane
//! project scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            crane-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, TemplateRenderer)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, VersionControl, Installer) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     crane-adapters (Infrastructure)     │
//! │   (LocalFilesystem, GitCli, etc)        │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Manifest, Curation, RenderPlan, Kinds) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crane_core::prelude::*;
//!
//! let service = ScaffoldService::new(filesystem, vcs, installer)
//!     .with_curation(Curation::new(
//!         DependencyCatalog::builtin(),
//!         pool,
//!         MissingVersionPolicy::Omit,
//!     ));
//!
//! let request = ScaffoldRequest::new("templates", ProjectKind::Lib, "./my-lib")
//!     .with_package_name(PackageName::new("my-lib")?);
//! service.scaffold(&request)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Curation, ScaffoldRequest, ScaffoldService,
        ports::{Filesystem, PackageInstaller, VersionControl},
    };
    pub use crate::domain::{
        AddOn, DependencyCatalog, DependencyPool, ExistingMode, Manifest, MissingVersionPolicy,
        PackageManager, PackageName, ProjectKind, ReadmeSpec, RenderAction, RenderPlan,
        TemplateId,
    };
    pub use crate::error::{CraneError, CraneResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
