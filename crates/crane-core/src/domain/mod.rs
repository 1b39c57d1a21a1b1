// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Crane.
//!
//! Pure logic only. Reading templates, writing the destination, spawning
//! `git` or a package manager all go through ports defined in the
//! application layer.
//!
//! ## Contents
//!
//! - **manifest**: the package manifest document, merging and group sorting
//! - **curation**: dependency pool, per-template wanted sets, selection
//! - **plan**: render actions computed before anything is written
//! - **readme**: generated `README.md`
//! - **value_objects**: project kinds, add-ons, package managers and names
//!
pub mod curation;
pub mod error;
pub mod manifest;
pub mod plan;
pub mod readme;
pub mod value_objects;

pub use curation::{
    DependencyCatalog, DependencyPool, MissingVersionPolicy, TemplateDependencySet, curate, select,
};
pub use error::{DomainError, ErrorCategory};
pub use manifest::{Manifest, ManifestGroup, merge, sort_groups};
pub use plan::{PlanSummary, RenderAction, RenderPlan};
pub use readme::{ReadmeSpec, generate_readme};
pub use value_objects::{
    AddOn, ExistingMode, MEMBER_STRIPPED_FILE, PackageManager, PackageName, ProjectKind,
    RepositoryType, TemplateId,
};
