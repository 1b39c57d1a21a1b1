//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a project" or "render a subtree".

pub mod cleaner;
pub mod renderer;
pub mod scaffold_service;

pub use cleaner::DirectoryCleaner;
pub use renderer::{Curation, PendingWrites, TemplateRenderer};
pub use scaffold_service::{ScaffoldRequest, ScaffoldService};
