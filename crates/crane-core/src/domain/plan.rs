use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{manifest::Manifest, value_objects::TemplateId};

/// Ordered list of filesystem actions for one scaffold.
///
/// Produced by the planning pass without touching the destination. Applying
/// it is the only step that writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderPlan {
    pub(crate) root: PathBuf,
    pub(crate) actions: Vec<RenderAction>,
}

impl RenderPlan {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            actions: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn push(&mut self, action: RenderAction) {
        self.actions.push(action);
    }

    pub fn extend(&mut self, other: RenderPlan) {
        self.actions.extend(other.actions);
    }

    pub fn actions(&self) -> &[RenderAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Paths the plan creates or rewrites, in action order.
    pub fn destinations(&self) -> impl Iterator<Item = &Path> {
        self.actions.iter().map(RenderAction::destination)
    }

    pub fn summary(&self) -> PlanSummary {
        let mut summary = PlanSummary::default();
        for action in &self.actions {
            match action {
                RenderAction::CreateDir { .. } => summary.directories += 1,
                RenderAction::WriteSeedManifest { .. } | RenderAction::Copy { .. } => {
                    summary.files += 1
                }
                RenderAction::MergeManifest { .. } | RenderAction::AppendText { .. } => {
                    summary.merges += 1
                }
                RenderAction::RemoveFileIfExists { .. } => summary.removals += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderAction {
    CreateDir {
        path: PathBuf,
    },
    /// `{name, version}` written before any template subtree.
    WriteSeedManifest {
        destination: PathBuf,
        manifest: Manifest,
    },
    Copy {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Merge `incoming` into the manifest at `destination`, then sort it.
    ///
    /// `incoming` is already curated when `template` is set.
    MergeManifest {
        source: PathBuf,
        destination: PathBuf,
        incoming: Manifest,
        template: Option<TemplateId>,
    },
    /// `existing + "\n" + source`.
    AppendText {
        source: PathBuf,
        destination: PathBuf,
    },
    RemoveFileIfExists {
        path: PathBuf,
    },
}

impl RenderAction {
    pub fn destination(&self) -> &Path {
        match self {
            Self::CreateDir { path } | Self::RemoveFileIfExists { path } => path,
            Self::WriteSeedManifest { destination, .. }
            | Self::Copy { destination, .. }
            | Self::MergeManifest { destination, .. }
            | Self::AppendText { destination, .. } => destination,
        }
    }

    pub const fn verb(&self) -> &'static str {
        match self {
            Self::CreateDir { .. } => "mkdir",
            Self::WriteSeedManifest { .. } => "seed",
            Self::Copy { .. } => "copy",
            Self::MergeManifest { .. } => "merge",
            Self::AppendText { .. } => "append",
            Self::RemoveFileIfExists { .. } => "remove",
        }
    }

    /// Whether this action leaves a file at its destination.
    pub const fn writes_file(&self) -> bool {
        !matches!(self, Self::CreateDir { .. } | Self::RemoveFileIfExists { .. })
    }
}

impl fmt::Display for RenderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<6} {}", self.verb(), self.destination().display())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub directories: usize,
    pub files: usize,
    pub merges: usize,
    pub removals: usize,
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} directories, {} files, {} merges, {} removals",
            self.directories, self.files, self.merges, self.removals
        )
    }
}
