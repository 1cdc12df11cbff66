//! Per-invocation naming for files materialized under the scratch directory.

use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Scratch directory plus a tag that keeps one invocation's files apart from
/// another's when both share the same base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchScope {
    base: PathBuf,
    tag: String,
}

impl ScratchScope {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            tag: Uuid::new_v4().simple().to_string(),
        }
    }

    pub fn with_tag(base: impl Into<PathBuf>, tag: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            tag: tag.into(),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// `<base>/<stem>.<tag>.<ext>`
    pub fn path(&self, stem: &str, ext: &str) -> PathBuf {
        self.base.join(format!("{}.{}.{}", stem, self.tag, ext))
    }
}
