//! Path-like values: a plain path or a handle that knows its own name.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Anything that stands in for a file on disk and can report where it lives.
pub trait NamedResource: fmt::Debug + Send + Sync {
    fn name(&self) -> &Path;
}

#[derive(Debug, Clone)]
pub enum PathLike {
    Plain(PathBuf),
    Handle(Arc<dyn NamedResource>),
}

impl PathLike {
    pub fn handle(resource: impl NamedResource + 'static) -> Self {
        PathLike::Handle(Arc::new(resource))
    }

    /// Returns the handle's name if this is a handle, otherwise the plain path.
    pub fn resolve(&self) -> &Path {
        match self {
            PathLike::Plain(path) => path,
            PathLike::Handle(resource) => resource.name(),
        }
    }

    pub fn display(&self) -> std::path::Display<'_> {
        self.resolve().display()
    }

    pub fn is_handle(&self) -> bool {
        matches!(self, PathLike::Handle(_))
    }
}

pub fn resolve_path(value: &PathLike) -> &Path {
    value.resolve()
}

impl PartialEq for PathLike {
    fn eq(&self, other: &Self) -> bool {
        self.resolve() == other.resolve()
    }
}

impl Eq for PathLike {}

impl From<PathBuf> for PathLike {
    fn from(path: PathBuf) -> Self {
        PathLike::Plain(path)
    }
}

impl From<&Path> for PathLike {
    fn from(path: &Path) -> Self {
        PathLike::Plain(path.to_path_buf())
    }
}

impl From<&str> for PathLike {
    fn from(path: &str) -> Self {
        PathLike::Plain(PathBuf::from(path))
    }
}

impl From<String> for PathLike {
    fn from(path: String) -> Self {
        PathLike::Plain(PathBuf::from(path))
    }
}

impl From<MaterializedFile> for PathLike {
    fn from(file: MaterializedFile) -> Self {
        PathLike::handle(file)
    }
}

impl Serialize for PathLike {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.resolve().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PathLike {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        PathBuf::deserialize(deserializer).map(PathLike::Plain)
    }
}

/// A file this crate wrote to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedFile {
    path: PathBuf,
}

impl MaterializedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NamedResource for MaterializedFile {
    fn name(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_resolves_to_itself() {
        let value = PathLike::from("ref.fasta");
        assert_eq!(value.resolve(), Path::new("ref.fasta"));
        assert!(!value.is_handle());
    }

    #[test]
    fn test_handle_resolves_to_name() {
        let value = PathLike::from(MaterializedFile::new("/tmp/run/reference.bed"));
        assert!(value.is_handle());
        assert_eq!(resolve_path(&value), Path::new("/tmp/run/reference.bed"));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let value = PathLike::from(MaterializedFile::new("regions.bed"));
        let once = PathLike::from(value.resolve());
        assert_eq!(once.resolve(), value.resolve());
        assert_eq!(once, value);
    }

    #[test]
    fn test_serde_uses_resolved_path() {
        let value = PathLike::from(MaterializedFile::new("a/b.bed"));
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"a/b.bed\"");

        let parsed: PathLike = serde_json::from_str("\"sample.bam\"").unwrap();
        assert_eq!(parsed, PathLike::from("sample.bam"));
    }
}
