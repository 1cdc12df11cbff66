//! Shared model for phasecall: configuration, path-like values, typed
//! command lines and the filesystem seam used when a stage has to write a
//! derived file.

pub mod command;
pub mod config;
pub mod error;
pub mod fs;
pub mod path;
pub mod scratch;
pub mod technology;

pub use command::{ArgBuilder, Command, Fragment, ShellLine, ToArg};
pub use config::{ConfigError, PipelineConfig};
pub use error::CommandError;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use path::{resolve_path, MaterializedFile, NamedResource, PathLike};
pub use scratch::ScratchScope;
pub use technology::Technology;
