//! FileSystem abstraction so index reads and scratch writes can be tested in memory

mod mock;
mod real;
mod r#trait;

pub use mock::MockFileSystem;
pub use r#trait::FileSystem;
pub use real::RealFileSystem;
