//! Filesystem adapters.

mod local;
mod memory;
mod readonly;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
pub use readonly::ReadOnlyFilesystem;
