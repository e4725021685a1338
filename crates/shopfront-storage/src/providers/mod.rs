//! Device storage provider implementations.

pub mod file;
pub mod memory;

pub use file::FileStorageProvider;
pub use memory::MemoryStorageProvider;
