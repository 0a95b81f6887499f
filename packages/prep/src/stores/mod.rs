//! Storage implementations.

pub mod dir;
pub mod memory;

pub use dir::DirStore;
pub use memory::MemoryStore;
