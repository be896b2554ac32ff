//! Query execution backends
//!
//! [`QueryExecutor`] is the seam to the persistence engine. The crate ships
//! [`MemoryExecutor`] for tests and embedding.

pub mod core;
pub mod memory;

pub use self::core::*;
pub use memory::MemoryExecutor;
