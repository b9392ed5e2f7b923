// Storage module.
// Key layout and the store port behind the registry and the response cache.

pub mod fs;
#[cfg(test)]
pub mod memory;
pub mod paths;

pub use fs::{FileMode, FsStore, Store, read_json, write_json};
#[cfg(test)]
pub use memory::MemoryStore;
