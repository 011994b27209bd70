//! Record storage: an in-memory table for lookups and a folder of encoded
//! files for persistence.

mod fs;
mod memory;

pub use fs::{FileStore, page_file_name};
pub use memory::MemoryStore;
