pub use file::FileStorage;
pub use memory::MemoryStorage;

mod entries;
mod file;
mod memory;
