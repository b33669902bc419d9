/* src/source/mod.rs */

mod chain;
mod memory;
mod resource;

pub use chain::ChainSource;
pub use memory::MemorySource;
pub use resource::{Resource, ResourceCatalog, ResourceOptions, ResourceSource, StaticCatalog};

#[cfg(feature = "fs")]
mod file;
#[cfg(feature = "fs")]
pub use chain::FileAndResourceOptions;
#[cfg(feature = "fs")]
pub use file::{FileOptions, FileSource, IndexPolicy};
