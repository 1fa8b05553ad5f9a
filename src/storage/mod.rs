pub mod memory;

pub use memory::ReviewStore;
