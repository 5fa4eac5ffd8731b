//! Adapters for the Record Store outbound port.
//!
//! - `json_file`: one JSON document per table inside a data directory
//! - `memory`: in-process documents with failure injection
//! - `lock`: exclusive process lock on the data directory

pub mod json_file;
#[cfg(feature = "locking")]
pub mod lock;
pub mod memory;

pub use json_file::JsonFileDocuments;
#[cfg(feature = "locking")]
pub use lock::DataDirLock;
pub use memory::InMemoryDocuments;
