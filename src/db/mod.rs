pub mod log;
pub mod memory;
pub mod migrate;
pub mod sqlite;
pub mod store;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{SessionStore, StoreError, StoreResult, WorkerRegistry};
