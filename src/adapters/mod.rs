// Adapters layer: concrete implementations of the domain ports (HTTP transport, key-value storage).

pub mod http;
pub mod storage;

pub use http::HttpTransport;
pub use storage::{FileStore, MemoryStore};
