mod inmemory_store;
mod json_file_store;
mod store;

pub use inmemory_store::InMemoryDocumentStore;
pub use json_file_store::JsonFileStore;
pub use store::{load_or_reset, IDocumentStore, StoreError};
