pub mod db;
pub mod memory_store;
pub mod mongo_store;
pub mod store;

pub use db::connect_to_mongo;
pub use memory_store::MemoryPostStore;
pub use mongo_store::MongoPostStore;
pub use store::{PostStore, StoreError};
