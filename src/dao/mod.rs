/// Key-value stores holding the serialized collections.
pub mod kv_store;
/// Persisted model definitions.
pub mod models;
/// Storage abstraction layer errors.
pub mod storage;
