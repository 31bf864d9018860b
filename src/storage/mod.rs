//! Storage implementations for records

pub mod in_memory;

pub use in_memory::InMemoryRecordStore;
