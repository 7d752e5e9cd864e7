//! Storage helpers for the file-backed document store.

pub mod json_map_store;
