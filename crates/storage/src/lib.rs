//! Storage layer for the mobile starter
//!
//! This crate provides the secure key-value store and the schema of
//! the settings persisted in it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app_state;
pub mod kv;

pub use app_state::{keys, ColorMode, UnknownColorMode};
pub use kv::{validate_key, DeviceStore, KvConfig, KvError, KvStore, SecureStore};
