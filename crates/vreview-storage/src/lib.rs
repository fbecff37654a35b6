//! Local storage for the review tool.
//!
//! This crate provides:
//! - Per-video review log documents (JSON on disk) with default-merge loads
//! - Atomic whole-document saves
//! - The video catalog listing joined with review status

pub mod catalog;
pub mod error;
pub mod log_store;

pub use catalog::{VideoCatalog, MEDIA_EXTENSION};
pub use error::{LogLoadError, StorageError, StorageResult};
pub use log_store::LogStore;
