//! Scriba Database Layer
//!
//! This crate provides the upload record repository and the store trait the
//! pipeline depends on for persistence.

pub mod store;
pub mod upload;

pub use store::UploadStore;
pub use upload::UploadRepository;
