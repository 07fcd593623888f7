//! Data models for the application
//!
//! One domain here: uploaded media records and their HTTP response shapes.

mod upload;

// Re-export all models for convenient imports
pub use upload::*;
