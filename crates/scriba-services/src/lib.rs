//! Scriba Services Layer
//!
//! Clients for remote services. Currently one: the chat-completion API used
//! to condense transcriptions into summaries.

pub mod summarize;

pub use summarize::{
    Summary, SummarizeError, SummarizerConfig, SummarizerService, SUMMARY_UNAVAILABLE,
};
