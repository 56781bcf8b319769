//! Transient widgets drawn alongside the transcript.

pub mod thinking;

pub use thinking::ThinkingIndicator;
