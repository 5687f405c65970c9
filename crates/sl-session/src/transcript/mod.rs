//! The append-only transcript of scene events.

pub mod entry;
pub mod log;

pub use entry::{TranscriptEntry, TranscriptEvent};
pub use log::Transcript;
