//! Shared parsing utilities.
//!
//! [`timestamp`] knows how entries start and how to read their timestamps;
//! [`sender`] splits what follows into author and text. The pipeline that
//! strings them together lives in [`crate::parser`].

pub mod sender;
pub mod timestamp;

pub use sender::{DEFAULT_MEDIA_MARKER, is_media, split_sender, trim_entry_end};
pub use timestamp::{TimestampFormat, TimestampPreset, timestamp_text};
