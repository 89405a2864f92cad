//! Sender and media detection for entry bodies.
//!
//! Everything after the timestamp separator is either `Name: text` or a
//! system notification with no author. There is no authoritative rule that
//! tells the two apart across export variants; the heuristic is:
//!
//! - split on the *first* `": "` only, so bodies may contain colons;
//! - the candidate name must be non-blank and must not span lines.
//!
//! Known false positives: a system line that itself contains `": "` on its
//! first line (for example `Alice changed the subject to: "Trip: day 2"`) is
//! attributed to a sender named `Alice changed the subject to`. The rate is
//! low in practice (subject/description changes only) and is left visible
//! rather than patched with locale-specific phrase lists.

/// Default placeholder written by the exporter instead of attachments.
pub const DEFAULT_MEDIA_MARKER: &str = "<Media omitted>";

const SENDER_SEPARATOR: &str = ": ";

/// Splits an entry body into `(sender, text)`.
///
/// Returns `None` as the sender for system notifications, in which case the
/// text is the whole body.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::split_sender;
///
/// assert_eq!(split_sender("Alice: see: this"), (Some("Alice"), "see: this"));
/// assert_eq!(split_sender("Bob left"), (None, "Bob left"));
/// ```
pub fn split_sender(segment: &str) -> (Option<&str>, &str) {
    let Some(idx) = segment.find(SENDER_SEPARATOR) else {
        return (None, segment);
    };

    let name = segment[..idx].trim();
    if name.is_empty() || name.contains('\n') {
        return (None, segment);
    }

    (Some(name), &segment[idx + SENDER_SEPARATOR.len()..])
}

/// Strips the line break(s) that separate an entry from the next timestamp.
pub fn trim_entry_end(body: &str) -> &str {
    body.trim_end_matches(['\r', '\n'])
}

/// Returns `true` if the body carries the media placeholder.
pub fn is_media(body: &str, marker: &str) -> bool {
    !marker.is_empty() && body.contains(marker)
}
