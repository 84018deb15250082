//! Core data structures for chat transcripts.
//!
//! A transcript is an append-only, ordered sequence of messages. Messages
//! are produced by the import layer and never mutated afterwards; the view
//! layer only selects and slices them.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single chat message.
///
/// The `index` field is the message's stable position in the full
/// transcript and serves as its identity key. Unknown fields from the
/// source file are preserved for lossless round-trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Stable position in the full transcript (identity key).
    #[serde(default)]
    pub index: usize,

    /// Message author. May be absent for system lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// When the message was sent.
    pub timestamp: DateTime<Utc>,

    /// Message body. Opaque to the view layer.
    #[serde(default)]
    pub content: String,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Message {
    /// Get the author, or an empty string when absent.
    #[must_use]
    pub fn author_or_empty(&self) -> &str {
        self.author.as_deref().unwrap_or("")
    }

    /// Check whether this message shares an author with another.
    #[must_use]
    pub fn same_author(&self, other: &Self) -> bool {
        self.author_or_empty() == other.author_or_empty()
    }
}

/// An ordered collection of messages.
///
/// Insertion order equals chronological/index order; the collection is
/// never reordered.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create a transcript from already-ordered messages, assigning
    /// indices from position.
    #[must_use]
    pub fn from_messages(mut messages: Vec<Message>) -> Self {
        for (i, message) in messages.iter_mut().enumerate() {
            message.index = i;
        }
        Self { messages }
    }

    /// All messages in transcript order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check whether the transcript is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Unique authors in first-seen order.
    ///
    /// Used by the presentation layer to derive a stable color mapping.
    /// Messages without an author are skipped.
    #[must_use]
    pub fn participants(&self) -> Vec<String> {
        let mut seen: IndexMap<&str, ()> = IndexMap::new();
        for message in &self.messages {
            if let Some(author) = message.author.as_deref() {
                if !author.is_empty() {
                    seen.entry(author).or_insert(());
                }
            }
        }
        seen.keys().map(|a| (*a).to_string()).collect()
    }

    /// Timestamp of the first message, if any.
    #[must_use]
    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.messages.first().map(|m| m.timestamp)
    }

    /// Timestamp of the last message, if any.
    #[must_use]
    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.messages.last().map(|m| m.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn message(author: &str, secs: i64) -> Message {
        Message {
            index: 0,
            author: if author.is_empty() {
                None
            } else {
                Some(author.to_string())
            },
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            content: format!("msg at {secs}"),
            extra: IndexMap::new(),
        }
    }

    #[test]
    fn test_indices_assigned_from_position() {
        let transcript = Transcript::from_messages(vec![
            message("alice", 10),
            message("bob", 20),
            message("alice", 30),
        ]);
        let indices: Vec<usize> = transcript.messages().iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_participants_first_seen_order() {
        let transcript = Transcript::from_messages(vec![
            message("bob", 10),
            message("alice", 20),
            message("bob", 30),
            message("", 40),
        ]);
        assert_eq!(transcript.participants(), vec!["bob", "alice"]);
    }

    #[test]
    fn test_empty_transcript() {
        let transcript = Transcript::default();
        assert!(transcript.is_empty());
        assert_eq!(transcript.participants(), Vec::<String>::new());
        assert!(transcript.first_timestamp().is_none());
    }

    #[test]
    fn test_message_roundtrip_preserves_unknown_fields() {
        let raw = r#"{"author":"alice","timestamp":"2024-03-01T12:00:00Z","content":"hi","avatar":"a.png"}"#;
        let message: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(message.author.as_deref(), Some("alice"));
        assert_eq!(
            message.extra.get("avatar").and_then(Value::as_str),
            Some("a.png")
        );

        let out = serde_json::to_string(&message).unwrap();
        assert!(out.contains("avatar"));
    }
}
