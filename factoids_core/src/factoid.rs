use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recalled "subject verb predicate" statement scoped to a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factoid {
    pub id: i32,
    pub scope_id: i64,
    pub subject: String,
    pub verb: String,
    pub predicate: String,
    pub author_id: i64,
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Factoid {
    /// A factoid without a tombstone.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

impl fmt::Display for Factoid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ id = {}, chat_id = {} , subject = \"{}\", verb = \"{}\" , predicate = \"{}\" }}",
            self.id, self.scope_id, self.subject, self.verb, self.predicate
        )
    }
}

/// Write request for a factoid.
///
/// With `id` set the store overwrites that row, otherwise it inserts a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoidUpsert {
    pub id: Option<i32>,
    pub scope_id: i64,
    pub subject: String,
    pub verb: String,
    pub predicate: String,
    pub author_id: i64,
    pub author_name: Option<String>,
    pub at: DateTime<Utc>,
}

/// A text message as delivered by the chat transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub scope_id: i64,
    pub sender_id: i64,
    pub sender_name: Option<String>,
    pub text: String,
}

/// Lookup key for a subject.
#[must_use]
pub fn subject_key(subject: &str) -> String {
    subject.trim().to_lowercase()
}

/// Picks the record a lookup should return among rows sharing a subject key:
/// the live one if any, otherwise the newest tombstone.
pub fn select_current(candidates: impl IntoIterator<Item = Factoid>) -> Option<Factoid> {
    candidates
        .into_iter()
        .max_by_key(|factoid| (factoid.is_live(), factoid.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factoid(id: i32, deleted: bool) -> Factoid {
        let now = Utc::now();
        Factoid {
            id,
            scope_id: -100,
            subject: "el gato".to_string(),
            verb: "es".to_string(),
            predicate: "gracioso".to_string(),
            author_id: 7,
            author_name: None,
            created_at: now,
            modified_at: now,
            deleted_at: deleted.then_some(now),
        }
    }

    #[test]
    fn subject_key_folds_case() {
        assert_eq!(subject_key("  Gato "), "gato");
        assert_eq!(subject_key("ÉRAMOS"), "éramos");
    }

    #[test]
    fn live_record_wins_over_newer_tombstone() {
        let picked = select_current(vec![factoid(1, false), factoid(2, true)]);
        assert_eq!(picked.map(|f| f.id), Some(1));
    }

    #[test]
    fn newest_tombstone_when_nothing_live() {
        let picked = select_current(vec![factoid(3, true), factoid(5, true), factoid(4, true)]);
        assert_eq!(picked.map(|f| f.id), Some(5));
        assert!(select_current(Vec::new()).is_none());
    }

    #[test]
    fn display_matches_audit_format() {
        assert_eq!(
            factoid(7, false).to_string(),
            "{ id = 7, chat_id = -100 , subject = \"el gato\", verb = \"es\" , predicate = \"gracioso\" }"
        );
    }
}
