//! Conversation entity: the unique container for all messages exchanged
//! between two users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Orders two user ids into the canonical (low, high) pair key
///
/// The unordered pair {a, b} always stores as (min, max), which makes it
/// uniquely indexable regardless of who messaged first.
pub fn canonical_pair(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A direct conversation between exactly two users
///
/// Exactly one row exists per unordered user pair, enforced by canonical
/// ordering at write time plus a storage-level uniqueness constraint on
/// (participant_low, participant_high). Created lazily on first message,
/// never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique identifier for the conversation
    pub id: Uuid,

    /// Smaller participant id of the canonical pair
    pub participant_low: Uuid,

    /// Larger participant id of the canonical pair
    pub participant_high: Uuid,

    /// Denormalized pointer at the most recent message, if any
    pub last_message_id: Option<Uuid>,

    /// Timestamp when the conversation was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last message append (or creation)
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Creates a new conversation between two users
    ///
    /// The participant order given by the caller does not matter; the pair
    /// is canonicalized here.
    pub fn new(user_a: Uuid, user_b: Uuid) -> Self {
        let (participant_low, participant_high) = canonical_pair(user_a, user_b);
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            participant_low,
            participant_high,
            last_message_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks whether a user is one of the two participants
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.participant_low == user_id || self.participant_high == user_id
    }

    /// The participant other than `user_id`, if `user_id` is a participant
    pub fn other_participant(&self, user_id: Uuid) -> Option<Uuid> {
        if user_id == self.participant_low {
            Some(self.participant_high)
        } else if user_id == self.participant_high {
            Some(self.participant_low)
        } else {
            None
        }
    }

    /// Points the denormalized caches at a freshly appended message
    pub fn touch(&mut self, message_id: Uuid, sent_at: DateTime<Utc>) {
        self.last_message_id = Some(message_id);
        self.updated_at = sent_at;
    }
}

/// One row of the conversation list: the conversation seen from one
/// participant's side, with the denormalized fields a list view needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// The conversation
    pub conversation_id: Uuid,

    /// The other participant
    pub other_user_id: Uuid,

    /// The other participant's display name
    pub other_full_name: String,

    /// Whether the other participant currently has an open session
    pub other_is_online: bool,

    /// Content of the most recent message; empty string when none was sent
    pub last_message: String,

    /// When the most recent message was sent, if any
    pub last_message_at: Option<DateTime<Utc>>,

    /// Messages from the other participant not yet read by this one
    pub unread_count: i64,

    /// Last-activity timestamp the list is ordered by (descending)
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_pair_is_order_insensitive() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert_eq!(canonical_pair(a, b), canonical_pair(b, a));
        let (low, high) = canonical_pair(a, b);
        assert!(low <= high);
    }

    #[test]
    fn test_new_conversation_canonicalizes() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let ab = Conversation::new(a, b);
        let ba = Conversation::new(b, a);

        assert_eq!(ab.participant_low, ba.participant_low);
        assert_eq!(ab.participant_high, ba.participant_high);
        assert!(ab.participant_low < ab.participant_high);
        assert!(ab.last_message_id.is_none());
    }

    #[test]
    fn test_involves_and_other_participant() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let conversation = Conversation::new(a, b);

        assert!(conversation.involves(a));
        assert!(conversation.involves(b));
        assert!(!conversation.involves(stranger));

        assert_eq!(conversation.other_participant(a), Some(b));
        assert_eq!(conversation.other_participant(b), Some(a));
        assert_eq!(conversation.other_participant(stranger), None);
    }

    #[test]
    fn test_touch_moves_the_pointer() {
        let mut conversation = Conversation::new(Uuid::new_v4(), Uuid::new_v4());
        let message_id = Uuid::new_v4();
        let sent_at = Utc::now();

        conversation.touch(message_id, sent_at);

        assert_eq!(conversation.last_message_id, Some(message_id));
        assert_eq!(conversation.updated_at, sent_at);
    }
}
