//! Per-turn conversational context.

use serde::{Deserialize, Serialize};

use crate::AstrologySystem;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// Wire/database representation ("USER" or "BOT").
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Bot => "BOT",
        }
    }

    /// Parse the wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USER" => Some(Role::User),
            "BOT" => Some(Role::Bot),
            _ => None,
        }
    }
}

/// One prior turn in a conversation, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryTurn {
    pub role: Role,
    pub text: String,
}

/// Everything the response generator needs for one reply.
///
/// Assembled by the orchestration layer from the profile's persisted
/// astrology fields (for `system` only), the bounded recent-message window,
/// and the new user text. The assembler performs no network calls.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptContext {
    /// The system governing this interaction.
    pub system: AstrologySystem,
    /// Human-readable astrology facts block for `system`.
    pub astrology_facts: String,
    /// Most recent non-deleted turns, oldest first.
    pub history: Vec<HistoryTurn>,
    /// The new user message.
    pub question: String,
    /// First name of the selected profile, when one is selected.
    pub first_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::parse(Role::User.as_str()), Some(Role::User));
        assert_eq!(Role::parse(Role::Bot.as_str()), Some(Role::Bot));
        assert_eq!(Role::parse("SYSTEM"), None);
    }
}
