use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Number of most recent turns sent along with each request.
pub const HISTORY_WINDOW: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversation. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    role: Role,
    content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Append-only conversation for one process lifetime.
#[derive(Debug, Clone, Default)]
pub struct Session {
    turns: Vec<ChatTurn>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn. User turns must carry visible content; a blank one is
    /// rejected and the session is left untouched.
    pub fn append_turn(
        &mut self,
        role: Role,
        content: impl Into<String>,
    ) -> Result<&ChatTurn, ValidationError> {
        let content = content.into();
        if role == Role::User && content.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(self.push(ChatTurn::new(role, content)))
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> &ChatTurn {
        self.push(ChatTurn::assistant(content))
    }

    fn push(&mut self, turn: ChatTurn) -> &ChatTurn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    /// The last [`HISTORY_WINDOW`] turns, oldest first.
    pub fn history_for_request(&self) -> &[ChatTurn] {
        let start = self.turns.len().saturating_sub(HISTORY_WINDOW);
        &self.turns[start..]
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
