use serde::{Deserialize, Serialize};

use crate::session::ChatTurn;

/// Body of `POST /api/chat/respond`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

impl RequestPayload {
    pub fn new(message: impl Into<String>, history: &[ChatTurn]) -> Self {
        Self {
            message: message.into(),
            history: history.to_vec(),
        }
    }
}

/// Successful reply from the chat service. Only `reply` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub reply: String,
    #[serde(default)]
    pub suggestions: Vec<LoanSuggestion>,
    /// Which engine answered, e.g. `"llm"` or `"rule"`.
    #[serde(default)]
    pub source: Option<String>,
}

impl ResponsePayload {
    pub fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            suggestions: Vec::new(),
            source: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSuggestion {
    pub id: String,
    pub name: String,
    pub description: String,
    pub min_amount: u64,
    pub max_amount: u64,
    pub interest_rate: f64,
    pub term_months: Vec<u32>,
    #[serde(default)]
    pub eligibility: Vec<String>,
}

impl LoanSuggestion {
    pub fn longest_term(&self) -> Option<u32> {
        self.term_months.iter().copied().max()
    }
}
