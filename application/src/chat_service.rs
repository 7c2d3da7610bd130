use domain::fallback::{pick, WARM_GREETINGS};
use domain::{
    ChatTransport, ChatTurn, FallbackResponder, Intent, LoanSuggestion, Role, Session,
    ValidationError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::telemetry::Telemetry;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Server,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub content: String,
    pub source: ReplySource,
    pub suggestions: Vec<LoanSuggestion>,
    pub intent: Option<Intent>,
}

/// Owns the session and routes each submission to the chat service, falling
/// back to canned replies when the service fails.
///
/// `submit` takes `&mut self`, so only one request can be in flight.
pub struct ChatController<T, R = StdRng> {
    session: Session,
    transport: T,
    responder: FallbackResponder,
    rng: R,
}

impl<T: ChatTransport> ChatController<T, StdRng> {
    pub fn new(transport: T) -> Self {
        Self::with_rng(transport, StdRng::from_entropy())
    }

    pub fn seeded(transport: T, seed: u64) -> Self {
        Self::with_rng(transport, StdRng::seed_from_u64(seed))
    }
}

impl<T: ChatTransport, R: Rng> ChatController<T, R> {
    pub fn with_rng(transport: T, rng: R) -> Self {
        Self {
            session: Session::new(),
            transport,
            responder: FallbackResponder::new(),
            rng,
        }
    }

    /// Open the conversation with a warm greeting from the assistant.
    pub fn greet(&mut self) -> &ChatTurn {
        let greeting = pick(WARM_GREETINGS, &mut self.rng);
        self.session.push_assistant(greeting)
    }

    /// Send one user message.
    ///
    /// Blank input returns `ValidationError::EmptyMessage` without touching the
    /// session or the transport. Any transport failure is answered locally, so
    /// a successful return always appended exactly one user and one assistant turn.
    pub async fn submit(&mut self, input: &str) -> Result<Reply, ValidationError> {
        let message = input.trim();
        if message.is_empty() {
            debug!("ignoring blank submission");
            return Err(ValidationError::EmptyMessage);
        }

        let history = self.session.history_for_request().to_vec();
        self.session.append_turn(Role::User, message)?;

        let timer = Telemetry::new();
        let reply = match self.transport.send_message(message, &history).await {
            Ok(payload) => {
                debug!(
                    elapsed_ms = timer.elapsed_ms(),
                    source = payload.source.as_deref().unwrap_or("unknown"),
                    suggestions = payload.suggestions.len(),
                    "chat service replied"
                );
                Reply {
                    content: payload.reply,
                    source: ReplySource::Server,
                    suggestions: payload.suggestions,
                    intent: None,
                }
            }
            Err(err) => {
                let intent = self.responder.classify(message);
                warn!(
                    error = %err,
                    elapsed_ms = timer.elapsed_ms(),
                    ?intent,
                    "chat service unavailable, answering locally"
                );
                Reply {
                    content: self
                        .responder
                        .classify_and_reply(message, &mut self.rng)
                        .to_string(),
                    source: ReplySource::Fallback,
                    suggestions: Vec::new(),
                    intent: Some(intent),
                }
            }
        };

        self.session.push_assistant(reply.content.clone());
        Ok(reply)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn responder(&self) -> &FallbackResponder {
        &self.responder
    }
}
