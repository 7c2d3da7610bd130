use crate::errors::TransportError;
use crate::models::ResponsePayload;
use crate::session::ChatTurn;

/// One request/response exchange with the chat service.
///
/// Implementations make exactly one attempt per call: no retries, no batching.
pub trait ChatTransport {
    fn send_message(
        &self,
        message: &str,
        history: &[ChatTurn],
    ) -> impl std::future::Future<Output = Result<ResponsePayload, TransportError>> + Send;
}
