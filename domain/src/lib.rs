//! Core types for the Astra chat client: turns and the session, wire
//! payloads, the transport seam, and the pure logic behind the fallback
//! responder, reply reveal and splash progress.

pub mod errors;
pub mod fallback;
pub mod models;
pub mod reveal;
pub mod session;
pub mod splash;
pub mod transport;

pub use errors::{TransportError, ValidationError};
pub use fallback::{FallbackResponder, Intent};
pub use models::{LoanSuggestion, RequestPayload, ResponsePayload};
pub use session::{ChatTurn, Role, Session, HISTORY_WINDOW};
pub use transport::ChatTransport;
