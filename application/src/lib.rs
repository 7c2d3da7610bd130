pub mod chat_service;
pub mod splash;
pub mod typewriter;

pub use chat_service::{ChatController, Reply, ReplySource};
pub use splash::{run_splash, SplashOutcome};
pub use typewriter::{reveal, reveal_with, RevealOutcome};
