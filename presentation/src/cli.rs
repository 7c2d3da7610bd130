use application::{ChatController, ReplySource};
use clap::{ArgAction, Parser};
use domain::ChatTransport;
use infrastructure::{Config, HttpTransport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::prompt::{ask_chat_turn, is_exit_command};
use shared::telemetry::init_tracing;
use shared::types::Result;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

use crate::screen::ChatScreen;

#[derive(Parser, Debug, Default)]
#[command(name = "astra")]
#[command(about = "Chat with Astra, your AI financial advisor, from the terminal", long_about = None)]
pub struct Cli {
    /// Chat endpoint (overrides ASTRA_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Milliseconds between revealed characters; 0 prints replies at once
    #[arg(long)]
    pub char_delay_ms: Option<u64>,

    /// Skip the loading sequence
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_splash: bool,

    /// Seed for reproducible offline replies
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log debug output to stderr
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Send a single message, print the reply and exit
    #[arg(trailing_var_arg = true)]
    pub message: Vec<String>,
}

impl Cli {
    /// Layer command-line flags over the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(ms) = self.char_delay_ms {
            config.char_delay = Duration::from_millis(ms);
        }
        if self.no_splash {
            config.splash = false;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }

    fn one_shot_message(&self) -> Option<String> {
        let joined = self.message.join(" ");
        (!joined.trim().is_empty()).then_some(joined)
    }
}

pub struct CliApp {
    config: Config,
}

impl CliApp {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn run(&mut self, cli: Cli) -> Result<()> {
        init_tracing(cli.verbose);
        self.config = Config::load()?;
        cli.apply(&mut self.config);
        debug!(config = ?self.config, "configuration loaded");

        match cli.one_shot_message() {
            Some(message) => self.handle_query(&message).await,
            None => self.handle_chat().await,
        }
    }

    fn controller<T: ChatTransport>(&self, transport: T) -> ChatController<T> {
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        ChatController::with_rng(transport, rng)
    }

    async fn handle_chat(&self) -> Result<()> {
        let transport = HttpTransport::from_config(&self.config)?;
        let mut screen = ChatScreen::stdout(self.config.char_delay);

        if self.config.splash {
            screen.splash().await?;
        }

        let online = transport.probe_health().await;
        info!(online, endpoint = %transport.endpoint(), "chat session started");
        screen.header(online, transport.endpoint().as_str())?;

        let mut controller = self.controller(transport);
        let greeting = controller.greet().content().to_string();
        screen.reveal_assistant(&greeting).await?;

        loop {
            let input = ask_chat_turn("You")?;
            if is_exit_command(&input) {
                break;
            }
            if input.trim().is_empty() {
                continue;
            }

            screen.show_typing()?;
            let reply = match controller.submit(&input).await {
                Ok(reply) => reply,
                Err(err) => {
                    debug!(error = %err, "submission ignored");
                    screen.clear_typing()?;
                    continue;
                }
            };

            let pause = match reply.source {
                ReplySource::Server => self.config.reply_delay,
                ReplySource::Fallback => self.config.fallback_delay,
            };
            tokio::time::sleep(pause).await;
            screen.clear_typing()?;

            screen.reveal_assistant(&reply.content).await?;
            screen.show_suggestions(&reply.suggestions)?;
        }

        screen.farewell()?;
        Ok(())
    }

    async fn handle_query(&self, message: &str) -> Result<()> {
        let mut screen = ChatScreen::stdout(Duration::ZERO);
        self.answer_once(message, &mut screen).await
    }

    /// Send one message and print the reply without animation.
    pub async fn answer_once<W: Write>(
        &self,
        message: &str,
        screen: &mut ChatScreen<W>,
    ) -> Result<()> {
        let transport = HttpTransport::from_config(&self.config)?;
        let mut controller = self.controller(transport);

        let reply = controller.submit(message).await?;
        screen.show_assistant(&reply.content)?;
        screen.show_suggestions(&reply.suggestions)?;
        Ok(())
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
