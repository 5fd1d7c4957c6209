//! Terminal front end for the factoid engine.
//!
//! Each line is handled as if it had been posted in the given chat by the
//! given user; replies are printed to stdout.

use factoids_config::Config;
use factoids_core::{FactoidEngine, FactoidRepo, InMemoryFactoidRepo, InboundMessage};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use super::open_store;

/// Input parameters for the Chat command strategy.
#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Chat the messages are attributed to
    pub chat_id: i64,
    /// Sender id recorded as the author of new factoids
    pub user_id: i64,
    /// Sender display name
    pub username: Option<String>,
    /// Optional single message (non-interactive mode)
    pub message: Option<String>,
    /// Use a throwaway in-memory repository instead of the database
    pub memory: bool,
}

/// Strategy for executing the Chat command.
#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl ChatInput {
    fn inbound(&self, text: String) -> InboundMessage {
        InboundMessage {
            scope_id: self.chat_id,
            sender_id: self.user_id,
            sender_name: self.username.clone(),
            text,
        }
    }
}

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        // an in-memory session still honors the factoids section when a config exists
        let (factoids, repo) = if input.memory {
            let factoids = Config::load().map(|c| c.factoids).unwrap_or_default();
            let repo: Arc<dyn FactoidRepo> = Arc::new(InMemoryFactoidRepo::new());
            (factoids, repo)
        } else {
            let config = Config::load()?;
            let repo: Arc<dyn FactoidRepo> = Arc::new(open_store(&config).await?);
            (config.factoids, repo)
        };

        let engine = FactoidEngine::new(&factoids, repo)?;

        if let Some(text) = input.message.clone() {
            respond(&engine, input.inbound(text)).await;
            return Ok(());
        }

        info!("Reading messages for chat {} from stdin", input.chat_id);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut handled = 0usize;
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            respond(&engine, input.inbound(line)).await;
            handled += 1;
        }
        info!("Chat ended after {handled} messages");

        Ok(())
    }
}

async fn respond(engine: &FactoidEngine, msg: InboundMessage) {
    if let Some(reply) = engine.handle(&msg).await {
        println!("{}", reply.text);
    }
}
