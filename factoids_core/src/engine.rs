//! Factoid resolution: turns classified chat lines into store writes and
//! replies.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::answer::{AnswerFields, AnswerTemplate, Escaper};
use crate::config::FactoidsConfig;
use crate::error::EngineError;
use crate::factoid::{Factoid, FactoidUpsert, InboundMessage};
use crate::matching::{Classified, DenyList, Grammar, Matcher};
use crate::repository::FactoidRepo;

/// A formatted answer to send back to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// The text is HTML and should be sent with rich-text rendering.
    pub rich_text: bool,
}

/// What a message resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Upsert(FactoidUpsert),
    Reply(Reply),
}

/// Matches messages against the grammar and drives the repository.
///
/// Store failures never reach the chat: lookups that fail count as misses
/// and failed writes are only logged.
pub struct FactoidEngine {
    matcher: Matcher,
    template: AnswerTemplate,
    repo: Arc<dyn FactoidRepo>,
    enabled: bool,
    unknown_username: String,
    rich_text: bool,
    escaper: Option<Escaper>,
}

impl FactoidEngine {
    /// Build an engine with the built-in grammar.
    pub fn new(config: &FactoidsConfig, repo: Arc<dyn FactoidRepo>) -> Result<Self, EngineError> {
        Self::with_grammar(config, Grammar::with_defaults()?, repo)
    }

    pub fn with_grammar(
        config: &FactoidsConfig,
        grammar: Grammar,
        repo: Arc<dyn FactoidRepo>,
    ) -> Result<Self, EngineError> {
        let template = AnswerTemplate::parse(&config.answer_format)?;
        let deny = DenyList::new(&config.disabled_subjects);
        info!(
            "Factoid engine ready (enabled: {}, disabled subjects: {})",
            config.enabled,
            deny.len()
        );

        Ok(Self {
            matcher: Matcher::new(grammar, deny),
            template,
            repo,
            enabled: config.enabled,
            unknown_username: config.unknown_username.clone(),
            rich_text: config.rich_text,
            escaper: None,
        })
    }

    /// Escaper for the transport's rich-text mode.
    ///
    /// Replies are only flagged as rich text when `rich_text` is configured
    /// and an escaper has been supplied.
    #[must_use]
    pub const fn with_escaper(mut self, escaper: Escaper) -> Self {
        self.escaper = Some(escaper);
        self
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Resolve a message without writing anything.
    pub async fn classify_and_respond(&self, msg: &InboundMessage) -> Option<Action> {
        if !self.enabled || msg.text.trim().is_empty() {
            return None;
        }

        match self.matcher.classify(&msg.text)? {
            Classified::Declaration {
                subject,
                verb,
                predicate,
            } => {
                let existing = self.find_live(msg.scope_id, &subject).await;
                Some(Action::Upsert(FactoidUpsert {
                    id: existing.map(|f| f.id),
                    scope_id: msg.scope_id,
                    subject,
                    verb,
                    predicate,
                    author_id: msg.sender_id,
                    author_name: msg.sender_name.clone(),
                    at: Utc::now(),
                }))
            }
            Classified::Query { subject } => {
                let factoid = self.find_live(msg.scope_id, &subject).await?;
                Some(Action::Reply(self.answer(&subject, &factoid)))
            }
        }
    }

    /// Carry out an action. Upserts are silent; replies are handed back.
    pub async fn apply(&self, action: Action) -> Option<Reply> {
        match action {
            Action::Upsert(payload) => {
                match self.repo.upsert(&payload).await {
                    Ok(factoid) => info!("Saved factoid: {factoid}"),
                    Err(e) => warn!(
                        "Failed to save factoid '{}' in chat {}: {e}",
                        payload.subject, payload.scope_id
                    ),
                }
                None
            }
            Action::Reply(reply) => Some(reply),
        }
    }

    /// Resolve and apply a message, returning the reply to send, if any.
    pub async fn handle(&self, msg: &InboundMessage) -> Option<Reply> {
        let action = self.classify_and_respond(msg).await?;
        self.apply(action).await
    }

    async fn find_live(&self, scope_id: i64, subject: &str) -> Option<Factoid> {
        match self.repo.find(scope_id, subject).await {
            Ok(found) => found.filter(Factoid::is_live),
            Err(e) => {
                warn!("Factoid lookup for '{subject}' in chat {scope_id} failed: {e}");
                None
            }
        }
    }

    fn answer(&self, subject: &str, factoid: &Factoid) -> Reply {
        let escaper = if self.rich_text { self.escaper } else { None };
        let fields = AnswerFields {
            username: factoid
                .author_name
                .as_deref()
                .unwrap_or(&self.unknown_username),
            subject,
            verb: &factoid.verb,
            predicate: &factoid.predicate,
        };
        debug!("Answering '{subject}' with factoid {}", factoid.id);

        Reply {
            text: self.template.render(&fields, escaper),
            rich_text: escaper.is_some(),
        }
    }
}
