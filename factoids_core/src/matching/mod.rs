//! Classification of chat lines into factoid declarations and queries.

mod deny;
mod grammar;
mod markdown;

pub use deny::DenyList;
pub use grammar::{Grammar, question_patterns, statement_patterns};
pub use markdown::trim_markdown;

use tracing::debug;

/// Outcome of classifying a line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// "subject verb predicate"
    Declaration {
        subject: String,
        verb: String,
        predicate: String,
    },
    /// "subject?"
    Query { subject: String },
}

/// Pure text classifier: grammar plus deny-list, no I/O.
#[derive(Debug, Clone)]
pub struct Matcher {
    grammar: Grammar,
    deny: DenyList,
}

impl Matcher {
    #[must_use]
    pub const fn new(grammar: Grammar, deny: DenyList) -> Self {
        Self { grammar, deny }
    }

    /// Statement patterns are tried first; the first family that matches
    /// decides the outcome even when its subject is then rejected.
    #[must_use]
    pub fn classify(&self, text: &str) -> Option<Classified> {
        if let Some(caps) = self.grammar.statement(text) {
            let subject = self.accept_subject(&caps["subject"])?;
            let verb = caps["verb"].trim().to_string();
            let predicate = caps["predicate"].trim().to_string();
            if predicate.is_empty() {
                debug!("Ignoring declaration without predicate for '{subject}'");
                return None;
            }
            return Some(Classified::Declaration {
                subject,
                verb,
                predicate,
            });
        }

        let caps = self.grammar.question(text)?;
        let subject = self.accept_subject(&caps["subject"])?;
        Some(Classified::Query { subject })
    }

    fn accept_subject(&self, raw: &str) -> Option<String> {
        let subject = trim_markdown(raw);
        if subject.is_empty() {
            return None;
        }
        if self.deny.contains(&subject) {
            debug!("Subject '{subject}' is disabled");
            return None;
        }
        Some(subject)
    }
}
