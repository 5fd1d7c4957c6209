use serde::{Deserialize, Serialize};

/// Behaviour of the factoid handler, the `factoids` section of the config file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FactoidsConfig {
    /// Whether the handler reacts to messages at all.
    #[serde(default = "FactoidsConfig::default_enabled")]
    pub enabled: bool,
    /// Shown as `{username}` when the author has no display name.
    #[serde(default = "FactoidsConfig::default_unknown_username")]
    pub unknown_username: String,
    /// Reply template, see [`crate::AnswerTemplate`].
    #[serde(default = "FactoidsConfig::default_answer_format")]
    pub answer_format: String,
    /// Send replies with the transport's rich-text (HTML) rendering.
    #[serde(default)]
    pub rich_text: bool,
    /// Subjects ignored for both declarations and questions.
    #[serde(default = "FactoidsConfig::default_disabled_subjects")]
    pub disabled_subjects: Vec<String>,
}

impl Default for FactoidsConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            unknown_username: Self::default_unknown_username(),
            answer_format: Self::default_answer_format(),
            rich_text: false,
            disabled_subjects: Self::default_disabled_subjects(),
        }
    }
}

impl FactoidsConfig {
    const fn default_enabled() -> bool {
        true
    }

    fn default_unknown_username() -> String {
        "Someone".to_string()
    }

    fn default_answer_format() -> String {
        "{username} said that {subject} {verb} {predicate}".to_string()
    }

    fn default_disabled_subjects() -> Vec<String> {
        [
            "por que", "why", "si", "eso", "que", "no", "cual", "quien", "donde", "cuando",
            "porque",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}
