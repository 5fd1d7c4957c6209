use thiserror::Error;

/// A pattern in the grammar table could not be used.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("invalid pattern #{index}: {source}")]
    Regex {
        index: usize,
        #[source]
        source: regex::Error,
    },

    #[error("pattern #{index} has no `{group}` capture group")]
    MissingGroup { index: usize, group: &'static str },
}

/// The configured `answer_format` is not a usable template.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown placeholder `{{{0}}}`")]
    UnknownPlaceholder(String),

    #[error("unclosed `{{` at byte {0}")]
    Unclosed(usize),

    #[error("single `}}` at byte {0}")]
    StrayClose(usize),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),

    #[error("answer format error: {0}")]
    Template(#[from] TemplateError),
}
