#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

pub mod answer;
pub mod config;
pub mod engine;
pub mod error;
pub mod factoid;
pub mod matching;
pub mod memory;
pub mod repository;

pub use answer::{AnswerFields, AnswerTemplate, Escaper};
pub use config::FactoidsConfig;
pub use engine::{Action, FactoidEngine, Reply};
pub use error::{EngineError, GrammarError, TemplateError};
pub use factoid::{Factoid, FactoidUpsert, InboundMessage, select_current, subject_key};
pub use matching::{Classified, DenyList, Grammar, Matcher, trim_markdown};
pub use memory::InMemoryFactoidRepo;
pub use repository::FactoidRepo;
