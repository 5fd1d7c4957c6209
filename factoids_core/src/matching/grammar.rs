//! Statement and question grammars.
//!
//! Patterns are plain regex sources without anchors or flags. [`Grammar`]
//! compiles them case-insensitively, anchoring statements on both ends and
//! questions at the start only.

use regex::{Captures, Regex};

use crate::error::GrammarError;

/// Up to five word tokens, or a single hashtag/mention.
const SUBJECT: &str = r"(?P<subject>(?:\s?\w+){0,5}|[#@]\w+)";

/// Copulas accepted between subject and predicate.
const COPULA: &str = r"(?P<verb>is|es|est[aá]|son|eran?|ser[aá]n|somos|[eé]ramos|seremos|ser[íi]an?|ser[íi]amos|fue|fueron|fuisteis)";

/// Optional interrogative lead-in: "y qué es", "entonces ke son", "khé eran", ...
const INTERROGATIVE: &str = r"(?:¿\s*)?(?:(?:(?:y|entonces)\s+)?(?:qu|kh?)[ée]\s(?:es?|eran?|son)\s+)?";

/// Statement patterns, tried in order.
#[must_use]
pub fn statement_patterns() -> Vec<String> {
    vec![format!(r"{SUBJECT}\s+{COPULA}\s+(?P<predicate>[^?]*)")]
}

/// Question patterns, tried in order.
#[must_use]
pub fn question_patterns() -> Vec<String> {
    vec![format!(r"{INTERROGATIVE}{SUBJECT}\?+")]
}

/// Compiled statement and question families.
#[derive(Debug, Clone)]
pub struct Grammar {
    statements: Vec<Regex>,
    questions: Vec<Regex>,
}

impl Grammar {
    /// Compile the given pattern families.
    ///
    /// Statement patterns must capture `subject`, `verb` and `predicate`;
    /// question patterns must capture `subject`.
    pub fn new<S: AsRef<str>>(statements: &[S], questions: &[S]) -> Result<Self, GrammarError> {
        let statements = statements
            .iter()
            .enumerate()
            .map(|(index, src)| {
                compile(
                    index,
                    &format!(r"(?i)\A(?:{})\z", src.as_ref()),
                    &["subject", "verb", "predicate"],
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let questions = questions
            .iter()
            .enumerate()
            .map(|(index, src)| compile(index, &format!(r"(?i)\A(?:{})", src.as_ref()), &["subject"]))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            statements,
            questions,
        })
    }

    /// The built-in Spanish/English grammar.
    pub fn with_defaults() -> Result<Self, GrammarError> {
        Self::new(
            statement_patterns().as_slice(),
            question_patterns().as_slice(),
        )
    }

    /// First statement pattern matching the whole of `text`.
    #[must_use]
    pub fn statement<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.statements.iter().find_map(|re| re.captures(text))
    }

    /// First question pattern matching a prefix of `text`.
    #[must_use]
    pub fn question<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.questions.iter().find_map(|re| re.captures(text))
    }
}

fn compile(index: usize, src: &str, groups: &[&'static str]) -> Result<Regex, GrammarError> {
    let re = Regex::new(src).map_err(|source| GrammarError::Regex { index, source })?;
    if let Some(group) = groups
        .iter()
        .find(|group| !re.capture_names().flatten().any(|name| name == **group))
    {
        return Err(GrammarError::MissingGroup {
            index,
            group: *group,
        });
    }
    Ok(re)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> Grammar {
        Grammar::with_defaults().unwrap()
    }

    fn statement(text: &str) -> Option<(String, String, String)> {
        grammar().statement(text).map(|caps| {
            (
                caps["subject"].to_string(),
                caps["verb"].to_string(),
                caps["predicate"].to_string(),
            )
        })
    }

    fn question(text: &str) -> Option<String> {
        grammar().question(text).map(|caps| caps["subject"].to_string())
    }

    #[test]
    fn splits_simple_statement() {
        assert_eq!(
            statement("el gato es gracioso"),
            Some(("el gato".into(), "es".into(), "gracioso".into()))
        );
    }

    #[test]
    fn accepts_conjugations_case_insensitively() {
        for verb in ["está", "ESTA", "son", "eran", "serán", "éramos", "seríamos", "fuisteis", "is"] {
            let text = format!("los perros {verb} azules");
            let (_, matched, _) = statement(&text).unwrap_or_else(|| panic!("no match for {text}"));
            assert_eq!(matched, verb);
        }
    }

    #[test]
    fn hashtag_subject() {
        assert_eq!(
            statement("#rust es genial").map(|(s, _, _)| s),
            Some("#rust".to_string())
        );
    }

    #[test]
    fn mention_subject() {
        assert_eq!(
            statement("@ana es genial").map(|(s, _, _)| s),
            Some("@ana".to_string())
        );
        assert_eq!(question("@ana?"), Some("@ana".to_string()));
    }

    #[test]
    fn statement_rejects_question_marks() {
        assert!(statement("el gato es gracioso?").is_none());
        assert!(statement("el gato es ¿qué? gracioso").is_none());
    }

    #[test]
    fn statement_subject_is_at_most_five_words() {
        assert!(statement("uno dos tres cuatro cinco seis es mucho").is_none());
        assert!(statement("uno dos tres cuatro cinco es mucho").is_some());
    }

    #[test]
    fn plain_question() {
        assert_eq!(question("el gato?"), Some("el gato".to_string()));
        assert_eq!(question("GATO???"), Some("GATO".to_string()));
    }

    #[test]
    fn interrogative_prefix_is_skipped() {
        assert_eq!(question("qué es el gato?"), Some("el gato".to_string()));
        assert_eq!(question("y ke son los perros?"), Some("los perros".to_string()));
        assert_eq!(question("entonces khe eran ellos?"), Some("ellos".to_string()));
        assert_eq!(question("¿qué es rust?"), Some("rust".to_string()));
    }

    #[test]
    fn question_ignores_trailing_text() {
        assert_eq!(question("gato? jaja"), Some("gato".to_string()));
    }

    #[test]
    fn question_needs_subject_right_before_mark() {
        assert!(question("hola, cómo estás?").is_none());
        assert!(question("sin pregunta").is_none());
    }

    #[test]
    fn missing_group_is_rejected() {
        let err = Grammar::new(&[r"(?P<subject>\w+) (?P<verb>es)"], &[r"(?P<subject>\w+)\?"])
            .unwrap_err();
        assert!(matches!(
            err,
            GrammarError::MissingGroup {
                index: 0,
                group: "predicate"
            }
        ));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let err = Grammar::new(&["(?P<subject>"], &[]).unwrap_err();
        assert!(matches!(err, GrammarError::Regex { index: 0, .. }));
    }
}
