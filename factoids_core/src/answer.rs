//! Reply templates with `{username}`, `{subject}`, `{verb}` and `{predicate}`
//! placeholders. `{{` and `}}` produce literal braces.

use crate::error::TemplateError;

/// Escapes substituted values for the transport's rich-text mode.
pub type Escaper = fn(&str) -> String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Subject,
    Verb,
    Predicate,
}

impl std::str::FromStr for Field {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "username" => Ok(Self::Username),
            "subject" => Ok(Self::Subject),
            "verb" => Ok(Self::Verb),
            "predicate" => Ok(Self::Predicate),
            _ => Err(TemplateError::UnknownPlaceholder(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// Values substituted into an [`AnswerTemplate`].
#[derive(Debug, Clone, Copy)]
pub struct AnswerFields<'a> {
    pub username: &'a str,
    pub subject: &'a str,
    pub verb: &'a str,
    pub predicate: &'a str,
}

impl<'a> AnswerFields<'a> {
    const fn get(&self, field: Field) -> &'a str {
        match field {
            Field::Username => self.username,
            Field::Subject => self.subject,
            Field::Verb => self.verb,
            Field::Predicate => self.predicate,
        }
    }
}

/// A parsed `answer_format`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerTemplate {
    segments: Vec<Segment>,
}

impl AnswerTemplate {
    pub fn parse(format: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = format.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if chars.next_if(|&(_, c)| c == '{').is_some() => literal.push('{'),
                '}' if chars.next_if(|&(_, c)| c == '}').is_some() => literal.push('}'),
                '}' => return Err(TemplateError::StrayClose(pos)),
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed(pos));
                    }
                    let field = name.trim().parse::<Field>()?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// Substitute `fields`, passing each value through `escape` when given.
    /// Literal text is never escaped.
    #[must_use]
    pub fn render(&self, fields: &AnswerFields<'_>, escape: Option<Escaper>) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Field(field) => {
                    let value = fields.get(*field);
                    escape.map_or_else(|| value.to_string(), |escape| escape(value))
                }
            })
            .collect()
    }
}
