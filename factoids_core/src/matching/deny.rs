use std::collections::HashSet;

/// Subjects that never become or recall a factoid.
///
/// Entries are compared case-insensitively against the normalized subject.
#[derive(Debug, Clone, Default)]
pub struct DenyList {
    subjects: HashSet<String>,
}

impl DenyList {
    pub fn new<I, S>(subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            subjects: subjects
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, subject: &str) -> bool {
        self.subjects.contains(&subject.trim().to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}
