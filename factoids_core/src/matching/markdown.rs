/// Characters the chat host uses for inline formatting.
const MARKUP: [char; 4] = ['*', '_', '`', '~'];

/// Undo markup escaping (`\_`, `\*`, ...) and strip formatting characters and
/// whitespace from both ends.
#[must_use]
pub fn trim_markdown(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next_if(char::is_ascii_punctuation) {
                unescaped.push(next);
                continue;
            }
        }
        unescaped.push(c);
    }

    unescaped
        .trim_matches(|c: char| c.is_whitespace() || MARKUP.contains(&c))
        .to_string()
}
