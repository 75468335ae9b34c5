/// Greedily wrap `text` at word boundaries into lines of at most `width` characters.
///
/// Words longer than `width` are kept whole on their own line. At most `max_lines` lines are
/// returned; when text was dropped the last kept line ends with `...`.
#[must_use]
pub fn wrap_text_multiline(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(core::mem::take(&mut current));
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            last.push_str("...");
        }
    }

    lines
}
