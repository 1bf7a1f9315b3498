use std::fmt;

/// Append `line` to `buffer` as a new trailing line.
///
/// The new line is trimmed first; a blank line leaves the buffer as is.
/// Trailing blank lines of the buffer are dropped before appending.
pub fn append(buffer: &str, line: &str) -> String {
    let line = line.trim();
    if line.is_empty() {
        return buffer.to_string();
    }

    let head = trim_trailing_blank_lines(buffer);
    if head.is_empty() {
        return line.to_string();
    }

    format!("{head}\n{line}")
}

pub fn clear() -> String {
    String::new()
}

fn trim_trailing_blank_lines(text: &str) -> &str {
    let mut rest = text.trim_end_matches(['\r', '\n']);
    while let Some((head, last)) = rest.rsplit_once('\n') {
        if !last.trim().is_empty() {
            break;
        }
        rest = head.trim_end_matches(['\r', '\n']);
    }

    if rest.trim().is_empty() { "" } else { rest }
}

/// Accumulated lines of one builder session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) {
        self.text = append(&self.text, line);
    }

    pub fn clear(&mut self) {
        self.text = clear();
    }

    /// Replace the whole content, e.g. with a loaded file
    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Number of non-blank lines
    pub fn len(&self) -> usize {
        self.lines().filter(|l| !l.trim().is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Direct access for the text area
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }
}

impl fmt::Display for LineBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<String> for LineBuffer {
    fn from(text: String) -> Self {
        Self { text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_to_empty() {
        assert_eq!(append("", "--steps 20"), "--steps 20");
        assert_eq!(append("", "  --steps 20 \n"), "--steps 20");
    }

    #[test]
    fn test_append_blank_line_is_noop() {
        assert_eq!(append("--steps 20", "   "), "--steps 20");
        assert_eq!(append("", ""), "");
        assert_eq!(append("keep\n\n", "\n"), "keep\n\n");
    }

    #[test]
    fn test_append_twice_keeps_order() {
        let buffer = "--prompt \"a\"\n--prompt \"b\"";
        let result = append(&append(buffer, "--steps 1"), "--steps 2");

        let lines: Vec<&str> = result.split('\n').collect();
        assert_eq!(lines, vec!["--prompt \"a\"", "--prompt \"b\"", "--steps 1", "--steps 2"]);
    }

    #[test]
    fn test_append_drops_trailing_blank_lines() {
        assert_eq!(append("a\n\n  \n", "b"), "a\nb");
        assert_eq!(append("a\r\n\r\n", "b"), "a\nb");
    }

    #[test]
    fn test_blank_buffer_counts_as_empty() {
        assert_eq!(append("\n\n", "b"), "b");
        assert_eq!(append("  \n \t", "b"), "b");
    }

    #[test]
    fn test_clear_then_append() {
        let cleared = clear();
        assert_eq!(cleared, "");
        assert_eq!(append(&cleared, "--tiling true"), "--tiling true");
    }

    #[test]
    fn test_line_buffer() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.is_empty());

        buffer.push_line("--steps 20");
        buffer.push_line("");
        buffer.push_line("--steps 30");
        assert_eq!(buffer.as_str(), "--steps 20\n--steps 30");
        assert_eq!(buffer.len(), 2);

        buffer.text_mut().push_str("\n\n");
        buffer.push_line("--steps 40");
        assert_eq!(buffer.lines().last(), Some("--steps 40"));
        assert_eq!(buffer.len(), 3);

        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.to_string(), "");
    }
}
