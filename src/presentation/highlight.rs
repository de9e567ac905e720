/// A run of text, marked when it matched the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: false,
        }
    }

    fn marked(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: true,
        }
    }
}

/// Split `text` around case-insensitive occurrences of `query`.
///
/// A blank query yields the whole text as one plain segment; empty text
/// yields no segments.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }
    let query = query.trim();
    if query.is_empty() {
        return vec![Segment::plain(text)];
    }

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;
    while pos < text.len() {
        if let Some(len) = match_len(&text[pos..], query) {
            if plain_start < pos {
                segments.push(Segment::plain(&text[plain_start..pos]));
            }
            segments.push(Segment::marked(&text[pos..pos + len]));
            pos += len;
            plain_start = pos;
        } else {
            pos += text[pos..].chars().next().map_or(1, char::len_utf8);
        }
    }
    if plain_start < text.len() {
        segments.push(Segment::plain(&text[plain_start..]));
    }
    segments
}

/// Byte length of the prefix of `haystack` matching `needle` ignoring case.
fn match_len(haystack: &str, needle: &str) -> Option<usize> {
    let mut hay = haystack.char_indices();
    for expected in needle.chars() {
        let (_, actual) = hay.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(hay.next().map_or(haystack.len(), |(idx, _)| idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(segments: &[Segment]) -> Vec<&str> {
        segments
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn matches_ignore_case_and_keep_original_text() {
        let segments = highlight("His mother said HIS name", "his");
        assert_eq!(marked(&segments), vec!["His", "HIS"]);
        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, "His mother said HIS name");
    }

    #[test]
    fn blank_query_is_one_plain_segment() {
        assert_eq!(highlight("title", "  "), vec![Segment::plain("title")]);
        assert!(highlight("", "x").is_empty());
    }

    #[test]
    fn multibyte_text_is_walked_by_char() {
        let segments = highlight("안녕 Rust 안녕", "rust");
        assert_eq!(marked(&segments), vec!["Rust"]);
        assert_eq!(segments.len(), 3);
    }
}
