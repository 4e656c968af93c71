use std::ops::Range;

/// Byte ranges of non-overlapping, case-insensitive occurrences of `term`
pub fn find_spans(text: &str, term: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut next_allowed = 0;

    for (start, _) in text.char_indices() {
        if start < next_allowed {
            continue;
        }
        if let Some(len) = match_len(&text[start..], &needle) {
            spans.push(start..start + len);
            next_allowed = start + len;
        }
    }

    spans
}

/// Byte length of the prefix of `haystack` that lower-cases to `needle`
fn match_len(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut matched = 0;

    for (offset, ch) in haystack.char_indices() {
        for lower in ch.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        if matched == needle.len() {
            return Some(offset + ch.len_utf8());
        }
    }

    None
}

/// Wrap every span of `term` in `text` with `open`/`close`
pub fn highlight(text: &str, term: &str, open: &str, close: &str) -> String {
    let spans = find_spans(text, term);
    if spans.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + spans.len() * (open.len() + close.len()));
    let mut last = 0;
    for span in spans {
        out.push_str(&text[last..span.start]);
        out.push_str(open);
        out.push_str(&text[span.clone()]);
        out.push_str(close);
        last = span.end;
    }
    out.push_str(&text[last..]);
    out
}
