//! Escape-sequence scanning for pre-rendered terminal text.
//!
//! Recognises CSI (`ESC [ … final`), OSC (`ESC ] … BEL` or `ESC ] … ESC \`)
//! and two-byte `ESC x` sequences. A sequence that is cut off by the end of
//! the input is returned whole as an escape, never as visible text.

const ESC: char = '\x1b';
const BEL: char = '\x07';

pub const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Escape(&'a str),
}

/// Split `input` into visible text runs and escape sequences
pub fn segments(input: &str) -> Segments<'_> {
    Segments { rest: input }
}

pub struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let len = if self.rest.starts_with(ESC) {
            escape_len(self.rest)
        } else {
            self.rest.find(ESC).unwrap_or(self.rest.len())
        };

        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;

        Some(if head.starts_with(ESC) {
            Segment::Escape(head)
        } else {
            Segment::Text(head)
        })
    }
}

/// Byte length of the escape sequence at the start of `s`
fn escape_len(s: &str) -> usize {
    let mut chars = s.char_indices().skip(1);

    match chars.next() {
        None => s.len(),
        Some((_, '[')) => {
            // Parameters and intermediates until a final byte in 0x40..=0x7E
            for (i, c) in chars {
                if ('\x40'..='\x7e').contains(&c) {
                    return i + c.len_utf8();
                }
            }
            s.len()
        }
        Some((_, ']')) => {
            let mut prev_esc = false;
            for (i, c) in chars {
                if c == BEL || (prev_esc && c == '\\') {
                    return i + c.len_utf8();
                }
                prev_esc = c == ESC;
            }
            s.len()
        }
        Some((i, c)) => i + c.len_utf8(),
    }
}

/// Input with every escape sequence removed
pub fn strip(input: &str) -> String {
    segments(input)
        .filter_map(|segment| match segment {
            Segment::Text(text) => Some(text),
            Segment::Escape(_) => None,
        })
        .collect()
}

/// SGR styling in effect after the text seen so far
#[derive(Debug, Clone, Default)]
pub struct SgrState {
    active: Vec<String>,
}

impl SgrState {
    /// Track every SGR sequence in `text`
    pub fn observe(&mut self, text: &str) {
        for segment in segments(text) {
            if let Segment::Escape(seq) = segment {
                self.apply(seq);
            }
        }
    }

    fn apply(&mut self, seq: &str) {
        let Some(params) = seq.strip_prefix("\x1b[").and_then(|s| s.strip_suffix('m')) else {
            return;
        };

        if params.is_empty() || params == "0" {
            self.active.clear();
        } else if let Some(rest) = params.strip_prefix("0;") {
            self.active.clear();
            self.active.push(format!("\x1b[{rest}m"));
        } else {
            self.active.push(seq.to_string());
        }
    }

    pub fn is_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Sequences that re-establish the current styling
    pub fn restore(&self) -> String {
        self.active.concat()
    }
}
