/// Pager state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerState {
    /// Emitting lines up to the page height
    Rendering,
    /// Prompt shown, waiting for a line of input
    AwaitingInput,
    /// Everything emitted, or the user quit
    Done,
}

/// Rendered text split into display lines, with the current position
pub struct PageBuffer<'a> {
    lines: Vec<&'a str>,
    offset: usize,
    page_height: usize,
}

impl<'a> PageBuffer<'a> {
    /// Lines are delimited by `\n`; a single trailing newline adds no line
    pub fn new(text: &'a str, page_height: usize) -> Self {
        let mut lines: Vec<&str> = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n').collect()
        };
        if text.ends_with('\n') {
            lines.pop();
        }

        Self {
            lines,
            offset: 0,
            page_height: page_height.max(1),
        }
    }

    /// Next page of lines, advancing the offset
    pub fn next_page(&mut self) -> &[&'a str] {
        let start = self.offset;
        let end = (start + self.page_height).min(self.lines.len());
        self.offset = end;
        &self.lines[start..end]
    }

    pub fn total(&self) -> usize {
        self.lines.len()
    }

    pub fn shown(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.lines.len() - self.offset
    }

    pub fn page_height(&self) -> usize {
        self.page_height
    }

    /// Whether everything fits on a single page
    pub fn fits(&self) -> bool {
        self.lines.len() <= self.page_height
    }

    /// Share of lines shown so far, in percent
    pub fn percent_shown(&self) -> usize {
        if self.lines.is_empty() {
            100
        } else {
            self.offset * 100 / self.lines.len()
        }
    }
}
