use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use ordb_config::PagerConfig;

use crate::ansi::{self, SgrState};
use crate::events::PagerKey;
use crate::state::{PageBuffer, PagerState};
use crate::terminal::{self, Attachment};

#[derive(Debug, thiserror::Error)]
pub enum PagerError {
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Per-run flags that override the configured pagination setting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagerOverrides {
    pub force_paginate: bool,
    /// Takes precedence over `force_paginate`
    pub force_no_paginate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerOutcome {
    pub pages: usize,
    /// Lines not shown because the user quit
    pub withheld: usize,
}

/// `more`-style pager for pre-rendered, possibly styled text
#[derive(Debug, Clone)]
pub struct Pager {
    config: PagerConfig,
    overrides: PagerOverrides,
}

impl Pager {
    pub fn new(config: &PagerConfig, overrides: PagerOverrides) -> Self {
        Self {
            config: config.clone(),
            overrides,
        }
    }

    /// Pagination requested by config and flags; force-off beats force-on
    pub fn enabled(&self) -> bool {
        if self.overrides.force_no_paginate {
            false
        } else if self.overrides.force_paginate {
            true
        } else {
            self.config.enabled
        }
    }

    /// Whether to page given the streams' attachment.
    ///
    /// Piped input still pages: end of input answers the first prompt as a
    /// quit. Configured pagination is skipped when only the output is
    /// redirected, since nobody would see the prompt; `force_paginate` pages
    /// regardless.
    pub fn should_page(&self, attachment: Attachment) -> bool {
        if !self.enabled() {
            return false;
        }
        self.overrides.force_paginate || !attachment.output_redirected()
    }

    /// Write `text` to stdout, reading continuation keys from stdin
    pub fn page(&self, text: &str) -> Result<PagerOutcome, PagerError> {
        let stdout = io::stdout();
        let mut output = stdout.lock();

        let attachment = Attachment::detect();
        if !self.should_page(attachment) {
            tracing::debug!("Pagination off ({attachment:?}), writing output directly");
            return write_all(text, &mut output);
        }

        let height = terminal::page_height(self.config.page_size);
        let stdin = io::stdin();
        let mut input = stdin.lock();
        self.page_to(text, height, &mut input, &mut output)
    }

    /// Page `text` to `output`, reading responses from `input`
    pub fn page_to<R, W>(
        &self,
        text: &str,
        page_height: usize,
        input: &mut R,
        output: &mut W,
    ) -> Result<PagerOutcome, PagerError>
    where
        R: BufRead,
        W: Write,
    {
        let mut buffer = PageBuffer::new(text, page_height);
        if !self.enabled() || buffer.fits() {
            return write_all(text, output);
        }

        let mut sgr = SgrState::default();
        let mut state = PagerState::Rendering;
        let mut pages = 0;
        let mut withheld = 0;

        loop {
            state = match state {
                PagerState::Rendering => {
                    if pages > 0 {
                        if self.config.clear_screen {
                            queue!(output, Clear(ClearType::All), MoveTo(0, 0))?;
                        }
                        // Styling left open on the previous page
                        output.write_all(sgr.restore().as_bytes())?;
                    }

                    for line in buffer.next_page() {
                        sgr.observe(line);
                        writeln!(output, "{line}")?;
                    }
                    pages += 1;

                    if buffer.remaining() == 0 {
                        PagerState::Done
                    } else {
                        if sgr.is_active() {
                            output.write_all(ansi::RESET.as_bytes())?;
                        }
                        PagerState::AwaitingInput
                    }
                }
                PagerState::AwaitingInput => {
                    write!(
                        output,
                        "\x1b[7m--More-- ({}%, {} lines remaining) [Space/Enter: next page, q: quit]\x1b[0m ",
                        buffer.percent_shown(),
                        buffer.remaining()
                    )?;
                    output.flush()?;

                    match PagerKey::from_input(read_line(input).as_deref()) {
                        PagerKey::Continue => PagerState::Rendering,
                        PagerKey::Quit => {
                            withheld = buffer.remaining();
                            writeln!(output, "\n[Output truncated: {withheld} more line(s) not shown]")?;
                            PagerState::Done
                        }
                        PagerKey::Unknown => PagerState::AwaitingInput,
                    }
                }
                PagerState::Done => break,
            };
        }

        output.flush()?;
        tracing::debug!("Paged {} of {} lines in {pages} page(s)", buffer.shown(), buffer.total());
        Ok(PagerOutcome { pages, withheld })
    }
}

/// One line of input; end of input and read errors count as `None`
fn read_line<R: BufRead>(input: &mut R) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(e) => {
            tracing::warn!("Pager input closed: {e}");
            None
        }
    }
}

fn write_all<W: Write>(text: &str, output: &mut W) -> Result<PagerOutcome, PagerError> {
    output.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        output.write_all(b"\n")?;
    }
    output.flush()?;
    Ok(PagerOutcome {
        pages: 1,
        withheld: 0,
    })
}
