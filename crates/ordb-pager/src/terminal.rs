use atty::Stream;

/// Rows assumed when the terminal size cannot be read
pub const FALLBACK_ROWS: usize = 24;

/// Terminal rows, if stdout is a terminal that reports its size
pub fn detect_rows() -> Option<usize> {
    match crossterm::terminal::size() {
        Ok((_, rows)) if rows > 0 => Some(rows as usize),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Cannot read terminal size: {e}");
            None
        }
    }
}

/// Lines per page: the configured size, or the terminal height less the
/// prompt row when configured as 0
pub fn page_height(configured: usize) -> usize {
    if configured > 0 {
        return configured;
    }

    detect_rows()
        .unwrap_or(FALLBACK_ROWS)
        .saturating_sub(1)
        .max(1)
}

/// Which standard streams are attached to a terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    pub stdin: bool,
    pub stdout: bool,
}

impl Attachment {
    pub fn detect() -> Self {
        Self {
            stdin: atty::is(Stream::Stdin),
            stdout: atty::is(Stream::Stdout),
        }
    }

    /// Someone is typing at a terminal but the output goes elsewhere
    pub fn output_redirected(&self) -> bool {
        self.stdin && !self.stdout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_height_wins() {
        assert_eq!(page_height(7), 7);
    }

    #[test]
    fn test_auto_height_is_positive() {
        assert!(page_height(0) >= 1);
    }

    #[test]
    fn test_output_redirected() {
        let piped_out = Attachment { stdin: true, stdout: false };
        assert!(piped_out.output_redirected());

        let piped_in = Attachment { stdin: false, stdout: false };
        assert!(!piped_in.output_redirected());
    }
}
