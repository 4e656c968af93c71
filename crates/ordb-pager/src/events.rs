/// What the user asked for at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerKey {
    Continue,
    Quit,
    Unknown,
}

impl PagerKey {
    /// Interpret one line read from the terminal; `None` is end of input
    pub fn from_input(line: Option<&str>) -> Self {
        let Some(line) = line else {
            return PagerKey::Quit;
        };

        let key = line.trim_end_matches(['\n', '\r']);
        if key.trim().is_empty() {
            PagerKey::Continue
        } else if key.trim().eq_ignore_ascii_case("q") {
            PagerKey::Quit
        } else {
            PagerKey::Unknown
        }
    }
}
