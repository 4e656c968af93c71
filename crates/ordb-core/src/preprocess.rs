use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default query preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Composed form, so a decomposed å still matches the corpus
        let text: String = text.nfc().collect();

        text.replace(['\n', '\r'], " ").trim().to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_composes() {
        let decomposed = "ga\u{030A}";
        assert_eq!(DefaultPreprocessor.process(decomposed), "gå");
        assert_eq!(DefaultPreprocessor.process("  hus\n"), "hus");
        assert_eq!(DefaultPreprocessor.process("   "), "");
    }
}
