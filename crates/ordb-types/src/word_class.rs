use serde::{Deserialize, Serialize};

/// Part of speech of a dictionary entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WordClass {
    Noun,
    Verb,
    Adj,
    Adv,
    /// Fixed multi-word expression stored as its own entry
    Expr,
    /// Any other class, raw tag preserved
    Other(String),
}

impl WordClass {
    /// Parse a corpus tag such as `NOUN` or `EXPR`
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_uppercase().as_str() {
            "NOUN" => WordClass::Noun,
            "VERB" => WordClass::Verb,
            "ADJ" => WordClass::Adj,
            "ADV" => WordClass::Adv,
            "EXPR" => WordClass::Expr,
            _ => WordClass::Other(tag.trim().to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            WordClass::Noun => "NOUN",
            WordClass::Verb => "VERB",
            WordClass::Adj => "ADJ",
            WordClass::Adv => "ADV",
            WordClass::Expr => "EXPR",
            WordClass::Other(tag) => tag,
        }
    }

    /// Sort priority used when ranking exact matches (lower first)
    pub fn rank_priority(&self) -> u8 {
        match self {
            WordClass::Noun => 0,
            WordClass::Verb => 1,
            WordClass::Adj => 2,
            WordClass::Adv => 3,
            WordClass::Expr | WordClass::Other(_) => 4,
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, WordClass::Expr)
    }

    /// Short bracketed label shown next to a lemma
    pub fn label(&self) -> String {
        format!("[{}]", self.as_tag().to_lowercase())
    }
}

impl From<String> for WordClass {
    fn from(tag: String) -> Self {
        WordClass::from_tag(&tag)
    }
}

impl From<WordClass> for String {
    fn from(class: WordClass) -> Self {
        class.as_tag().to_string()
    }
}

/// Grammatical gender of a noun
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
    /// Combined or unknown gender strings, kept verbatim
    Other(String),
}

impl Gender {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "m" | "masc" | "masculine" => Gender::Masculine,
            "f" | "fem" | "feminine" => Gender::Feminine,
            "n" | "neuter" | "neut" => Gender::Neuter,
            _ => Gender::Other(tag.trim().to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Gender::Masculine => "Masc",
            Gender::Feminine => "Fem",
            Gender::Neuter => "Neuter",
            Gender::Other(tag) => tag,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Gender::Masculine => "masculine",
            Gender::Feminine => "feminine",
            Gender::Neuter => "neuter",
            Gender::Other(tag) => tag,
        }
    }
}

impl From<String> for Gender {
    fn from(tag: String) -> Self {
        Gender::from_tag(&tag)
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.as_tag().to_string()
    }
}
