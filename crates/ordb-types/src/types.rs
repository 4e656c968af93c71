use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::word_class::{Gender, WordClass};

/// Stable article identifier assigned by the corpus
pub type EntryId = i64;

/// Separator used by the corpus for list-valued columns
pub const LIST_SEPARATOR: &str = " | ";

/// Dictionary article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub lemma: String,
    #[serde(default, deserialize_with = "non_empty_list")]
    pub all_lemmas: Vec<String>,
    pub word_class: WordClass,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "non_empty_list")]
    pub inflections: Vec<String>,
    /// Opaque inflection paradigm, passed through to the formatter
    #[serde(default)]
    pub inflection_table: serde_json::Value,
    #[serde(default)]
    pub etymology: Option<String>,
    #[serde(default)]
    pub homonym_number: Option<u32>,
}

impl Entry {
    pub fn new(id: EntryId, lemma: impl Into<String>, word_class: WordClass) -> Self {
        Self {
            id,
            lemma: lemma.into(),
            all_lemmas: Vec::new(),
            word_class,
            gender: None,
            inflections: Vec::new(),
            inflection_table: serde_json::Value::Null,
            etymology: None,
            homonym_number: None,
        }
    }

    pub fn with_all_lemmas<I, S>(mut self, lemmas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.all_lemmas = non_empty(lemmas);
        self
    }

    pub fn with_inflections<I, S>(mut self, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inflections = non_empty(forms);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_etymology(mut self, etymology: impl Into<String>) -> Self {
        self.etymology = Some(etymology.into());
        self
    }

    pub fn with_homonym(mut self, number: u32) -> Self {
        self.homonym_number = Some(number);
        self
    }

    /// Homonym number, absent treated as 1
    pub fn homonym(&self) -> u32 {
        self.homonym_number.unwrap_or(1)
    }

    /// Lemma length in characters
    pub fn lemma_len(&self) -> usize {
        self.lemma.chars().count()
    }

    /// Lemma followed by every alternate form and inflection
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.lemma.as_str())
            .chain(self.all_lemmas.iter().map(String::as_str))
            .chain(self.inflections.iter().map(String::as_str))
    }

    pub fn is_expression(&self) -> bool {
        self.word_class.is_expression()
    }
}

/// Split a `" | "`-joined corpus column into its non-empty elements
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(LIST_SEPARATOR)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn non_empty<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items
        .into_iter()
        .map(Into::into)
        .filter(|s: &String| !s.is_empty())
        .collect()
}

fn non_empty_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<String>::deserialize(deserializer).map(non_empty)
}

/// One (possibly nested) sense of an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub id: i64,
    pub entry_id: EntryId,
    #[serde(default)]
    pub parent_id: Option<i64>,
    /// Nesting depth, 1 for top-level senses
    pub level: u32,
    pub order_num: u32,
    pub content: String,
}

/// Usage example attached to a definition or directly to an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub entry_id: EntryId,
    #[serde(default)]
    pub definition_id: Option<i64>,
    pub quote: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Example found by a whole-corpus scan, with its owning article
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleHit {
    pub quote: String,
    pub explanation: Option<String>,
    pub lemma: String,
    pub word_class: WordClass,
}

/// Definitions of one entry plus its examples grouped by definition
#[derive(Debug, Clone, Default)]
pub struct Senses {
    /// Ordered by (level, order_num)
    pub definitions: Vec<Definition>,
    pub examples: HashMap<Option<i64>, Vec<Example>>,
}

impl Senses {
    pub fn new(mut definitions: Vec<Definition>, examples: Vec<Example>) -> Self {
        definitions.sort_by_key(|d| (d.level, d.order_num));

        let mut grouped: HashMap<Option<i64>, Vec<Example>> = HashMap::new();
        for example in examples {
            grouped.entry(example.definition_id).or_default().push(example);
        }

        Self {
            definitions,
            examples: grouped,
        }
    }

    /// Examples attached to the given definition (`None` for entry-level)
    pub fn examples_for(&self, definition_id: Option<i64>) -> &[Example] {
        self.examples
            .get(&definition_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.examples.is_empty()
    }
}

/// Fixed expression cross-linked to a lemma
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedExpression {
    pub entry_id: EntryId,
    pub lemma: String,
    pub senses: Vec<ExpressionSense>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionSense {
    pub definition_id: i64,
    pub content: String,
    pub examples: Vec<Example>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_drops_empty_elements() {
        assert_eq!(split_list(Some("hus | huset |  | husa")), vec!["hus", "huset", "husa"]);
        assert!(split_list(Some("")).is_empty());
        assert!(split_list(None).is_empty());
    }

    #[test]
    fn test_builders_keep_invariants() {
        let entry = Entry::new(1, "hus", WordClass::Noun)
            .with_all_lemmas(["hus", ""])
            .with_inflections(["", "huset"]);
        assert_eq!(entry.all_lemmas, vec!["hus"]);
        assert_eq!(entry.inflections, vec!["huset"]);
        assert_eq!(entry.homonym(), 1);
        assert_eq!(entry.terms().collect::<Vec<_>>(), vec!["hus", "hus", "huset"]);
    }

    #[test]
    fn test_deserialize_drops_empty_elements() {
        let entry: Entry = serde_json::from_str(
            r#"{ "id": 1, "lemma": "hus", "word_class": "NOUN",
                 "all_lemmas": ["", "hus"], "inflections": ["", "huset"] }"#,
        )
        .unwrap();
        assert_eq!(entry.all_lemmas, vec!["hus"]);
        assert_eq!(entry.inflections, vec!["huset"]);
    }

    #[test]
    fn test_lemma_len_counts_chars() {
        let entry = Entry::new(2, "gå", WordClass::Verb);
        assert_eq!(entry.lemma_len(), 2);
    }

    #[test]
    fn test_senses_grouping_and_order() {
        let def = |id, level, order_num| Definition {
            id,
            entry_id: 1,
            parent_id: None,
            level,
            order_num,
            content: format!("def {id}"),
        };
        let example = |definition_id, quote: &str| Example {
            entry_id: 1,
            definition_id,
            quote: quote.to_string(),
            explanation: None,
        };

        let senses = Senses::new(
            vec![def(3, 2, 1), def(1, 1, 2), def(2, 1, 1)],
            vec![example(Some(2), "a"), example(Some(2), "b"), example(None, "c")],
        );

        let ids: Vec<i64> = senses.definitions.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(senses.examples_for(Some(2)).len(), 2);
        assert_eq!(senses.examples_for(None)[0].quote, "c");
        assert!(senses.examples_for(Some(9)).is_empty());
    }
}
