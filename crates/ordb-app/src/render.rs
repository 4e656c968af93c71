use ordb_core::highlight::highlight;
use ordb_core::{CorpusStatistics, ParsedQuery, SearchMode};
use ordb_types::{Entry, Example, ExampleHit, RelatedExpression, Senses};

use crate::inflection;

const HEADER: &str = "\x1b[95m";
const BOLD: &str = "\x1b[1m";
const LEMMA: &str = "\x1b[1;96m";
const WORD_CLASS: &str = "\x1b[93m";
const INFO: &str = "\x1b[94m";
const EXAMPLE: &str = "\x1b[32m";
const WARNING: &str = "\x1b[33m";
const MATCH_ON: &str = "\x1b[1;4m";
const MATCH_OFF: &str = "\x1b[22;24m";
const END: &str = "\x1b[0m";

const RULE_WIDTH: usize = 80;

/// Which part of an entry to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Full,
    /// Examples only, linked expressions' examples included
    Examples,
    Etymology,
    /// Inflection categories, one per line
    Inflections,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub focus: Focus,
    pub show_definitions: bool,
    pub show_examples: bool,
    /// Examples per definition, all when unset
    pub max_examples: Option<usize>,
    pub show_inflections: bool,
    pub show_etymology: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            focus: Focus::Full,
            show_definitions: true,
            show_examples: true,
            max_examples: None,
            show_inflections: true,
            show_etymology: true,
        }
    }
}

/// Turns search results into styled text for the pager
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn header(&self, query: &ParsedQuery, threshold: f64, fell_back: bool) -> String {
        let term = &query.term;
        let title = match query.mode {
            SearchMode::Exact => format!("Exact search for '{BOLD}{term}{END}{HEADER}'"),
            SearchMode::Prefix if fell_back => format!(
                "No exact match for '{BOLD}{term}{END}{HEADER}', showing terms starting with it"
            ),
            SearchMode::Prefix => format!(
                "Prefix search for '{BOLD}{term}{END}{HEADER}@' (terms starting with '{term}')"
            ),
            SearchMode::AnywhereTerm => format!(
                "Term search for '@{BOLD}{term}{END}{HEADER}' (terms containing '{term}')"
            ),
            SearchMode::Fulltext => {
                format!("Full-text search for '%{BOLD}{term}{END}{HEADER}' (all content)")
            }
            SearchMode::Anywhere => format!("Searching anywhere for '{BOLD}{term}{END}{HEADER}'"),
            SearchMode::ExpressionsOnly => format!(
                "Expression search for '{BOLD}{term}{END}{HEADER}' (expressions only)"
            ),
            SearchMode::Fuzzy => format!(
                "Fuzzy search for '~{BOLD}{term}{END}{HEADER}' (threshold: {threshold})"
            ),
        };
        format!("{HEADER}🔍 {title}{END}")
    }

    pub fn no_results(&self) -> String {
        format!("{WARNING}No results found.{END}")
    }

    pub fn separator(&self) -> String {
        format!("{INFO}{}{END}", "-".repeat(RULE_WIDTH))
    }

    /// Result count line, only when there is more than one result
    pub fn summary(&self, total: usize, limit: usize) -> Option<String> {
        if total <= 1 {
            return None;
        }
        Some(if total > limit {
            format!("\n{INFO}Found {total} results (showing {limit}). Use --limit {total} to see all.{END}")
        } else {
            format!("\n{INFO}Found {total} results.{END}")
        })
    }

    /// One entry with its senses and, when given, linked expressions
    pub fn entry(
        &self,
        entry: &Entry,
        senses: &Senses,
        related: &[RelatedExpression],
        term: &str,
    ) -> String {
        let mut lines = vec![self.title(entry)];

        match self.options.focus {
            Focus::Etymology => {
                let etymology = entry.etymology.as_deref().unwrap_or("none");
                lines.push(format!("  {INFO}Etymology:{END} {etymology}"));
                return lines.join("\n");
            }
            Focus::Inflections => {
                self.inflection_block(&mut lines, entry);
                return lines.join("\n");
            }
            Focus::Full => {
                self.inflection_line(&mut lines, entry);
                if self.options.show_etymology {
                    if let Some(etymology) = &entry.etymology {
                        lines.push(format!("  {INFO}Etymology:{END} {etymology}"));
                    }
                }
            }
            Focus::Examples => {}
        }

        self.senses(&mut lines, senses, term);
        self.related(&mut lines, related, term);

        lines.join("\n")
    }

    /// All categories on one line, or the plain form list without a table
    fn inflection_line(&self, lines: &mut Vec<String>, entry: &Entry) {
        if !self.options.show_inflections {
            return;
        }

        let categories = inflection::categories(entry);
        let rendered = if categories.is_empty() {
            inflection::flat_forms(entry).join(", ")
        } else {
            categories
                .iter()
                .map(|c| format!("{}: {}", c.label, c.forms.join(", ")))
                .collect::<Vec<_>>()
                .join(" | ")
        };
        if !rendered.is_empty() {
            lines.push(format!("  {INFO}Inflections:{END} {rendered}"));
        }
    }

    fn inflection_block(&self, lines: &mut Vec<String>, entry: &Entry) {
        let categories = inflection::categories(entry);
        let forms = inflection::flat_forms(entry);

        if categories.is_empty() && forms.is_empty() {
            lines.push(format!("  {INFO}Inflections:{END} none"));
            return;
        }

        lines.push(format!("  {INFO}Inflections:{END}"));
        if categories.is_empty() {
            lines.push(format!("    Forms: {}", forms.join(", ")));
        }
        for category in categories {
            lines.push(format!("    {BOLD}{}:{END} {}", category.label, category.forms.join(", ")));
        }
    }

    /// "Faste uttrykk" block; with examples only, expressions without
    /// examples are left out
    fn related(&self, lines: &mut Vec<String>, related: &[RelatedExpression], term: &str) {
        let examples_only = self.options.focus == Focus::Examples;
        if !(self.options.show_definitions || examples_only) {
            return;
        }

        let mut block = Vec::new();
        for expression in related {
            let mut body = Vec::new();
            for sense in &expression.senses {
                if !examples_only {
                    body.push(format!("      {}", sense.content));
                }
                if let Some(examples) = self.examples(&sense.examples, term) {
                    body.push(format!("        {examples}"));
                }
            }
            if examples_only && body.is_empty() {
                continue;
            }
            block.push(format!("    {BOLD}• {}{END}", expression.lemma));
            block.extend(body);
        }

        if !block.is_empty() {
            lines.push(format!("  {HEADER}Faste uttrykk:{END}"));
            lines.extend(block);
        }
    }

    fn title(&self, entry: &Entry) -> String {
        let mut title = format!("📖 {LEMMA}{}{END}", entry.lemma);
        if let Some(number) = entry.homonym_number {
            title.push_str(&format!(" ({number})"));
        }
        title.push_str(&format!(" {WORD_CLASS}{}{END}", entry.word_class.label()));
        if let Some(gender) = &entry.gender {
            title.push_str(&format!(" {INFO}({}){END}", gender.description()));
        }
        title
    }

    fn senses(&self, lines: &mut Vec<String>, senses: &Senses, term: &str) {
        if !self.options.show_definitions && !self.options.show_examples {
            return;
        }

        let base_level = senses.definitions.iter().map(|d| d.level).min().unwrap_or(0);
        let mut number = 0;

        for definition in &senses.definitions {
            let depth = definition.level.saturating_sub(base_level) as usize;
            let indent = "  ".repeat(depth + 1);

            if self.options.show_definitions && !definition.content.is_empty() {
                if depth == 0 {
                    number += 1;
                    lines.push(format!("{indent}{BOLD}{number}.{END} {}", definition.content));
                } else {
                    lines.push(format!("{indent}- {}", definition.content));
                }
            }

            if let Some(examples) = self.examples(senses.examples_for(Some(definition.id)), term) {
                lines.push(format!("{indent}   {examples}"));
            }
        }

        if let Some(examples) = self.examples(senses.examples_for(None), term) {
            lines.push(format!("  {INFO}Examples:{END} {examples}"));
        }
    }

    /// `; `-joined quotes with the term highlighted
    fn examples(&self, examples: &[Example], term: &str) -> Option<String> {
        if !self.options.show_examples {
            return None;
        }

        let limit = self.options.max_examples.unwrap_or(usize::MAX);
        let rendered: Vec<String> = examples
            .iter()
            .filter(|e| !e.quote.is_empty())
            .take(limit)
            .map(|e| quote(&e.quote, e.explanation.as_deref(), term))
            .collect();

        (!rendered.is_empty()).then(|| rendered.join("; "))
    }

    /// Whole-dictionary example listing, at most `limit` quotes
    pub fn all_examples(&self, query: &str, hits: &[ExampleHit], limit: usize) -> String {
        let mut parts = vec![format!(
            "{HEADER}🔍 Searching all examples for exact matches of '{BOLD}{query}{END}{HEADER}'{END}"
        )];

        if hits.is_empty() {
            parts.push(format!("{WARNING}No examples found containing '{query}'.{END}"));
            return parts.join("\n");
        }

        parts.push(format!(
            "\n{BOLD}Found {} example(s) containing '{query}':{END}",
            hits.len()
        ));
        parts.push(format!("{INFO}{}{END}", "=".repeat(RULE_WIDTH)));

        let quotes: Vec<String> = hits
            .iter()
            .take(limit)
            .map(|hit| quote(&hit.quote, hit.explanation.as_deref(), query))
            .collect();
        parts.push(format!("  {}", quotes.join("; ")));

        if hits.len() > limit {
            parts.push(format!(
                "{INFO}... and {} more example(s){END}",
                hits.len() - limit
            ));
            parts.push(format!(
                "{INFO}Use --limit {} to see all examples{END}",
                hits.len()
            ));
        }

        parts.join("\n")
    }

    /// Record counts and the word-class distribution
    pub fn statistics(&self, stats: &CorpusStatistics) -> String {
        let total = stats.metadata.entry_count;
        let mut lines = vec![
            format!(
                "{HEADER}📊 Dictionary statistics ({BOLD}{}{END}{HEADER}){END}",
                stats.metadata.name
            ),
            format!("{INFO}{}{END}", "=".repeat(RULE_WIDTH)),
            format!("  {BOLD}Entries:{END}     {total}"),
            format!("  {BOLD}Definitions:{END} {}", stats.definition_count),
            format!("  {BOLD}Examples:{END}    {}", stats.example_count),
            String::new(),
            format!("{BOLD}Word classes:{END}"),
        ];

        for (class, count) in &stats.word_classes {
            let label = if class.as_tag().is_empty() {
                "[unknown]".to_string()
            } else {
                class.label()
            };
            let share = if total == 0 {
                0.0
            } else {
                *count as f64 * 100.0 / total as f64
            };
            lines.push(format!("  {WORD_CLASS}{label:<12}{END} {count:>8}  ({share:.1}%)"));
        }

        lines.join("\n")
    }
}

fn quote(text: &str, explanation: Option<&str>, term: &str) -> String {
    let mut rendered = format!("{EXAMPLE}{}{END}", highlight(text, term, MATCH_ON, MATCH_OFF));
    if let Some(explanation) = explanation {
        rendered.push_str(&format!(" ({explanation})"));
    }
    rendered
}
