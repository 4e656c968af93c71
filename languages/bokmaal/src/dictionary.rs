use std::path::PathBuf;

use ordb_core::corpus::sort_class_counts;
use ordb_core::{
    Corpus, CorpusError, CorpusMetadata, CorpusStatistics, Predicate, Retrieval, Scope,
};
use ordb_types::{
    Definition, Entry, EntryId, Example, ExampleHit, ExpressionSense, Gender, RelatedExpression,
    Senses, WordClass, split_list,
};
use sqlx::FromRow;
use sqlx::sqlite::SqlitePool;

const ARTICLE_COLUMNS: &str = "a.article_id, a.lemma, a.all_lemmas, a.word_class, a.gender, \
     a.inflections, a.inflection_table, a.etymology, a.homonym_number";

const SENSE_JOINS: &str = "LEFT JOIN definitions d ON a.article_id = d.article_id \
     LEFT JOIN examples e ON a.article_id = e.article_id";

#[derive(Debug, FromRow)]
struct ArticleRow {
    article_id: i64,
    lemma: String,
    all_lemmas: Option<String>,
    word_class: Option<String>,
    gender: Option<String>,
    inflections: Option<String>,
    inflection_table: Option<String>,
    etymology: Option<String>,
    homonym_number: Option<i64>,
}

impl TryFrom<ArticleRow> for Entry {
    type Error = CorpusError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let malformed = |reason: String| CorpusError::MalformedRecord {
            id: row.article_id,
            reason,
        };

        let inflection_table = match row.inflection_table.as_deref().map(str::trim) {
            None | Some("") => serde_json::Value::Null,
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| malformed(format!("bad inflection table: {e}")))?,
        };

        let homonym_number = row
            .homonym_number
            .map(u32::try_from)
            .transpose()
            .map_err(|_| malformed(format!("bad homonym number {:?}", row.homonym_number)))?;

        let mut entry = Entry::new(
            row.article_id,
            row.lemma,
            WordClass::from_tag(row.word_class.as_deref().unwrap_or_default()),
        )
        .with_all_lemmas(split_list(row.all_lemmas.as_deref()))
        .with_inflections(split_list(row.inflections.as_deref()));

        entry.gender = row
            .gender
            .as_deref()
            .filter(|g| !g.is_empty())
            .map(Gender::from_tag);
        entry.etymology = row.etymology.filter(|e| !e.is_empty());
        entry.inflection_table = inflection_table;
        entry.homonym_number = homonym_number;
        Ok(entry)
    }
}

#[derive(Debug, FromRow)]
struct DefinitionRow {
    id: i64,
    article_id: i64,
    parent_id: Option<i64>,
    level: Option<i64>,
    order_num: Option<i64>,
    content: Option<String>,
}

impl From<DefinitionRow> for Definition {
    fn from(row: DefinitionRow) -> Self {
        Definition {
            id: row.id,
            entry_id: row.article_id,
            parent_id: row.parent_id,
            level: small(row.level),
            order_num: small(row.order_num),
            content: row.content.unwrap_or_default(),
        }
    }
}

#[derive(Debug, FromRow)]
struct ExampleRow {
    article_id: i64,
    definition_id: Option<i64>,
    quote: Option<String>,
    explanation: Option<String>,
}

impl From<ExampleRow> for Example {
    fn from(row: ExampleRow) -> Self {
        Example {
            entry_id: row.article_id,
            definition_id: row.definition_id,
            quote: row.quote.unwrap_or_default(),
            explanation: row.explanation.filter(|e| !e.is_empty()),
        }
    }
}

#[derive(Debug, FromRow)]
struct ExampleHitRow {
    quote: String,
    explanation: Option<String>,
    lemma: String,
    word_class: Option<String>,
}

#[derive(Debug, FromRow)]
struct LinkedExpressionRow {
    article_id: i64,
    lemma: String,
    def_id: Option<i64>,
    content: Option<String>,
    quote: Option<String>,
    explanation: Option<String>,
}

/// Negative or oversized ordering columns collapse to 0
fn small(value: Option<i64>) -> u32 {
    value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0)
}

fn backend(e: sqlx::Error) -> CorpusError {
    CorpusError::Backend(Box::new(e))
}

/// `LIKE` pattern matching `term` anywhere, with wildcards in `term` escaped
fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// SQL text and bind values for one retrieval
fn retrieval_query(retrieval: &Retrieval) -> (String, Vec<String>) {
    let (columns, joins): (&[&str], bool) = match retrieval.scope {
        Scope::Lemma => (&["a.lemma"], false),
        Scope::Terms => (&["a.lemma", "a.all_lemmas", "a.inflections"], false),
        Scope::AllContent => (
            &[
                "a.lemma",
                "a.all_lemmas",
                "a.inflections",
                "d.content",
                "e.quote",
                "a.etymology",
            ],
            true,
        ),
        Scope::SensesAndLemmas => (&["d.content", "e.quote", "a.all_lemmas"], true),
        Scope::Expressions => (&["a.lemma", "a.all_lemmas"], false),
    };

    let mut conditions = Vec::new();
    let mut binds = Vec::new();

    match &retrieval.predicate {
        // Only a single-valued column can be compared for equality
        Predicate::Exact(term) if retrieval.scope == Scope::Lemma => {
            conditions.push("a.lemma = ? COLLATE NOCASE".to_string());
            binds.push(term.clone());
        }
        Predicate::Exact(term) | Predicate::Substring(term) => {
            let tests: Vec<String> = columns
                .iter()
                .map(|column| format!("{column} LIKE ? ESCAPE '\\'"))
                .collect();
            conditions.push(format!("({})", tests.join(" OR ")));
            binds.extend(std::iter::repeat_n(contains_pattern(term), columns.len()));
        }
        Predicate::Any => {}
    }

    if retrieval.scope == Scope::Expressions {
        conditions.push("a.word_class = 'EXPR'".to_string());
    } else if !retrieval.include_expr {
        conditions.push("IFNULL(a.word_class, '') != 'EXPR'".to_string());
    }

    let mut sql = if joins {
        format!("SELECT DISTINCT {ARTICLE_COLUMNS} FROM articles a {SENSE_JOINS}")
    } else {
        format!("SELECT {ARTICLE_COLUMNS} FROM articles a")
    };
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY a.article_id");

    (sql, binds)
}

/// Bokmål dictionary backed by the prebuilt SQLite database
pub struct SqliteCorpus {
    pool: SqlitePool,
    path: PathBuf,
}

impl SqliteCorpus {
    pub fn new(pool: SqlitePool, path: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            path: path.into(),
        }
    }

    /// Wait for open connections to finish and close them
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn count_rows(&self, table: &str) -> Result<usize, CorpusError> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .map_err(backend)?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    async fn entry_exists(&self, id: EntryId) -> Result<bool, CorpusError> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT article_id FROM articles WHERE article_id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(backend)?;
        Ok(found.is_some())
    }
}

#[async_trait::async_trait]
impl Corpus for SqliteCorpus {
    async fn fetch_entries(&self, retrieval: &Retrieval) -> Result<Vec<Entry>, CorpusError> {
        let (sql, binds) = retrieval_query(retrieval);
        tracing::trace!("Retrieval {retrieval:?}: {sql}");

        let mut query = sqlx::query_as::<_, ArticleRow>(&sql);
        for value in binds {
            query = query.bind(value);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(backend)?;
        rows.into_iter().map(Entry::try_from).collect()
    }

    async fn fetch_senses(&self, id: EntryId) -> Result<Senses, CorpusError> {
        if !self.entry_exists(id).await? {
            return Err(CorpusError::NotFound(id));
        }

        let definitions = sqlx::query_as::<_, DefinitionRow>(
            r#"
            SELECT id, article_id, parent_id, level, order_num, content
            FROM definitions
            WHERE article_id = ?
            ORDER BY level, order_num
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        let examples = sqlx::query_as::<_, ExampleRow>(
            r#"
            SELECT article_id, definition_id, quote, explanation
            FROM examples
            WHERE article_id = ?
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(Senses::new(
            definitions.into_iter().map(Definition::from).collect(),
            examples.into_iter().map(Example::from).collect(),
        ))
    }

    async fn fetch_examples(&self, needle: &str) -> Result<Vec<ExampleHit>, CorpusError> {
        let rows = sqlx::query_as::<_, ExampleHitRow>(
            r#"
            SELECT e.quote, e.explanation, a.lemma, a.word_class
            FROM examples e
            JOIN articles a ON e.article_id = a.article_id
            WHERE e.quote IS NOT NULL AND e.quote != ''
              AND e.quote LIKE ? ESCAPE '\'
            ORDER BY a.lemma, e.id
            "#,
        )
        .bind(contains_pattern(needle))
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows
            .into_iter()
            .map(|row| ExampleHit {
                quote: row.quote,
                explanation: row.explanation.filter(|e| !e.is_empty()),
                lemma: row.lemma,
                word_class: WordClass::from_tag(row.word_class.as_deref().unwrap_or_default()),
            })
            .collect())
    }

    async fn related_expressions(&self, lemma: &str) -> Result<Vec<RelatedExpression>, CorpusError> {
        let rows = sqlx::query_as::<_, LinkedExpressionRow>(
            r#"
            SELECT DISTINCT a.article_id, a.lemma, d.id AS def_id, d.content, e.quote, e.explanation
            FROM expression_links el
            JOIN articles a ON el.expression_article_id = a.article_id
            LEFT JOIN definitions d ON a.article_id = d.article_id
            LEFT JOIN examples e ON d.id = e.definition_id
            WHERE el.target_lemma = ? AND a.word_class = 'EXPR'
            ORDER BY a.lemma, d.order_num, d.id, e.id
            "#,
        )
        .bind(lemma)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        let mut related: Vec<RelatedExpression> = Vec::new();
        for row in rows {
            if related.last().is_none_or(|r| r.entry_id != row.article_id) {
                related.push(RelatedExpression {
                    entry_id: row.article_id,
                    lemma: row.lemma,
                    senses: Vec::new(),
                });
            }
            let Some(expression) = related.last_mut() else {
                continue;
            };

            let (Some(def_id), Some(content)) = (row.def_id, row.content) else {
                continue;
            };
            if content.is_empty() {
                continue;
            }

            if expression.senses.last().is_none_or(|s| s.definition_id != def_id) {
                expression.senses.push(ExpressionSense {
                    definition_id: def_id,
                    content,
                    examples: Vec::new(),
                });
            }

            if let (Some(sense), Some(quote)) = (expression.senses.last_mut(), row.quote) {
                if !quote.is_empty() {
                    sense.examples.push(Example {
                        entry_id: row.article_id,
                        definition_id: Some(def_id),
                        quote,
                        explanation: row.explanation.filter(|e| !e.is_empty()),
                    });
                }
            }
        }

        Ok(related)
    }

    async fn metadata(&self) -> Result<CorpusMetadata, CorpusError> {
        let entry_count = self.count_rows("articles").await?;

        Ok(CorpusMetadata {
            name: self
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "bokmål".to_string()),
            entry_count,
        })
    }

    async fn statistics(&self) -> Result<CorpusStatistics, CorpusError> {
        let definition_count = self.count_rows("definitions").await?;
        let example_count = self.count_rows("examples").await?;

        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT IFNULL(word_class, ''), COUNT(*) FROM articles GROUP BY IFNULL(word_class, '')",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        let mut word_classes: Vec<(WordClass, usize)> = rows
            .into_iter()
            .map(|(tag, n)| (WordClass::from_tag(&tag), usize::try_from(n).unwrap_or(0)))
            .collect();
        sort_class_counts(&mut word_classes);

        Ok(CorpusStatistics {
            metadata: self.metadata().await?,
            definition_count,
            example_count,
            word_classes,
        })
    }
}
