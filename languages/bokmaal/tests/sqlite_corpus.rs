use std::path::Path;

use ordb_core::{
    Corpus, CorpusError, ModeOverride, Predicate, Retrieval, Scope, SearchMode, SearchOptions,
    Searcher,
};
use ordb_lang_bokmaal::BokmaalLoader;
use ordb_types::WordClass;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE articles (
        article_id INTEGER PRIMARY KEY,
        lemma TEXT NOT NULL,
        all_lemmas TEXT,
        word_class TEXT,
        gender TEXT,
        inflections TEXT,
        inflection_table TEXT,
        etymology TEXT,
        homonym_number INTEGER
    )"#,
    r#"CREATE TABLE definitions (
        id INTEGER PRIMARY KEY,
        article_id INTEGER NOT NULL,
        definition_id INTEGER,
        parent_id INTEGER,
        level INTEGER,
        content TEXT,
        order_num INTEGER
    )"#,
    r#"CREATE TABLE examples (
        id INTEGER PRIMARY KEY,
        article_id INTEGER NOT NULL,
        definition_id INTEGER,
        quote TEXT,
        explanation TEXT
    )"#,
    r#"CREATE TABLE expression_links (
        expression_article_id INTEGER NOT NULL,
        target_lemma TEXT NOT NULL
    )"#,
];

const DATA: &[&str] = &[
    r#"INSERT INTO articles VALUES
        (1, 'hus', 'hus', 'NOUN', 'Nøytrum', 'huset | hus | husa | husene', '{"Sing":["huset"]}', 'norrønt hús', NULL),
        (2, 'huse', 'huse', 'VERB', NULL, 'huser | huset | husa', NULL, NULL, NULL),
        (3, 'gå', 'gå', 'VERB', NULL, 'går | gikk | gått', NULL, NULL, NULL),
        (4, 'gå an', 'gå an', 'EXPR', NULL, NULL, NULL, NULL, NULL),
        (5, 'gåte', 'gåte', 'NOUN', 'Hankjønn', 'gåten | gåter', NULL, NULL, NULL)"#,
    r#"INSERT INTO definitions VALUES
        (10, 1, 1, NULL, 1, 'bygning til å bo i', 1),
        (11, 3, 1, NULL, 1, 'bevege seg til fots', 1),
        (12, 4, 1, NULL, 1, 'være akseptabelt', 1),
        (13, 4, 2, NULL, 1, '', 2)"#,
    r#"INSERT INTO examples VALUES
        (100, 1, 10, 'huset er stort', NULL),
        (101, 3, 11, 'gå en tur', NULL),
        (102, 4, 12, 'det går ikke an', 'det er ikke greit'),
        (103, 5, NULL, 'gå en tur', NULL),
        (104, 3, 11, '', NULL)"#,
    "INSERT INTO expression_links VALUES (4, 'gå')",
];

async fn create_database(path: &Path) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    for statement in SCHEMA.iter().chain(DATA) {
        sqlx::query(statement).execute(&pool).await.unwrap();
    }
    pool.close().await;
}

fn ids(entries: &[ordb_types::Entry]) -> Vec<i64> {
    entries.iter().map(|e| e.id).collect()
}

#[tokio::test]
async fn test_search_pipeline_over_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("articles.db");
    create_database(&path).await;

    let corpus = BokmaalLoader::open(&path).await.unwrap();
    let searcher = Searcher::new(&corpus, SearchOptions::default()).unwrap();

    // Inflected form shared by a noun and a verb, noun first
    let outcome = searcher.search("huset").await.unwrap();
    assert_eq!(outcome.query.mode, SearchMode::Exact);
    assert_eq!(ids(&outcome.results), vec![1, 2]);

    // Case-insensitive lemma match, duplicates removed
    let outcome = searcher.search("HUS").await.unwrap();
    assert_eq!(ids(&outcome.results), vec![1]);

    // Digraph replacement
    let outcome = searcher.search("gaa").await.unwrap();
    assert_eq!(ids(&outcome.results), vec![3]);

    // Prefix syntax leaves expressions out
    let outcome = searcher.search("gå@").await.unwrap();
    assert_eq!(ids(&outcome.results), vec![3, 5]);

    corpus.close().await;
}

#[tokio::test]
async fn test_expressions_and_fulltext() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("articles.db");
    create_database(&path).await;
    let corpus = BokmaalLoader::open(&path).await.unwrap();

    let options = SearchOptions {
        mode_override: Some(ModeOverride::ExpressionsOnly),
        ..SearchOptions::default()
    };
    let searcher = Searcher::new(&corpus, options).unwrap();
    let outcome = searcher.search("an").await.unwrap();
    assert_eq!(ids(&outcome.results), vec![4]);

    let found = corpus
        .fetch_entries(&Retrieval::new(
            Predicate::Substring("bygning".into()),
            Scope::AllContent,
            false,
        ))
        .await
        .unwrap();
    assert_eq!(ids(&found), vec![1]);

    corpus.close().await;
}

#[tokio::test]
async fn test_senses_and_related_expressions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("articles.db");
    create_database(&path).await;
    let corpus = BokmaalLoader::open(&path).await.unwrap();

    let senses = corpus.fetch_senses(1).await.unwrap();
    assert_eq!(senses.definitions.len(), 1);
    assert_eq!(senses.examples_for(Some(10)).len(), 1);

    assert!(matches!(
        corpus.fetch_senses(999).await,
        Err(CorpusError::NotFound(999))
    ));

    let related = corpus.related_expressions("gå").await.unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].lemma, "gå an");
    assert_eq!(related[0].senses.len(), 1);
    assert_eq!(related[0].senses[0].examples[0].quote, "det går ikke an");
    assert!(corpus.related_expressions("hus").await.unwrap().is_empty());

    let metadata = corpus.metadata().await.unwrap();
    assert_eq!(metadata.entry_count, 5);
    assert_eq!(metadata.name, "articles.db");

    corpus.close().await;
}

#[tokio::test]
async fn test_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("articles.db");
    create_database(&path).await;
    let corpus = BokmaalLoader::open(&path).await.unwrap();

    let stats = corpus.statistics().await.unwrap();
    assert_eq!(stats.metadata.entry_count, 5);
    assert_eq!(stats.definition_count, 4);
    assert_eq!(stats.example_count, 5);
    assert_eq!(
        stats.word_classes,
        vec![
            (WordClass::Noun, 2),
            (WordClass::Verb, 2),
            (WordClass::Expr, 1),
        ]
    );

    corpus.close().await;
}

#[tokio::test]
async fn test_all_examples_whole_word() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("articles.db");
    create_database(&path).await;
    let corpus = BokmaalLoader::open(&path).await.unwrap();
    let searcher = Searcher::new(&corpus, SearchOptions::default()).unwrap();

    let hits = searcher.all_examples("gå").await.unwrap();
    let found: Vec<(&str, &str)> = hits
        .iter()
        .map(|h| (h.lemma.as_str(), h.quote.as_str()))
        .collect();
    assert_eq!(found, vec![("gå", "gå en tur")]);

    corpus.close().await;
}

#[tokio::test]
async fn test_missing_database() {
    let dir = tempfile::tempdir().unwrap();
    let result = BokmaalLoader::open(&dir.path().join("missing.db")).await;
    assert!(matches!(result, Err(CorpusError::Io(_))));
}
