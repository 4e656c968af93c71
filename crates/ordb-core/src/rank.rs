use std::collections::HashSet;

use ordb_types::Entry;

use crate::matcher::MatchCandidate;
use crate::query::SearchMode;

/// Drop repeated entry ids (first seen wins) and order by mode.
///
/// Exact: homonym number (absent = 1), word-class priority, lemma length.
/// Fuzzy: score descending, then lemma length. Everything else: lemma
/// length. Sorting is stable, so ties keep retrieval order.
pub fn rank(mode: SearchMode, candidates: Vec<MatchCandidate>) -> Vec<Entry> {
    let mut unique = dedup(candidates);

    match mode {
        SearchMode::Exact => unique.sort_by_key(|c| {
            (
                c.entry.homonym(),
                c.entry.word_class.rank_priority(),
                c.entry.lemma_len(),
            )
        }),
        SearchMode::Fuzzy => unique.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.entry.lemma_len().cmp(&b.entry.lemma_len()))
        }),
        SearchMode::Prefix
        | SearchMode::AnywhereTerm
        | SearchMode::Fulltext
        | SearchMode::Anywhere
        | SearchMode::ExpressionsOnly => unique.sort_by_key(|c| c.entry.lemma_len()),
    }

    unique.into_iter().map(|c| c.entry).collect()
}

fn dedup(candidates: Vec<MatchCandidate>) -> Vec<MatchCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.entry.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use ordb_types::WordClass;

    use super::*;

    fn hit(entry: Entry) -> MatchCandidate {
        MatchCandidate { entry, score: 1.0 }
    }

    fn scored(entry: Entry, score: f64) -> MatchCandidate {
        MatchCandidate { entry, score }
    }

    fn ids(entries: &[Entry]) -> Vec<i64> {
        entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_exact_homonym_order() {
        let candidates = vec![
            hit(Entry::new(1, "lag", WordClass::Noun)),
            hit(Entry::new(2, "lag", WordClass::Noun).with_homonym(2)),
            hit(Entry::new(3, "lag", WordClass::Noun).with_homonym(1)),
        ];
        assert_eq!(ids(&rank(SearchMode::Exact, candidates)), vec![1, 3, 2]);
    }

    #[test]
    fn test_exact_word_class_then_length() {
        let candidates = vec![
            hit(Entry::new(1, "fort", WordClass::Adv)),
            hit(Entry::new(2, "forta", WordClass::Noun)),
            hit(Entry::new(3, "fort", WordClass::Noun)),
            hit(Entry::new(4, "fort", WordClass::Adj)),
            hit(Entry::new(5, "fort", WordClass::Other("INTJ".into()))),
        ];
        assert_eq!(ids(&rank(SearchMode::Exact, candidates)), vec![3, 2, 4, 1, 5]);
    }

    #[test]
    fn test_fuzzy_score_beats_length() {
        let candidates = vec![
            scored(Entry::new(1, "ab", WordClass::Noun), 0.61),
            scored(Entry::new(2, "abcdefgh", WordClass::Noun), 0.9),
            scored(Entry::new(3, "abc", WordClass::Noun), 0.61),
        ];
        assert_eq!(ids(&rank(SearchMode::Fuzzy, candidates)), vec![2, 1, 3]);
    }

    #[test]
    fn test_other_modes_by_length() {
        let candidates = vec![
            hit(Entry::new(1, "husbåt", WordClass::Noun)),
            hit(Entry::new(2, "hus", WordClass::Noun)),
            hit(Entry::new(3, "huse", WordClass::Verb)),
        ];
        assert_eq!(ids(&rank(SearchMode::Prefix, candidates)), vec![2, 3, 1]);
    }

    #[test]
    fn test_first_seen_wins() {
        let candidates = vec![
            scored(Entry::new(1, "hus", WordClass::Noun), 0.7),
            scored(Entry::new(2, "huse", WordClass::Verb), 0.8),
            scored(Entry::new(1, "hus", WordClass::Noun), 0.95),
        ];
        let ranked = rank(SearchMode::Fuzzy, candidates);
        // The later, higher score for id 1 is discarded
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn test_never_repeats_ids() {
        let candidates: Vec<MatchCandidate> = (0..20)
            .map(|i| hit(Entry::new(i % 5, format!("w{i}"), WordClass::Noun)))
            .collect();
        for mode in [SearchMode::Exact, SearchMode::Fuzzy, SearchMode::Fulltext] {
            let ranked = rank(mode, candidates.clone());
            let mut seen = HashSet::new();
            assert!(ranked.iter().all(|e| seen.insert(e.id)));
            assert_eq!(ranked.len(), 5);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(SearchMode::Exact, Vec::new()).is_empty());
    }
}
