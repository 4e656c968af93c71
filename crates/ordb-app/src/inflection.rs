use ordb_types::Entry;
use serde_json::Value;

/// One labelled group of inflected forms, e.g. `Plural: hus, husa`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub label: String,
    pub forms: Vec<String>,
}

/// Known paradigm keys: accepted spellings, display label
const LABELS: &[(&[&str], &str)] = &[
    (&["inf", "infinitive", "infinitiv"], "Infinitive"),
    (&["pres", "present", "presens"], "Present"),
    (&["past", "pret", "preteritum"], "Past"),
    (&["perf", "perfect", "perf part", "perfektum partisipp"], "Perfect participle"),
    (&["imp", "imperative", "imperativ"], "Imperative"),
    (&["sing", "sg", "singular", "entall"], "Singular"),
    (&["plur", "pl", "plural", "flertall"], "Plural"),
    (&["pos", "positive", "positiv"], "Positive"),
    (&["comp", "comparative", "komparativ"], "Comparative"),
    (&["sup", "superlative", "superlativ"], "Superlative"),
];

/// Label and sort position of a paradigm key; unknown keys sort last
fn label_of(key: &str) -> (usize, String) {
    let normalized = key.trim().to_lowercase();
    LABELS
        .iter()
        .position(|(keys, _)| keys.contains(&normalized.as_str()))
        .map(|i| (i, LABELS[i].1.to_string()))
        .unwrap_or((LABELS.len(), key.trim().to_string()))
}

/// Every distinct non-empty string leaf under `value`
fn collect_forms(value: &Value, forms: &mut Vec<String>) {
    match value {
        Value::String(form) => {
            let form = form.trim();
            if !form.is_empty() && !forms.iter().any(|f| f == form) {
                forms.push(form.to_string());
            }
        }
        Value::Array(items) => items.iter().for_each(|v| collect_forms(v, forms)),
        Value::Object(map) => map.values().for_each(|v| collect_forms(v, forms)),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Paradigm categories read from an entry's inflection table.
///
/// The table is a JSON object keyed by category; values may be strings,
/// lists or nested objects, whose string leaves become the forms. Anything
/// else yields no categories.
pub fn categories(entry: &Entry) -> Vec<Category> {
    let Value::Object(table) = &entry.inflection_table else {
        return Vec::new();
    };

    let mut ranked: Vec<(usize, Category)> = table
        .iter()
        .filter_map(|(key, value)| {
            let mut forms = Vec::new();
            collect_forms(value, &mut forms);
            if forms.is_empty() {
                return None;
            }
            let (rank, label) = label_of(key);
            Some((rank, Category { label, forms }))
        })
        .collect();

    ranked.sort_by_key(|(rank, _)| *rank);
    ranked.into_iter().map(|(_, category)| category).collect()
}

/// Inflected forms other than the lemma, deduplicated
pub fn flat_forms(entry: &Entry) -> Vec<&str> {
    let mut forms: Vec<&str> = Vec::new();
    for form in &entry.inflections {
        if form != &entry.lemma && !forms.contains(&form.as_str()) {
            forms.push(form.as_str());
        }
    }
    forms
}
