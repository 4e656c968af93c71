/// ASCII digraphs typed in place of Norwegian letters
pub const DIGRAPHS: [(&str, &str); 3] = [("aa", "å"), ("oe", "ø"), ("ae", "æ")];

/// Expand a term into its search variants.
///
/// The term itself comes first. With replacement enabled each digraph is
/// substituted on its own (no combinations), and a variant is only added
/// when it differs from every earlier one.
pub fn expand(term: &str, character_replacement: bool) -> Vec<String> {
    let mut variants = vec![term.to_string()];

    if character_replacement {
        for (digraph, letter) in DIGRAPHS {
            push_unique(&mut variants, term.replace(digraph, letter));
        }
    }

    variants
}

fn push_unique(variants: &mut Vec<String>, candidate: String) {
    if !variants.contains(&candidate) {
        variants.push(candidate);
    }
}
