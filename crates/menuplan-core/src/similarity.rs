//! Fuzzy matching for human-entered ingredient names.
//!
//! Two names are "similar" when they are equal ignoring case, when one
//! is the naive plural of the other (trailing "s"), or when their edit
//! distance is at most 1. Adjacent transpositions count as a single
//! edit so common typos like "tomaet" still match. The heuristic is
//! intentionally lossy: very short names can false-positive ("pear" vs
//! "pea" sit at distance 1). That is accepted behavior, not a defect.

/// Heuristic near-equality for ingredient names.
pub fn are_similar(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a == b {
        return true;
    }
    // Naive singular/plural: "tomate" matches "tomates"
    if format!("{a}s") == b || format!("{b}s") == a {
        return true;
    }
    edit_distance(&a, &b) <= 1
}

/// Optimal string alignment distance (Levenshtein plus adjacent
/// transpositions), three-row dynamic programming.
pub(crate) fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev_prev = vec![0usize; b.len() + 1];
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for i in 0..a.len() {
        curr[0] = i + 1;
        for j in 0..b.len() {
            let substitution = prev[j] + usize::from(a[i] != b[j]);
            let mut best = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
            if i > 0 && j > 0 && a[i] == b[j - 1] && a[i - 1] == b[j] {
                best = best.min(prev_prev[j - 1] + 1);
            }
            curr[j + 1] = best;
        }
        std::mem::swap(&mut prev_prev, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
