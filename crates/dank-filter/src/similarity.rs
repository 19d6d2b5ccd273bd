//! String similarity scoring used by fuzzy filters.
//!
//! Scores range over `[0, 100]` and are computed case-insensitively:
//!
//! 1. Equal strings score 100.
//! 2. If either string contains the other, the score is 90.
//! 3. Otherwise the score is `(max_len - distance) / max_len * 100`, where
//!    `distance` is the Levenshtein distance and lengths count Unicode scalar
//!    values.

/// Score given when one string contains the other.
pub const CONTAINMENT_SCORE: f64 = 90.0;

/// Score given to an exact match.
pub const EXACT_SCORE: f64 = 100.0;

/// Classic edit distance with unit cost insert, delete and substitute.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rows of the DP matrix are enough
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j]
            } else {
                1 + prev[j].min(prev[j + 1]).min(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Similarity between two strings in `[0, 100]`, ignoring case.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a == b {
        return EXACT_SCORE;
    }
    if a.contains(&b) || b.contains(&a) {
        return CONTAINMENT_SCORE;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let distance = levenshtein(&a, &b);
    (max_len - distance) as f64 * 100.0 / max_len as f64
}
