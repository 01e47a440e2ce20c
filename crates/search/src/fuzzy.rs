//! Fuzzy matching algorithms.

use crate::fold_case;

/// Calculate Levenshtein edit distance between two strings.
///
/// Insertion, deletion and substitution each cost 1; characters are
/// compared as Unicode scalar values.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 { return n; }
    if n == 0 { return m; }

    // Use two rows for space optimization
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity of two free-text values in `[0, 1]`.
///
/// Both sides are lowercased and trimmed. An empty side scores 0, one side
/// containing the other scores 1, anything else scores
/// `1 - distance / max(len_a, len_b)`.
///
/// # Example
/// ```
/// use dogfinder_search::text_similarity;
///
/// assert_eq!(text_similarity("Golden", "golden retriever"), 1.0);
/// assert_eq!(text_similarity("beagle", ""), 0.0);
/// assert!((text_similarity("husky", "husly") - 0.8).abs() < 1e-12);
/// ```
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let a = fold_case(a);
    let b = fold_case(b);

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.contains(&b) || b.contains(&a) {
        return 1.0;
    }

    let distance = levenshtein_distance(&a, &b) as f64;
    let longest = a.chars().count().max(b.chars().count()) as f64;

    (1.0 - distance / longest).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein_distance("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein_distance("hello", "hallo"), 1);
    }

    #[test]
    fn test_levenshtein_insert() {
        assert_eq!(levenshtein_distance("helo", "hello"), 1);
    }

    #[test]
    fn test_levenshtein_delete() {
        assert_eq!(levenshtein_distance("hello", "helo"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein_distance("", "pug"), 3);
        assert_eq!(levenshtein_distance("pug", ""), 3);
    }

    #[test]
    fn test_levenshtein_multibyte() {
        assert_eq!(levenshtein_distance("niño", "nino"), 1);
    }

    #[test]
    fn test_similarity_empty_sides() {
        assert_eq!(text_similarity("", "beagle"), 0.0);
        assert_eq!(text_similarity("beagle", "   "), 0.0);
        assert_eq!(text_similarity("", ""), 0.0);
    }

    #[test]
    fn test_similarity_containment() {
        assert_eq!(text_similarity("  GOLDEN ", "golden retriever"), 1.0);
        assert_eq!(text_similarity("friendly dog near the park", "park"), 1.0);
    }

    #[test]
    fn test_similarity_edit_distance() {
        // kitten -> sitting: 3 edits over 7 characters
        let expected = 1.0 - 3.0 / 7.0;
        assert!((text_similarity("kitten", "sitting") - expected).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_disjoint() {
        assert_eq!(text_similarity("abc", "xyz"), 0.0);
    }

    proptest! {
        #[test]
        fn prop_similarity_symmetric(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            prop_assert_eq!(text_similarity(&a, &b), text_similarity(&b, &a));
        }

        #[test]
        fn prop_similarity_identity(s in "[a-z]{1,12}") {
            prop_assert_eq!(text_similarity(&s, &s), 1.0);
        }

        #[test]
        fn prop_similarity_bounded(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            let sim = text_similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&sim));
        }
    }
}
