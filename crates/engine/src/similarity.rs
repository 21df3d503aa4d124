use std::collections::HashSet;

/// Words that carry no matching signal in payment descriptions.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "can",
];

/// Levenshtein edit distance over chars, unit cost for insert/delete/substitute.
///
/// Fills the full (m+1)×(n+1) table; descriptions are short enough that
/// banding is not worth it.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut table = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        table[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + cost);
        }
    }

    table[m][n]
}

/// Case-insensitive normalised edit similarity in [0.0, 1.0].
/// Identical strings (including two empty ones) score 1.0.
pub fn similarity(s1: &str, s2: &str) -> f64 {
    let a = s1.to_lowercase();
    let b = s2.to_lowercase();
    if a == b {
        return 1.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    1.0 - levenshtein_distance(&a, &b) as f64 / max_len as f64
}

/// Jaccard overlap of the meaningful words in each string.
///
/// Two strings with no meaningful words score 0.0, unlike [`similarity`].
pub fn keyword_overlap(s1: &str, s2: &str) -> f64 {
    let a = keywords(s1);
    let b = keywords(s2);

    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

/// Even blend of edit similarity and keyword overlap.
pub fn description_similarity(s1: &str, s2: &str) -> f64 {
    0.5 * similarity(s1, s2) + 0.5 * keyword_overlap(s1, s2)
}

fn keywords(s: &str) -> HashSet<String> {
    s.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 2 && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_identical_and_empty() {
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
    }

    #[test]
    fn levenshtein_single_edits() {
        assert_eq!(levenshtein_distance("cat", "bat"), 1);
        assert_eq!(levenshtein_distance("abc", "abcd"), 1);
        assert_eq!(levenshtein_distance("abcd", "abc"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein_distance("café", "cafe"), 1);
    }

    #[test]
    fn similarity_of_self_is_one() {
        for s in ["", "ACME Ltd", "Payment to ABC Supplies"] {
            assert_eq!(similarity(s, s), 1.0);
        }
    }

    #[test]
    fn similarity_ignores_case() {
        assert_eq!(similarity("VENDOR X", "vendor x"), 1.0);
    }

    #[test]
    fn similarity_normalises_by_longer_string() {
        // 5 insertions over 21 chars
        let s = similarity("Vendor X invoice", "Vendor X Invoice #123");
        assert!((s - (1.0 - 5.0 / 21.0)).abs() < 1e-9, "score was {s}");
    }

    #[test]
    fn keyword_overlap_drops_short_and_stop_words() {
        // "to" and "x" never count
        assert_eq!(keyword_overlap("Payment to ABC Supplies", "ABC Supplies Payment"), 1.0);
        assert_eq!(keyword_overlap("to the x", "a an of"), 0.0);
    }

    #[test]
    fn keyword_overlap_empty_is_zero() {
        assert_eq!(keyword_overlap("", ""), 0.0);
    }

    #[test]
    fn keyword_overlap_splits_on_punctuation() {
        // {vendor, invoice} vs {vendor, invoice, 123}
        let s = keyword_overlap("Vendor X invoice", "Vendor-X Invoice #123");
        assert!((s - 2.0 / 3.0).abs() < 1e-9, "score was {s}");
    }

    #[test]
    fn keyword_overlap_is_symmetric() {
        let pairs = [
            ("Office rent March", "March office rent payment"),
            ("Fuel card", "Electricity bill"),
            ("", "Salary run"),
        ];
        for (a, b) in pairs {
            assert_eq!(keyword_overlap(a, b), keyword_overlap(b, a));
        }
    }

    #[test]
    fn description_similarity_blends_both() {
        let a = "Payment to ABC Supplies";
        let b = "ABC Supplies Payment";
        let expected = 0.5 * similarity(a, b) + 0.5 * keyword_overlap(a, b);
        assert_eq!(description_similarity(a, b), expected);
        assert!(description_similarity(a, b) > 0.5);
    }
}
