/// All `k`-element subsets of `items`, preserving input order within each
/// subset.
///
/// Recursive include/exclude construction: subsets that take the head plus a
/// `(k-1)`-subset of the tail come first, then the `k`-subsets of the tail.
/// Output size is C(n, k), so callers cap `items` before calling.
pub fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    let Some((head, tail)) = items.split_first() else {
        return Vec::new();
    };

    let mut with_head: Vec<Vec<T>> = combinations(tail, k - 1)
        .into_iter()
        .map(|mut rest| {
            rest.insert(0, head.clone());
            rest
        })
        .collect();
    with_head.extend(combinations(tail, k));
    with_head
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_choose_two() {
        let combos = combinations(&[1, 2, 3], 2);
        assert_eq!(combos, vec![vec![1, 2], vec![1, 3], vec![2, 3]]);
    }

    #[test]
    fn zero_size_yields_one_empty_subset() {
        assert_eq!(combinations(&[1, 2, 3], 0), vec![Vec::<i32>::new()]);
        assert_eq!(combinations::<i32>(&[], 0), vec![Vec::<i32>::new()]);
    }

    #[test]
    fn empty_items_yield_nothing() {
        assert!(combinations::<i32>(&[], 2).is_empty());
    }

    #[test]
    fn k_larger_than_items_yields_nothing() {
        assert!(combinations(&[1, 2], 3).is_empty());
    }

    #[test]
    fn counts_match_binomial() {
        let pool: Vec<u32> = (0..10).collect();
        let counts: Vec<usize> = (2..=5).map(|k| combinations(&pool, k).len()).collect();
        assert_eq!(counts, vec![45, 120, 210, 252]);
    }

    #[test]
    fn works_with_references() {
        let names = ["a".to_string(), "b".to_string(), "c".to_string()];
        let refs: Vec<&String> = names.iter().collect();
        let combos = combinations(&refs, 3);
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0], refs);
    }
}
