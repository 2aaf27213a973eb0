//=========================================================================
// Sort Strategies
//=========================================================================
//
// Interchangeable in-place orderings for per-frame lists.
//
// Architecture:
//   Sorter::sort_by(items, count, compare)
//     ├─ StandardSorter: stable merge sort from the standard library
//     └─ QuickSorter: Sedgewick quicksort, stops on equal keys
//
// Only the first `count` elements are ordered. Equal elements may end in
// any relative order; both strategies agree on the order relation.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cmp::Ordering;

//=== Sorter Trait ========================================================

/// Contract shared by all sort strategies.
pub trait Sorter {
    /// Orders `items[..count]` in place by `compare`.
    ///
    /// `count` is clamped to `items.len()`. A `count` of 0 or 1 is a no-op.
    fn sort_by<T, F>(&self, items: &mut [T], count: usize, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering;
}

//=== StandardSorter ======================================================

/// Stable general-purpose sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSorter;

impl Sorter for StandardSorter {
    fn sort_by<T, F>(&self, items: &mut [T], count: usize, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let count = count.min(items.len());
        items[..count].sort_by(compare);
    }
}

//=== QuickSorter =========================================================

/// Quicksort with Sedgewick's partitioning.
///
/// The pivot is the median of the first, middle and last elements, moved to
/// the right end where it doubles as the sentinel for the left scan. Sorted
/// and reversed inputs therefore split near the middle. Both scans stop on keys equal to the pivot, so inputs made of
/// many equal keys (identical render priorities) split evenly instead of
/// degrading to quadratic time.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSorter;

impl Sorter for QuickSorter {
    fn sort_by<T, F>(&self, items: &mut [T], count: usize, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let count = count.min(items.len());
        quicksort(&mut items[..count], &mut compare);
    }
}

/// Recurses into the smaller partition and loops on the larger one, which
/// bounds stack depth to O(log n).
fn quicksort<T, F>(mut a: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    while a.len() > 1 {
        let pivot = partition(a, compare);
        let (left, rest) = a.split_at_mut(pivot);
        let right = &mut rest[1..];

        if left.len() < right.len() {
            quicksort(left, compare);
            a = right;
        } else {
            quicksort(right, compare);
            a = left;
        }
    }
}

/// Orders `a[0]`, `a[mid]` and `a[right]`, then swaps the median into
/// `a[right]`.
fn median_of_three<T, F>(a: &mut [T], compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let right = a.len() - 1;
    let mid = right / 2;
    if compare(&a[mid], &a[0]) == Ordering::Less {
        a.swap(mid, 0);
    }
    if compare(&a[right], &a[0]) == Ordering::Less {
        a.swap(right, 0);
    }
    if compare(&a[right], &a[mid]) == Ordering::Less {
        a.swap(right, mid);
    }
    a.swap(mid, right);
}

/// Partitions `a` around a median-of-three pivot; returns the pivot's final
/// index.
///
/// Requires `a.len() >= 2`.
fn partition<T, F>(a: &mut [T], compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let right = a.len() - 1;
    if a.len() >= 3 {
        median_of_three(a, compare);
    }
    let mut i: isize = -1;
    let mut j: isize = right as isize;

    loop {
        // Left scan; a[right] stops it at the latest.
        loop {
            i += 1;
            if compare(&a[i as usize], &a[right]) != Ordering::Less {
                break;
            }
        }

        // Right scan; bounded by the start of the slice.
        loop {
            j -= 1;
            if compare(&a[right], &a[j as usize]) != Ordering::Less || j == 0 {
                break;
            }
        }

        if i >= j {
            break;
        }
        a.swap(i as usize, j as usize);
    }

    a.swap(i as usize, right);
    i as usize
}

//=== SortStrategy ========================================================

/// Runtime-selectable strategy, configured once at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortStrategy {
    /// [`StandardSorter`].
    Standard,

    /// [`QuickSorter`].
    #[default]
    QuickSort,
}

impl Sorter for SortStrategy {
    fn sort_by<T, F>(&self, items: &mut [T], count: usize, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        match self {
            Self::Standard => StandardSorter.sort_by(items, count, compare),
            Self::QuickSort => QuickSorter.sort_by(items, count, compare),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    //--- Test Helpers -----------------------------------------------------

    fn is_non_decreasing(values: &[i32]) -> bool {
        values.windows(2).all(|w| w[0] <= w[1])
    }

    fn sorted_multiset(values: &[i32]) -> Vec<i32> {
        let mut copy = values.to_vec();
        copy.sort_unstable();
        copy
    }

    fn random_values(seed: u64, len: usize, max_key: i32) -> Vec<i32> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| rng.random_range(0..max_key)).collect()
    }

    fn check_strategy<S: Sorter>(sorter: &S) {
        for (seed, len, max_key) in [(1, 200, 5), (2, 513, 1000), (3, 64, 2), (4, 1000, 10)] {
            let input = random_values(seed, len, max_key);
            let mut output = input.clone();
            sorter.sort_by(&mut output, len, |a, b| a.cmp(b));

            assert_eq!(output.len(), input.len());
            assert!(is_non_decreasing(&output), "seed {} not ordered", seed);
            assert_eq!(sorted_multiset(&output), sorted_multiset(&input));
        }
    }

    //=====================================================================
    // Ordering Properties
    //=====================================================================

    #[test]
    fn standard_sorter_orders_duplicates() {
        check_strategy(&StandardSorter);
    }

    #[test]
    fn quick_sorter_orders_duplicates() {
        check_strategy(&QuickSorter);
    }

    #[test]
    fn strategy_enum_dispatches_both() {
        check_strategy(&SortStrategy::Standard);
        check_strategy(&SortStrategy::QuickSort);
    }

    #[test]
    fn both_strategies_agree_on_keys() {
        let input = random_values(9, 300, 7);
        let mut a = input.clone();
        let mut b = input.clone();
        StandardSorter.sort_by(&mut a, 300, |x, y| x.cmp(y));
        QuickSorter.sort_by(&mut b, 300, |x, y| x.cmp(y));
        assert_eq!(a, b);
    }

    //=====================================================================
    // Edge Cases
    //=====================================================================

    #[test]
    fn count_zero_and_one_are_no_ops() {
        let mut values = vec![3, 1, 2];
        QuickSorter.sort_by(&mut values, 0, |a, b| a.cmp(b));
        assert_eq!(values, vec![3, 1, 2]);
        QuickSorter.sort_by(&mut values, 1, |a, b| a.cmp(b));
        assert_eq!(values, vec![3, 1, 2]);
        StandardSorter.sort_by(&mut values, 1, |a, b| a.cmp(b));
        assert_eq!(values, vec![3, 1, 2]);
    }

    #[test]
    fn only_prefix_is_sorted() {
        let mut values = vec![4, 3, 2, 1, 0, -1];
        QuickSorter.sort_by(&mut values, 4, |a, b| a.cmp(b));
        assert_eq!(values, vec![1, 2, 3, 4, 0, -1]);
    }

    #[test]
    fn count_beyond_len_is_clamped() {
        let mut values = vec![2, 1];
        QuickSorter.sort_by(&mut values, 10, |a, b| a.cmp(b));
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn all_equal_keys_terminate() {
        let mut values = vec![7; 10_000];
        QuickSorter.sort_by(&mut values, 10_000, |a, b| a.cmp(b));
        assert!(values.iter().all(|&v| v == 7));
    }

    #[test]
    fn already_sorted_and_reversed_inputs() {
        let mut ascending: Vec<i32> = (0..2_000).collect();
        QuickSorter.sort_by(&mut ascending, 2_000, |a, b| a.cmp(b));
        assert!(is_non_decreasing(&ascending));

        let mut descending: Vec<i32> = (0..2_000).rev().collect();
        QuickSorter.sort_by(&mut descending, 2_000, |a, b| a.cmp(b));
        assert!(is_non_decreasing(&descending));
    }

    #[test]
    fn presorted_inputs_stay_n_log_n() {
        const N: usize = 4_096;
        // n log2 n is about 49k; a last-element pivot needs about 8M.
        const BUDGET: usize = 8 * N * 12;

        let inputs: [Vec<i32>; 2] = [(0..N as i32).collect(), (0..N as i32).rev().collect()];
        for mut values in inputs {
            let mut comparisons = 0;
            QuickSorter.sort_by(&mut values, N, |a, b| {
                comparisons += 1;
                a.cmp(b)
            });
            assert!(is_non_decreasing(&values));
            assert!(comparisons < BUDGET, "{} comparisons for {} keys", comparisons, N);
        }
    }

    #[test]
    fn sorts_by_key_with_payload() {
        let mut items = vec![(20, 'p'), (-100, 'b'), (5, 'e'), (20, 'q'), (0, 'f')];
        QuickSorter.sort_by(&mut items, 5, |a, b| a.0.cmp(&b.0));
        let keys: Vec<i32> = items.iter().map(|i| i.0).collect();
        assert_eq!(keys, vec![-100, 0, 5, 20, 20]);
    }
}
