//! Property-based tests for word generation and bracketing.
//!
//! Each property is checked for random `(alphabet_size, depth)` pairs small
//! enough to enumerate the full tensor algebra.

#![allow(clippy::unwrap_used)]

use lyndon_basis::{is_lyndon, Error, LyndonSpec, LyndonWords};
use proptest::prelude::*;

/// Independent mixed-radix rank of `letters` in base `k`.
fn rank(k: usize, letters: &[usize]) -> usize {
    letters.iter().fold(0, |acc, &l| acc * k + l)
}

/// Inverse of `rank`: the word of `len` letters with the given rank.
fn unrank(k: usize, len: usize, mut index: usize) -> Vec<usize> {
    let mut letters = vec![0; len];
    for slot in letters.iter_mut().rev() {
        *slot = index % k;
        index /= k;
    }
    letters
}

fn small_spec() -> impl Strategy<Value = LyndonSpec> {
    (1usize..=4, 1usize..=6).prop_map(|(k, n)| LyndonSpec::new(k, n).unwrap())
}

// =============================================================================
// Counting
// =============================================================================

#[test]
fn necklace_counts_for_known_pairs() {
    let cases = [((2, 1), 2), ((2, 2), 1), ((2, 3), 2), ((3, 2), 3), ((3, 3), 8), ((2, 6), 9)];
    for ((k, n), expected) in cases {
        let words = LyndonWords::generate(LyndonSpec::new(k, n).unwrap()).unwrap();
        assert_eq!(words.depth_class(n).len(), expected, "k={k}, n={n}");
    }
}

proptest! {
    /// Every depth class has the size given by the necklace formula.
    #[test]
    fn prop_class_sizes_match_formula(spec in small_spec()) {
        let words = LyndonWords::generate(spec).unwrap();
        for level in 1..=spec.depth() {
            prop_assert_eq!(words.depth_class(level).len(), spec.lyndon_count(level).unwrap());
        }
        prop_assert_eq!(words.amount(), spec.logsignature_channels().unwrap());
    }

    /// Generation finds exactly the Lyndon words among all words of each length.
    #[test]
    fn prop_generation_matches_exhaustive_filter(k in 1usize..=3, n in 1usize..=5) {
        let spec = LyndonSpec::new(k, n).unwrap();
        let words = LyndonWords::generate(spec).unwrap();
        for level in 1..=n {
            let expected: Vec<Vec<usize>> = (0..spec.words_at(level).unwrap())
                .map(|i| unrank(k, level, i))
                .filter(|w| is_lyndon(w))
                .collect();
            let generated: Vec<Vec<usize>> = words
                .depth_class(level)
                .iter()
                .map(|w| w.letters().to_vec())
                .collect();
            prop_assert_eq!(generated, expected);
        }
    }
}

// =============================================================================
// Indices
// =============================================================================

proptest! {
    /// Compressed indices are exactly 0..amount, in arena order.
    #[test]
    fn prop_compressed_indices_are_dense(spec in small_spec()) {
        let words = LyndonWords::generate(spec).unwrap();
        let indices: Vec<usize> = words.iter().map(|w| w.compressed_index()).collect();
        let expected: Vec<usize> = (0..words.amount()).collect();
        prop_assert_eq!(indices, expected);
    }

    /// Tensor indices agree with an independent mixed-radix computation.
    #[test]
    fn prop_tensor_indices_recompute(spec in small_spec()) {
        let words = LyndonWords::generate(spec).unwrap();
        let k = spec.alphabet_size();
        for w in &words {
            prop_assert_eq!(w.tensor_algebra_index(), rank(k, w.letters()));
            prop_assert_eq!(
                w.flat_tensor_index(),
                spec.level_offset(w.depth()).unwrap() + rank(k, w.letters())
            );
            prop_assert!(w.flat_tensor_index() < spec.signature_channels().unwrap());
        }
    }

    /// Depth-then-lexicographic order holds across the whole arena.
    #[test]
    fn prop_arena_order(spec in small_spec()) {
        let words = LyndonWords::generate(spec).unwrap();
        for pair in words.iter().collect::<Vec<_>>().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!((a.depth(), a.letters()) < (b.depth(), b.letters()));
        }
    }
}

// =============================================================================
// Bracketing
// =============================================================================

proptest! {
    /// Children concatenate to the parent, precede it, and the right child
    /// is the longest proper Lyndon suffix.
    #[test]
    fn prop_children_concatenate(spec in small_spec()) {
        let words = LyndonWords::with_brackets(spec).unwrap();
        for w in &words {
            let Some(b) = w.bracket() else {
                prop_assert!(w.is_leaf());
                continue;
            };
            let (left, right) = (&words[b.left], &words[b.right]);
            prop_assert!(b.left < w.compressed_index() && b.right < w.compressed_index());
            prop_assert!(left.letters() < right.letters());

            let mut joined = left.letters().to_vec();
            joined.extend_from_slice(right.letters());
            prop_assert_eq!(joined.as_slice(), w.letters());

            let letters = w.letters();
            let longest = (1..letters.len()).find(|&s| is_lyndon(&letters[s..])).unwrap();
            prop_assert_eq!(left.depth(), longest);
        }
    }

    /// Standard factorization condition: a composite left child's own right
    /// child is never smaller than the parent's right child.
    #[test]
    fn prop_hall_condition(spec in small_spec()) {
        let words = LyndonWords::with_brackets(spec).unwrap();
        for w in &words {
            if let Some(b) = w.bracket() {
                if let Some(lb) = words[b.left].bracket() {
                    prop_assert!(words[lb.right].letters() >= words[b.right].letters());
                }
            }
        }
    }
}

// =============================================================================
// Spec validation
// =============================================================================

proptest! {
    /// InvalidSpec is raised exactly when a field is zero.
    #[test]
    fn prop_invalid_spec_only_for_zero(k in 0usize..64, n in 0usize..64) {
        match LyndonSpec::new(k, n) {
            Ok(spec) => {
                prop_assert!(k >= 1 && n >= 1);
                prop_assert_eq!((spec.alphabet_size(), spec.depth()), (k, n));
            }
            Err(e) => {
                prop_assert!(k == 0 || n == 0);
                prop_assert_eq!(e, Error::InvalidSpec { alphabet_size: k, depth: n });
            }
        }
    }
}
