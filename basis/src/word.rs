//! Letters, words and the Lyndon word record.
//!
//! A [`LyndonWord`] is addressed two ways:
//!
//! | Index | Meaning |
//! |-------|---------|
//! | `compressed_index` | rank among all Lyndon words, by depth then lexicographically |
//! | `tensor_algebra_index` | rank among *all* words of the same depth |
//!
//! Bracket children are stored as compressed indices into the owning
//! [`LyndonWords`](crate::LyndonWords) arena, never as references.

use crate::error::{Error, Result};
use crate::expansion::Expansion;
use crate::spec::LyndonSpec;

/// A letter of the alphabet, in `0..alphabet_size`.
pub type Letter = usize;

/// Rank of `letters` among all words of the same length, by mixed-radix
/// positional arithmetic in base `alphabet_size` (first letter most
/// significant).
///
/// # Errors
///
/// [`Error::IndexOverflow`] if the rank exceeds `usize`.
///
/// # Example
///
/// ```
/// use lyndon_basis::{tensor_algebra_index, LyndonSpec};
///
/// let spec = LyndonSpec::new(3, 3).unwrap();
/// // 0 1 2 in base 3 = 0*9 + 1*3 + 2
/// assert_eq!(tensor_algebra_index(&spec, &[0, 1, 2]).unwrap(), 5);
/// ```
pub fn tensor_algebra_index(spec: &LyndonSpec, letters: &[Letter]) -> Result<usize> {
    let overflow = || Error::IndexOverflow {
        alphabet_size: spec.alphabet_size(),
        depth: spec.depth(),
    };
    letters.iter().try_fold(0usize, |acc, &letter| {
        acc.checked_mul(spec.alphabet_size())
            .and_then(|v| v.checked_add(letter))
            .ok_or_else(overflow)
    })
}

/// `true` if `letters` is strictly smaller than each of its non-trivial
/// rotations.
///
/// Quadratic; intended for lookups and assertions, not generation.
#[must_use]
pub fn is_lyndon(letters: &[Letter]) -> bool {
    let n = letters.len();
    if n == 0 {
        return false;
    }
    (1..n).all(|shift| {
        let rotated = letters[shift..].iter().chain(&letters[..shift]);
        letters.iter().lt(rotated)
    })
}

/// The standard factorization of a composite Lyndon word, as compressed
/// indices of its two children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bracket {
    /// Left factor.
    pub left: usize,
    /// Right factor: the longest proper suffix that is Lyndon.
    pub right: usize,
}

/// Transient data attached while deriving the basis transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnagramInfo {
    /// Index of this word's class in the classifier's table.
    pub class: usize,
    /// The bracket polynomial of this word, over permutations of its letters.
    pub expansion: Expansion,
}

/// One Lyndon word of the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyndonWord {
    letters: Vec<Letter>,
    compressed_index: usize,
    tensor_algebra_index: usize,
    flat_tensor_index: usize,
    bracket: Option<Bracket>,
    extra: Option<AnagramInfo>,
}

impl LyndonWord {
    pub(crate) fn new(
        letters: Vec<Letter>,
        compressed_index: usize,
        tensor_algebra_index: usize,
        flat_tensor_index: usize,
    ) -> Self {
        Self {
            letters,
            compressed_index,
            tensor_algebra_index,
            flat_tensor_index,
            bracket: None,
            extra: None,
        }
    }

    /// The letters of this word.
    #[inline]
    #[must_use]
    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    /// Length of the word, i.e. its depth level.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.letters.len()
    }

    /// `true` for single-letter words.
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.letters.len() == 1
    }

    /// Rank among all Lyndon words (depth first, then lexicographic).
    #[inline]
    #[must_use]
    pub const fn compressed_index(&self) -> usize {
        self.compressed_index
    }

    /// Rank among all words of the same depth.
    #[inline]
    #[must_use]
    pub const fn tensor_algebra_index(&self) -> usize {
        self.tensor_algebra_index
    }

    /// Position inside the concatenation of all depth levels `1..=depth`.
    #[inline]
    #[must_use]
    pub const fn flat_tensor_index(&self) -> usize {
        self.flat_tensor_index
    }

    /// Bracket children, if bracketing has been attached and the word is
    /// composite.
    #[inline]
    #[must_use]
    pub const fn bracket(&self) -> Option<&Bracket> {
        self.bracket.as_ref()
    }

    /// Transient anagram data, present only during derivation.
    #[inline]
    #[must_use]
    pub const fn extra(&self) -> Option<&AnagramInfo> {
        self.extra.as_ref()
    }

    /// Bracket polynomial, present only while anagram data is attached.
    #[must_use]
    pub fn expansion(&self) -> Option<&Expansion> {
        self.extra.as_ref().map(|info| &info.expansion)
    }

    pub(crate) fn set_bracket(&mut self, bracket: Bracket) {
        self.bracket = Some(bracket);
    }

    pub(crate) fn set_extra(&mut self, info: AnagramInfo) {
        self.extra = Some(info);
    }

    pub(crate) fn clear_extra(&mut self) {
        self.extra = None;
    }
}
