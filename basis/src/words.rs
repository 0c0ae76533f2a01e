//! The arena that owns every Lyndon word of a derivation.
//!
//! ```text
//!        all Lyndon words, ordered by depth
//!   /------------------------------------------\
//!   | depth 1 | depth 2 |   depth 3   |  ...   |
//!             \---------/
//!     one depth class, lexicographically ordered
//! ```
//!
//! Words are stored flat, so a word's position in the arena is its
//! `compressed_index`. Bracket children and anagram classes refer to words
//! by that index.

use crate::error::{Error, Result};
use crate::spec::LyndonSpec;
use crate::word::{tensor_algebra_index, Letter, LyndonWord};
use core::ops::Index;

/// Every Lyndon word of length `1..=depth` over the alphabet of a spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyndonWords {
    spec: LyndonSpec,
    words: Vec<LyndonWord>,
    /// `class_starts[d]..class_starts[d + 1]` holds the depth-`(d + 1)` words.
    class_starts: Vec<usize>,
}

impl LyndonWords {
    /// Generate all Lyndon words, without bracket information.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOverflow`] if the tensor algebra of `spec` is not
    /// addressable.
    ///
    /// # Example
    ///
    /// ```
    /// use lyndon_basis::{LyndonSpec, LyndonWords};
    ///
    /// let words = LyndonWords::generate(LyndonSpec::new(2, 3).unwrap()).unwrap();
    /// let letters: Vec<Vec<usize>> = words.iter().map(|w| w.letters().to_vec()).collect();
    /// assert_eq!(letters, vec![vec![0], vec![1], vec![0, 1], vec![0, 0, 1], vec![0, 1, 1]]);
    /// ```
    pub fn generate(spec: LyndonSpec) -> Result<Self> {
        crate::generator::generate(spec)
    }

    /// Generate all Lyndon words and attach their standard bracketing.
    ///
    /// # Errors
    ///
    /// As [`LyndonWords::generate`], plus [`Error::InvariantViolation`] if a
    /// factorization cannot be resolved inside the collection.
    pub fn with_brackets(spec: LyndonSpec) -> Result<Self> {
        let mut words = Self::generate(spec)?;
        words.attach_brackets()?;
        Ok(words)
    }

    /// Build the collection from per-depth, lexicographically sorted lists
    /// of letters, assigning all indices.
    ///
    /// `classes[d]` holds the depth-`(d + 1)` words. Trailing depths with no
    /// Lyndon words may be left out.
    pub(crate) fn from_depth_classes(
        spec: LyndonSpec,
        classes: Vec<Vec<Vec<Letter>>>,
    ) -> Result<Self> {
        let overflow = || Error::IndexOverflow {
            alphabet_size: spec.alphabet_size(),
            depth: spec.depth(),
        };
        if classes.len() > spec.depth() {
            return Err(Error::invariant(format!(
                "{} depth classes for depth {}",
                classes.len(),
                spec.depth()
            )));
        }
        let amount = classes.iter().map(Vec::len).sum();
        let mut words = Vec::with_capacity(amount);
        let mut class_starts = Vec::with_capacity(classes.len() + 1);
        let mut offset = 0usize;
        for (d, class) in classes.into_iter().enumerate() {
            class_starts.push(words.len());
            for letters in class {
                if letters.len() != d + 1 {
                    return Err(Error::invariant(format!(
                        "word {letters:?} filed under depth {}",
                        d + 1
                    )));
                }
                let tensor_index = tensor_algebra_index(&spec, &letters)?;
                let flat_index = offset.checked_add(tensor_index).ok_or_else(overflow)?;
                let compressed = words.len();
                words.push(LyndonWord::new(letters, compressed, tensor_index, flat_index));
            }
            offset = offset
                .checked_add(spec.words_at(d + 1)?)
                .ok_or_else(overflow)?;
        }
        class_starts.push(words.len());
        Ok(Self {
            spec,
            words,
            class_starts,
        })
    }

    /// The spec this collection was generated for.
    #[inline]
    #[must_use]
    pub const fn spec(&self) -> &LyndonSpec {
        &self.spec
    }

    /// Total number of Lyndon words.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> usize {
        self.words.len()
    }

    /// Word by compressed index.
    #[inline]
    #[must_use]
    pub fn get(&self, compressed_index: usize) -> Option<&LyndonWord> {
        self.words.get(compressed_index)
    }

    /// All words in compressed-index order.
    pub fn iter(&self) -> core::slice::Iter<'_, LyndonWord> {
        self.words.iter()
    }

    /// The words of exactly `level` letters, lexicographically ordered.
    /// Empty for `level` outside `1..=depth`.
    #[must_use]
    pub fn depth_class(&self, level: usize) -> &[LyndonWord] {
        if level == 0 || level >= self.class_starts.len() {
            return &[];
        }
        &self.words[self.class_starts[level - 1]..self.class_starts[level]]
    }

    /// The depth classes in order from depth 1. Trailing depths without
    /// Lyndon words may be absent; [`LyndonWords::depth_class`] reports them
    /// as empty.
    pub fn depth_classes(&self) -> impl Iterator<Item = &[LyndonWord]> + '_ {
        (1..self.class_starts.len()).map(move |level| self.depth_class(level))
    }

    /// Look up a Lyndon word by its letters.
    #[must_use]
    pub fn find(&self, letters: &[Letter]) -> Option<&LyndonWord> {
        let class = self.depth_class(letters.len());
        class
            .binary_search_by(|w| w.letters().cmp(letters))
            .ok()
            .map(|i| &class[i])
    }

    /// `true` once every composite word carries its bracket.
    #[must_use]
    pub fn has_brackets(&self) -> bool {
        self.words
            .iter()
            .all(|w| w.is_leaf() || w.bracket().is_some())
    }

    /// `true` while any word still carries transient anagram data.
    #[must_use]
    pub fn has_extra(&self) -> bool {
        self.words.iter().any(|w| w.extra().is_some())
    }

    /// Drop the transient anagram data of every word.
    pub fn delete_extra(&mut self) {
        for word in &mut self.words {
            word.clear_extra();
        }
    }

    pub(crate) fn words_mut(&mut self) -> &mut [LyndonWord] {
        &mut self.words
    }
}

impl Index<usize> for LyndonWords {
    type Output = LyndonWord;

    fn index(&self, compressed_index: usize) -> &LyndonWord {
        &self.words[compressed_index]
    }
}

impl<'a> IntoIterator for &'a LyndonWords {
    type Item = &'a LyndonWord;
    type IntoIter = core::slice::Iter<'a, LyndonWord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
