//! Partition of the Lyndon words into anagram classes.
//!
//! Two words belong to the same class when one is a permutation of the
//! other's letters. Bracket expansions never leave the class of the word
//! being expanded, so the basis transform can be solved class by class.
//!
//! # Example
//!
//! ```
//! use lyndon_basis::{AnagramClasses, LyndonSpec, LyndonWords};
//!
//! let words = LyndonWords::generate(LyndonSpec::new(2, 4).unwrap()).unwrap();
//! let classes = AnagramClasses::classify(&words);
//! // 0001 | 0011 | 0111 are pairwise non-anagrams; 001 and 011 too.
//! let class = classes.class_of(&[1, 0, 0]).unwrap();
//! assert_eq!(class.len(), 1);
//! assert!(classes.verify(&words));
//! ```

use crate::word::Letter;
use crate::words::LyndonWords;
use std::collections::BTreeMap;
use tracing::debug;

/// Lyndon words sharing one multiset of letters, in compressed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnagramClass {
    key: Vec<Letter>,
    members: Vec<usize>,
}

impl AnagramClass {
    /// The shared letters, sorted ascending.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &[Letter] {
        &self.key
    }

    /// Compressed indices of the members, ascending.
    #[inline]
    #[must_use]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of members.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// `true` if the class has no members (never the case after
    /// classification).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Position of a word inside this class, if it is a member.
    #[must_use]
    pub fn position(&self, compressed_index: usize) -> Option<usize> {
        self.members.binary_search(&compressed_index).ok()
    }
}

/// Class-membership table keyed by sorted letter multiset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnagramClasses {
    classes: Vec<AnagramClass>,
    by_key: BTreeMap<Vec<Letter>, usize>,
}

/// Sorted copy of `letters`, the class key.
#[must_use]
pub fn anagram_key(letters: &[Letter]) -> Vec<Letter> {
    let mut key = letters.to_vec();
    key.sort_unstable();
    key
}

impl AnagramClasses {
    /// Group every word of `words` by its letter multiset.
    ///
    /// Classes are numbered in order of their first member, and members
    /// are pushed in compressed order, which within a class (all members
    /// share a depth) is lexicographic order.
    #[must_use]
    pub fn classify(words: &LyndonWords) -> Self {
        let mut out = Self::default();
        for word in words {
            let key = anagram_key(word.letters());
            let next = out.classes.len();
            let slot = *out.by_key.entry(key.clone()).or_insert(next);
            if slot == next {
                out.classes.push(AnagramClass {
                    key,
                    members: Vec::new(),
                });
            }
            out.classes[slot].members.push(word.compressed_index());
        }
        debug!(
            classes = out.classes.len(),
            largest = out.classes.iter().map(AnagramClass::len).max().unwrap_or(0),
            "classified anagrams"
        );
        out
    }

    /// Number of classes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// `true` if there are no classes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Class by number.
    #[inline]
    #[must_use]
    pub fn get(&self, class: usize) -> Option<&AnagramClass> {
        self.classes.get(class)
    }

    /// Number of the class of `letters` (in any order).
    #[must_use]
    pub fn class_index(&self, letters: &[Letter]) -> Option<usize> {
        self.by_key.get(&anagram_key(letters)).copied()
    }

    /// Class of `letters` (in any order).
    #[must_use]
    pub fn class_of(&self, letters: &[Letter]) -> Option<&AnagramClass> {
        self.class_index(letters).and_then(|i| self.classes.get(i))
    }

    /// All classes, in numbering order.
    pub fn iter(&self) -> core::slice::Iter<'_, AnagramClass> {
        self.classes.iter()
    }

    /// Check the partition invariant against `words`: every word sits in
    /// exactly one class, whose key matches its letters, members ascend
    /// strictly and no two members spell the same word.
    #[must_use]
    pub fn verify(&self, words: &LyndonWords) -> bool {
        let mut seen = vec![false; words.amount()];
        for (number, class) in self.classes.iter().enumerate() {
            if self.by_key.get(&class.key) != Some(&number) || class.is_empty() {
                return false;
            }
            if !class.members.windows(2).all(|m| m[0] < m[1]) {
                return false;
            }
            for &index in &class.members {
                let Some(word) = words.get(index) else {
                    return false;
                };
                if seen[index] || anagram_key(word.letters()) != class.key {
                    return false;
                }
                seen[index] = true;
            }
            let distinct = class
                .members
                .windows(2)
                .all(|m| words[m[0]].letters() < words[m[1]].letters());
            if !distinct {
                return false;
            }
        }
        self.by_key.len() == self.classes.len() && seen.into_iter().all(|s| s)
    }
}

impl<'a> IntoIterator for &'a AnagramClasses {
    type Item = &'a AnagramClass;
    type IntoIter = core::slice::Iter<'a, AnagramClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::LyndonSpec;

    fn letters_of(words: &LyndonWords, class: &AnagramClass) -> Vec<Vec<Letter>> {
        class
            .members()
            .iter()
            .map(|&i| words[i].letters().to_vec())
            .collect()
    }

    #[test]
    fn binary_depth_five() {
        let words = LyndonWords::generate(LyndonSpec::new(2, 5).unwrap()).unwrap();
        let classes = AnagramClasses::classify(&words);
        assert!(classes.verify(&words));

        // 00101 and 00011 share two 1s and three 0s.
        let class = classes.class_of(&[0, 0, 0, 1, 1]).unwrap();
        assert_eq!(
            letters_of(&words, class),
            [vec![0, 0, 0, 1, 1], vec![0, 0, 1, 0, 1]]
        );
        // 01011 and 00111 share three 1s and two 0s.
        let class = classes.class_of(&[1, 1, 1, 0, 0]).unwrap();
        assert_eq!(
            letters_of(&words, class),
            [vec![0, 0, 1, 1, 1], vec![0, 1, 0, 1, 1]]
        );
    }

    #[test]
    fn letters_are_singleton_classes() {
        let words = LyndonWords::generate(LyndonSpec::new(4, 2).unwrap()).unwrap();
        let classes = AnagramClasses::classify(&words);
        for letter in 0..4 {
            let class = classes.class_of(&[letter]).unwrap();
            assert_eq!(class.members(), &[letter]);
            assert_eq!(class.position(letter), Some(0));
        }
        // depth 2 words have distinct letters, so six singleton classes
        assert_eq!(classes.len(), 4 + 6);
    }

    #[test]
    fn member_count_covers_collection() {
        let words = LyndonWords::generate(LyndonSpec::new(3, 5).unwrap()).unwrap();
        let classes = AnagramClasses::classify(&words);
        let total: usize = classes.iter().map(AnagramClass::len).sum();
        assert_eq!(total, words.amount());
        assert!(classes.verify(&words));
    }

    #[test]
    fn verify_rejects_foreign_table() {
        let small = LyndonWords::generate(LyndonSpec::new(2, 3).unwrap()).unwrap();
        let large = LyndonWords::generate(LyndonSpec::new(2, 4).unwrap()).unwrap();
        let classes = AnagramClasses::classify(&small);
        assert!(!classes.verify(&large));
    }

    #[test]
    fn unknown_multiset() {
        let words = LyndonWords::generate(LyndonSpec::new(2, 3).unwrap()).unwrap();
        let classes = AnagramClasses::classify(&words);
        assert!(classes.class_of(&[0, 0]).is_none());
        assert!(classes.class_of(&[2]).is_none());
    }
}
