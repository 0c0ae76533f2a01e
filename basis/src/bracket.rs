//! Standard bracketing of Lyndon words (the Hall-basis generators).
//!
//! Every composite Lyndon word `w` factors uniquely as `w = u·v` where `v`
//! is its lexicographically smallest proper suffix. Both `u` and `v` are
//! Lyndon words, so `[u, v]` recursively defines a binary tree whose leaves
//! are letters.
//!
//! The smallest proper suffix of `w` is the last factor of the Lyndon
//! factorization of `w` with its first letter removed, which Duval's
//! factorization finds in linear time. Candidate suffixes are never tested
//! one by one; the two factors are then located in their depth classes by
//! binary search.
//!
//! ```text
//!   0 0 1 0 1          tail 0 1 0 1 = (0 1)(0 1)
//!   \___/ \_/          last factor starts at 2
//!     u    v   =>  [001, 01] = [[0,[0,1]],[0,1]]
//! ```

use crate::error::{Error, Result};
use crate::word::{Bracket, Letter};
use crate::words::LyndonWords;
use core::fmt;
use tracing::{debug, instrument};

/// Owned bracket tree of a Lyndon word, for labelling basis coordinates.
///
/// # Example
///
/// ```
/// use lyndon_basis::{LyndonSpec, LyndonWords};
///
/// let words = LyndonWords::with_brackets(LyndonSpec::new(2, 3).unwrap()).unwrap();
/// let w = words.find(&[0, 0, 1]).unwrap();
/// let expr = words.bracket_expr(w.compressed_index()).unwrap();
/// assert_eq!(expr.to_string(), "[0,[0,1]]");
/// assert_eq!(expr.letters(), vec![0, 0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BracketExpr {
    /// A single letter.
    Letter(Letter),
    /// The bracket `[left, right]`.
    Bracket(Box<BracketExpr>, Box<BracketExpr>),
}

impl BracketExpr {
    /// The letters at the leaves, left to right.
    #[must_use]
    pub fn letters(&self) -> Vec<Letter> {
        let mut out = Vec::new();
        self.collect_letters(&mut out);
        out
    }

    fn collect_letters(&self, out: &mut Vec<Letter>) {
        match self {
            Self::Letter(l) => out.push(*l),
            Self::Bracket(left, right) => {
                left.collect_letters(out);
                right.collect_letters(out);
            }
        }
    }
}

impl fmt::Display for BracketExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letter(l) => write!(f, "{l}"),
            Self::Bracket(left, right) => write!(f, "[{left},{right}]"),
        }
    }
}

/// Start of the last factor in the Lyndon factorization of `s`.
///
/// That factor is the lexicographically smallest suffix of `s`.
fn last_lyndon_factor_start(s: &[Letter]) -> usize {
    let n = s.len();
    let mut i = 0;
    let mut last = 0;
    while i < n {
        let mut j = i + 1;
        let mut k = i;
        while j < n && s[k] <= s[j] {
            k = if s[k] < s[j] { i } else { k + 1 };
            j += 1;
        }
        let period = j - k;
        while i <= k {
            last = i;
            i += period;
        }
    }
    last
}

/// Split point of the standard factorization: `letters[..split]` is the
/// left factor, `letters[split..]` the right one. `None` for single letters.
#[must_use]
pub fn standard_split(letters: &[Letter]) -> Option<usize> {
    if letters.len() < 2 {
        return None;
    }
    Some(1 + last_lyndon_factor_start(&letters[1..]))
}

impl LyndonWords {
    /// Standard factorization of the word at `compressed_index`, resolved to
    /// compressed indices of its children.
    ///
    /// # Errors
    ///
    /// [`Error::InvariantViolation`] for a leaf word, an out-of-range index,
    /// or a factor that is missing from the collection.
    pub fn factorize(&self, compressed_index: usize) -> Result<Bracket> {
        let word = self.get(compressed_index).ok_or_else(|| {
            Error::invariant(format!("no Lyndon word at index {compressed_index}"))
        })?;
        let letters = word.letters();
        let split = standard_split(letters).ok_or_else(|| {
            Error::invariant(format!(
                "factorization requested for leaf word {letters:?}"
            ))
        })?;
        let (u, v) = letters.split_at(split);
        let child = |part: &[Letter]| {
            self.find(part).map(|w| w.compressed_index()).ok_or_else(|| {
                Error::invariant(format!(
                    "factor {part:?} of {letters:?} is not in the collection"
                ))
            })
        };
        Ok(Bracket {
            left: child(u)?,
            right: child(v)?,
        })
    }

    /// Attach the standard bracketing to every composite word.
    ///
    /// Children always sit at strictly smaller depth, so they precede the
    /// parent in compressed order.
    ///
    /// # Errors
    ///
    /// As [`LyndonWords::factorize`].
    #[instrument(skip_all, fields(amount = self.amount()))]
    pub fn attach_brackets(&mut self) -> Result<()> {
        let brackets = self
            .iter()
            .filter(|w| !w.is_leaf())
            .map(|w| Ok((w.compressed_index(), self.factorize(w.compressed_index())?)))
            .collect::<Result<Vec<_>>>()?;
        let attached = brackets.len();
        let words = self.words_mut();
        for (index, bracket) in brackets {
            words[index].set_bracket(bracket);
        }
        debug!(attached, "attached standard brackets");
        Ok(())
    }

    /// Bracket tree of the word at `compressed_index`.
    ///
    /// # Errors
    ///
    /// [`Error::InvariantViolation`] if the index is out of range or a
    /// composite word on the way down has no bracket attached.
    pub fn bracket_expr(&self, compressed_index: usize) -> Result<BracketExpr> {
        let word = self.get(compressed_index).ok_or_else(|| {
            Error::invariant(format!("no Lyndon word at index {compressed_index}"))
        })?;
        if let [letter] = word.letters() {
            return Ok(BracketExpr::Letter(*letter));
        }
        let bracket = word.bracket().ok_or_else(|| {
            Error::invariant(format!(
                "word {:?} has no bracket attached",
                word.letters()
            ))
        })?;
        Ok(BracketExpr::Bracket(
            Box::new(self.bracket_expr(bracket.left)?),
            Box::new(self.bracket_expr(bracket.right)?),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::LyndonSpec;
    use crate::word::is_lyndon;

    fn expr_of(words: &LyndonWords, letters: &[Letter]) -> String {
        let w = words.find(letters).unwrap();
        words.bracket_expr(w.compressed_index()).unwrap().to_string()
    }

    #[test]
    fn splits() {
        assert_eq!(standard_split(&[0]), None);
        assert_eq!(standard_split(&[0, 1]), Some(1));
        assert_eq!(standard_split(&[0, 0, 1]), Some(1));
        assert_eq!(standard_split(&[0, 1, 1]), Some(2));
        assert_eq!(standard_split(&[0, 0, 1, 0, 1]), Some(3));
        assert_eq!(standard_split(&[0, 1, 0, 1, 1]), Some(2));
        assert_eq!(standard_split(&[0, 2, 1]), Some(2));
        assert_eq!(standard_split(&[0, 1, 2]), Some(1));
    }

    #[test]
    fn split_is_longest_lyndon_suffix() {
        let words = LyndonWords::generate(LyndonSpec::new(3, 5).unwrap()).unwrap();
        for w in words.iter().filter(|w| !w.is_leaf()) {
            let letters = w.letters();
            let expected = (1..letters.len())
                .find(|&s| is_lyndon(&letters[s..]))
                .unwrap();
            assert_eq!(standard_split(letters), Some(expected), "{letters:?}");
        }
    }

    #[test]
    fn known_brackets() {
        let words = LyndonWords::with_brackets(LyndonSpec::new(2, 5).unwrap()).unwrap();
        assert_eq!(expr_of(&words, &[1]), "1");
        assert_eq!(expr_of(&words, &[0, 1]), "[0,1]");
        assert_eq!(expr_of(&words, &[0, 1, 1]), "[[0,1],1]");
        assert_eq!(expr_of(&words, &[0, 0, 1, 1]), "[0,[[0,1],1]]");
        assert_eq!(expr_of(&words, &[0, 0, 1, 0, 1]), "[[0,[0,1]],[0,1]]");
        assert_eq!(expr_of(&words, &[0, 1, 0, 1, 1]), "[[0,1],[[0,1],1]]");
    }

    #[test]
    fn children_concatenate_to_parent() {
        let words = LyndonWords::with_brackets(LyndonSpec::new(3, 4).unwrap()).unwrap();
        assert!(words.has_brackets());
        for w in words.iter() {
            match w.bracket() {
                None => assert!(w.is_leaf()),
                Some(b) => {
                    assert!(b.left < w.compressed_index());
                    assert!(b.right < w.compressed_index());
                    let mut joined = words[b.left].letters().to_vec();
                    joined.extend_from_slice(words[b.right].letters());
                    assert_eq!(joined, w.letters());
                }
            }
        }
    }

    #[test]
    fn leaf_factorization_is_an_invariant_violation() {
        let words = LyndonWords::generate(LyndonSpec::new(2, 2).unwrap()).unwrap();
        assert!(matches!(
            words.factorize(0),
            Err(Error::InvariantViolation(_))
        ));
        assert!(matches!(
            words.factorize(99),
            Err(Error::InvariantViolation(_))
        ));
    }

    #[test]
    fn bracket_expr_requires_attached_brackets() {
        let words = LyndonWords::generate(LyndonSpec::new(2, 2).unwrap()).unwrap();
        assert!(!words.has_brackets());
        assert_eq!(words.bracket_expr(1).unwrap(), BracketExpr::Letter(1));
        assert!(words.bracket_expr(2).is_err());
    }
}
