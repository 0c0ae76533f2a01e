//! Sparse integer polynomials over words.
//!
//! An [`Expansion`] is an element of the tensor algebra with integer
//! coefficients: a map from words to non-zero `i64` coefficients. Products
//! are concatenation products, so the bracket `[u, v]` expands to
//! `u·v − v·u`. All arithmetic is checked; zero coefficients are never
//! stored.

use crate::error::{Error, Result};
use crate::word::Letter;
use std::collections::btree_map::{self, BTreeMap};

/// Integer linear combination of words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    terms: BTreeMap<Vec<Letter>, i64>,
}

impl Expansion {
    /// The zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// A single word with coefficient 1.
    #[must_use]
    pub fn word(letters: &[Letter]) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(letters.to_vec(), 1);
        Self { terms }
    }

    /// Coefficient of `letters` (zero when absent).
    #[must_use]
    pub fn coefficient(&self, letters: &[Letter]) -> i64 {
        self.terms.get(letters).copied().unwrap_or(0)
    }

    /// Number of words with a non-zero coefficient.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// `true` for the zero polynomial.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in lexicographic word order.
    pub fn iter(&self) -> btree_map::Iter<'_, Vec<Letter>, i64> {
        self.terms.iter()
    }

    /// Add `coefficient · letters` in place.
    ///
    /// # Errors
    ///
    /// [`Error::CoefficientOverflow`] if the sum leaves `i64`.
    pub fn add_term(&mut self, letters: Vec<Letter>, coefficient: i64) -> Result<()> {
        if coefficient == 0 {
            return Ok(());
        }
        match self.terms.entry(letters) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(coefficient);
            }
            btree_map::Entry::Occupied(mut slot) => {
                let sum = slot
                    .get()
                    .checked_add(coefficient)
                    .ok_or(Error::CoefficientOverflow {
                        context: "accumulating an expansion",
                    })?;
                if sum == 0 {
                    slot.remove();
                } else {
                    *slot.get_mut() = sum;
                }
            }
        }
        Ok(())
    }

    /// Concatenation product `self · other`, scaled by `sign`.
    fn accumulate_product(&self, other: &Self, sign: i64, into: &mut Self) -> Result<()> {
        for (u, &cu) in &self.terms {
            for (v, &cv) in &other.terms {
                let c = cu
                    .checked_mul(cv)
                    .and_then(|c| c.checked_mul(sign))
                    .ok_or(Error::CoefficientOverflow {
                        context: "multiplying expansions",
                    })?;
                let mut uv = Vec::with_capacity(u.len() + v.len());
                uv.extend_from_slice(u);
                uv.extend_from_slice(v);
                into.add_term(uv, c)?;
            }
        }
        Ok(())
    }

    /// Concatenation product `self · other`.
    ///
    /// # Errors
    ///
    /// [`Error::CoefficientOverflow`] if a coefficient leaves `i64`.
    pub fn product(&self, other: &Self) -> Result<Self> {
        let mut out = Self::zero();
        self.accumulate_product(other, 1, &mut out)?;
        Ok(out)
    }

    /// Lie bracket `self · other − other · self`.
    ///
    /// # Errors
    ///
    /// [`Error::CoefficientOverflow`] if a coefficient leaves `i64`.
    ///
    /// # Example
    ///
    /// ```
    /// use lyndon_basis::Expansion;
    ///
    /// let ab = Expansion::word(&[0]).commutator(&Expansion::word(&[1])).unwrap();
    /// assert_eq!(ab.coefficient(&[0, 1]), 1);
    /// assert_eq!(ab.coefficient(&[1, 0]), -1);
    /// ```
    pub fn commutator(&self, other: &Self) -> Result<Self> {
        let mut out = Self::zero();
        self.accumulate_product(other, 1, &mut out)?;
        other.accumulate_product(self, -1, &mut out)?;
        Ok(out)
    }
}

impl<'a> IntoIterator for &'a Expansion {
    type Item = (&'a Vec<Letter>, &'a i64);
    type IntoIter = btree_map::Iter<'a, Vec<Letter>, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
