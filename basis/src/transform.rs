//! The exact linear map from tensor-algebra coordinates to Lyndon-basis
//! coordinates.
//!
//! Write `P_w` for the bracket polynomial of the Lyndon word `w`. A Lie
//! element `x = Σ a_w P_w` is known through its tensor coordinates `x_u`;
//! the transform recovers the `a_w`.
//!
//! For the standard bracketing, `P_w = w + (words lexicographically greater
//! than w)`. Restricted to the Lyndon members `l_0 < l_1 < …` of one anagram
//! class, the matrix `M[i][j] = coeff(l_j, P_{l_i})` is therefore upper
//! triangular with unit diagonal, and
//!
//! ```text
//! x_{l_j} = Σ_{i ≤ j} a_i · M[i][j]
//! a_j     = (x_{l_j} − Σ_{i < j} a_i · M[i][j]) / M[j][j]
//! ```
//!
//! Substituting in class order expresses every `a_j` as an integer
//! combination of the Lyndon coordinates `x_{l_t}`. Each non-zero
//! coefficient becomes one [`TransformEntry`].
//!
//! Consumers apply it as
//!
//! ```text
//! basis[e.basis_index]       += e.coefficient * word[e.word_tensor_index]   // forward
//! word_grad[e.word_tensor_index] += e.coefficient * basis_grad[e.basis_index] // transpose
//! ```
//!
//! where `word` is the depth level of the tensor that matches the depth of
//! the basis word.

use crate::anagram::{AnagramClass, AnagramClasses};
use crate::error::{Error, Result};
use crate::expansion::Expansion;
use crate::word::AnagramInfo;
use crate::words::LyndonWords;
use tracing::{debug, instrument, trace};

/// One sparse entry of the tensor-to-Lyndon-basis map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformEntry {
    /// `compressed_index` of the Lyndon basis element being produced.
    pub basis_index: usize,
    /// `tensor_algebra_index` of the contributing word, within its depth.
    pub word_tensor_index: usize,
    /// Exact integer weight.
    pub coefficient: i64,
}

fn overflow() -> Error {
    Error::CoefficientOverflow {
        context: "solving an anagram class",
    }
}

impl LyndonWords {
    /// Attach [`AnagramInfo`] to every word: its class number and the full
    /// expansion of its bracket polynomial.
    ///
    /// Expansions are built in compressed order from the children's
    /// expansions, so each bracket is multiplied out once.
    ///
    /// # Errors
    ///
    /// [`Error::InvariantViolation`] if brackets are missing or a word is
    /// absent from `classes`; [`Error::CoefficientOverflow`] if an expansion
    /// coefficient leaves `i64`.
    #[instrument(skip_all, fields(amount = self.amount(), classes = classes.len()))]
    pub fn attach_anagram_info(&mut self, classes: &AnagramClasses) -> Result<()> {
        let mut expansions: Vec<Expansion> = Vec::with_capacity(self.amount());
        let mut class_numbers = Vec::with_capacity(self.amount());
        for word in self.iter() {
            let class = classes.class_index(word.letters()).ok_or_else(|| {
                Error::invariant(format!("word {:?} has no anagram class", word.letters()))
            })?;
            class_numbers.push(class);
            let expansion = if word.is_leaf() {
                Expansion::word(word.letters())
            } else {
                let bracket = word.bracket().ok_or_else(|| {
                    Error::invariant(format!(
                        "word {:?} has no bracket attached",
                        word.letters()
                    ))
                })?;
                let (Some(left), Some(right)) =
                    (expansions.get(bracket.left), expansions.get(bracket.right))
                else {
                    return Err(Error::invariant(format!(
                        "children of {:?} do not precede it",
                        word.letters()
                    )));
                };
                left.commutator(right)?
            };
            expansions.push(expansion);
        }

        let terms: usize = expansions.iter().map(Expansion::len).sum();
        for ((word, expansion), class) in self
            .words_mut()
            .iter_mut()
            .zip(expansions)
            .zip(class_numbers)
        {
            word.set_extra(AnagramInfo { class, expansion });
        }
        debug!(terms, "attached bracket expansions");
        Ok(())
    }

    /// Derive the full transform list, then reclaim all [`AnagramInfo`].
    ///
    /// Brackets are attached first if they are missing. The transient data
    /// is dropped whether or not the derivation succeeds.
    ///
    /// # Errors
    ///
    /// [`Error::InvariantViolation`] if triangularity or integrality fails;
    /// [`Error::CoefficientOverflow`] if a coefficient leaves `i64`.
    ///
    /// # Example
    ///
    /// ```
    /// use lyndon_basis::{LyndonSpec, LyndonWords, TransformEntry};
    ///
    /// let mut words = LyndonWords::with_brackets(LyndonSpec::new(2, 2).unwrap()).unwrap();
    /// let transforms = words.to_lyndon_basis().unwrap();
    /// // Letters and [0,1] each read off their own coordinate.
    /// assert_eq!(transforms, vec![
    ///     TransformEntry { basis_index: 0, word_tensor_index: 0, coefficient: 1 },
    ///     TransformEntry { basis_index: 1, word_tensor_index: 1, coefficient: 1 },
    ///     TransformEntry { basis_index: 2, word_tensor_index: 1, coefficient: 1 },
    /// ]);
    /// assert!(!words.has_extra());
    /// ```
    #[instrument(skip_all, fields(alphabet_size = self.spec().alphabet_size(), depth = self.spec().depth()))]
    pub fn to_lyndon_basis(&mut self) -> Result<Vec<TransformEntry>> {
        if !self.has_brackets() {
            self.attach_brackets()?;
        }
        let classes = AnagramClasses::classify(self);
        let result = self
            .attach_anagram_info(&classes)
            .and_then(|()| BasisTransformer::new(self).derive(&classes));
        self.delete_extra();
        let transforms = result?;
        debug!(entries = transforms.len(), "derived Lyndon basis transform");
        Ok(transforms)
    }
}

/// Per-class triangular solver over words carrying [`AnagramInfo`].
#[derive(Debug, Clone, Copy)]
pub struct BasisTransformer<'a> {
    words: &'a LyndonWords,
}

impl<'a> BasisTransformer<'a> {
    /// Solver reading expansions from `words`.
    #[must_use]
    pub const fn new(words: &'a LyndonWords) -> Self {
        Self { words }
    }

    /// Solve every class and return the entries sorted by
    /// `(basis_index, word_tensor_index)`.
    ///
    /// # Errors
    ///
    /// As [`BasisTransformer::solve_class`].
    pub fn derive(&self, classes: &AnagramClasses) -> Result<Vec<TransformEntry>> {
        let mut entries = Vec::new();
        for class in classes {
            self.solve_class(class, &mut entries)?;
        }
        entries.sort_unstable();
        Ok(entries)
    }

    /// Lyndon-restricted expansion matrix of one class:
    /// `matrix[i][j]` is the coefficient of member `j` in the expansion of
    /// member `i`.
    ///
    /// # Errors
    ///
    /// [`Error::InvariantViolation`] if a member has no expansion attached.
    pub fn class_matrix(&self, class: &AnagramClass) -> Result<Vec<Vec<i64>>> {
        class
            .members()
            .iter()
            .map(|&i| {
                let expansion = self.words[i].expansion().ok_or_else(|| {
                    Error::invariant(format!(
                        "word {:?} has no expansion attached",
                        self.words[i].letters()
                    ))
                })?;
                Ok(class
                    .members()
                    .iter()
                    .map(|&j| expansion.coefficient(self.words[j].letters()))
                    .collect())
            })
            .collect()
    }

    /// Solve one class by forward substitution and append its entries.
    ///
    /// # Errors
    ///
    /// [`Error::InvariantViolation`] for a zero diagonal, a non-zero entry
    /// below it, or a non-integral quotient; [`Error::CoefficientOverflow`]
    /// if a coefficient leaves `i64`.
    pub fn solve_class(&self, class: &AnagramClass, out: &mut Vec<TransformEntry>) -> Result<()> {
        let members = class.members();
        let matrix = self.class_matrix(class)?;
        let m = members.len();

        for (i, row) in matrix.iter().enumerate() {
            if row[i] == 0 {
                return Err(Error::invariant(format!(
                    "zero diagonal for word {:?}",
                    self.words[members[i]].letters()
                )));
            }
            if let Some(j) = row[..i].iter().position(|&c| c != 0) {
                return Err(Error::invariant(format!(
                    "expansion of {:?} reaches earlier Lyndon word {:?}",
                    self.words[members[i]].letters(),
                    self.words[members[j]].letters()
                )));
            }
        }

        // rows[j][t]: weight of the coordinate of member t in basis element j.
        let mut rows: Vec<Vec<i64>> = Vec::with_capacity(m);
        for j in 0..m {
            let mut row = vec![0i64; m];
            row[j] = 1;
            for (i, earlier) in rows.iter().enumerate() {
                let factor = matrix[i][j];
                if factor == 0 {
                    continue;
                }
                for (acc, &c) in row.iter_mut().zip(earlier) {
                    *acc = c
                        .checked_mul(factor)
                        .and_then(|p| acc.checked_sub(p))
                        .ok_or_else(overflow)?;
                }
            }
            let diagonal = matrix[j][j];
            for acc in &mut row {
                if acc.checked_rem(diagonal).ok_or_else(overflow)? != 0 {
                    return Err(Error::invariant(format!(
                        "non-integral coefficient {}/{} for word {:?}",
                        acc,
                        diagonal,
                        self.words[members[j]].letters()
                    )));
                }
                *acc = acc.checked_div(diagonal).ok_or_else(overflow)?;
            }
            rows.push(row);
        }

        let before = out.len();
        for (j, row) in rows.iter().enumerate() {
            for (t, &coefficient) in row.iter().enumerate() {
                if coefficient != 0 {
                    out.push(TransformEntry {
                        basis_index: members[j],
                        word_tensor_index: self.words[members[t]].tensor_algebra_index(),
                        coefficient,
                    });
                }
            }
        }
        trace!(
            key = ?class.key(),
            members = m,
            entries = out.len() - before,
            "solved anagram class"
        );
        Ok(())
    }
}
