//! Naive reference computations for cross-checking `lyndon-basis`.
//!
//! Nothing here is fast. Every result is computed the obvious way so it can
//! serve as an oracle:
//!
//! - Lyndon words by filtering all `k^len` words with a rotation test
//! - standard factorization by trying every split
//! - bracket polynomials by multiplying the tree out recursively
//! - the basis transform by inverting the full per-depth matrix over the
//!   rationals, with no use of anagram classes or triangularity

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Failures of the reference derivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// The Lyndon-restricted matrix at this depth is not invertible.
    #[error("Lyndon matrix at depth {depth} is singular")]
    Singular {
        /// Depth of the offending matrix.
        depth: usize,
    },
    /// The inverse has an entry that is not an integer.
    #[error("inverse at depth {depth} has non-integral entry {value}")]
    NonIntegral {
        /// Depth of the offending matrix.
        depth: usize,
        /// The entry, rendered as a fraction.
        value: String,
    },
    /// An entry does not fit in `i64`.
    #[error("inverse at depth {depth} has an entry outside i64")]
    Overflow {
        /// Depth of the offending matrix.
        depth: usize,
    },
}

/// Integer polynomial over words with arbitrary-precision coefficients.
pub type Poly = BTreeMap<Vec<usize>, BigInt>;

/// `true` if `w` is strictly smaller than each of its proper rotations.
#[must_use]
pub fn is_lyndon(w: &[usize]) -> bool {
    if w.is_empty() {
        return false;
    }
    (1..w.len()).all(|r| {
        let mut rotated = w[r..].to_vec();
        rotated.extend_from_slice(&w[..r]);
        w < rotated.as_slice()
    })
}

/// Every word of length `len` over `0..k`, lexicographically.
#[must_use]
pub fn all_words(k: usize, len: usize) -> Vec<Vec<usize>> {
    let mut words = vec![Vec::new()];
    for _ in 0..len {
        words = words
            .into_iter()
            .flat_map(|w| {
                (0..k).map(move |l| {
                    let mut next = w.clone();
                    next.push(l);
                    next
                })
            })
            .collect();
    }
    words
}

/// Lyndon words of length exactly `len`, lexicographically.
#[must_use]
pub fn lyndon_words_of_length(k: usize, len: usize) -> Vec<Vec<usize>> {
    all_words(k, len).into_iter().filter(|w| is_lyndon(w)).collect()
}

/// Lyndon words of length `1..=n`, by length then lexicographically.
#[must_use]
pub fn lyndon_words(k: usize, n: usize) -> Vec<Vec<usize>> {
    (1..=n).flat_map(|len| lyndon_words_of_length(k, len)).collect()
}

/// Lexicographic rank of `w` among words of its length over `0..k`.
#[must_use]
pub fn rank(k: usize, w: &[usize]) -> usize {
    w.iter().fold(0, |acc, &l| acc * k + l)
}

/// Standard factorization `(u, v)` of a Lyndon word, with `v` its longest
/// proper Lyndon suffix. `None` for single letters.
#[must_use]
pub fn standard_factorization(w: &[usize]) -> Option<(Vec<usize>, Vec<usize>)> {
    (1..w.len())
        .find(|&s| is_lyndon(&w[s..]))
        .map(|s| (w[..s].to_vec(), w[s..].to_vec()))
}

/// Bracket tree of a Lyndon word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tree {
    /// A letter.
    Leaf(usize),
    /// `[left, right]`.
    Node(Box<Tree>, Box<Tree>),
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(l) => write!(f, "{l}"),
            Self::Node(l, r) => write!(f, "[{l},{r}]"),
        }
    }
}

/// Standard bracketing of `w`, built by repeated factorization.
#[must_use]
pub fn bracket(w: &[usize]) -> Tree {
    match standard_factorization(w) {
        Some((u, v)) => Tree::Node(Box::new(bracket(&u)), Box::new(bracket(&v))),
        None => Tree::Leaf(w.first().copied().unwrap_or_default()),
    }
}

fn concat_product(a: &Poly, b: &Poly, sign: i64, out: &mut Poly) {
    for (u, cu) in a {
        for (v, cv) in b {
            let mut uv = u.clone();
            uv.extend_from_slice(v);
            let slot = out.entry(uv).or_insert_with(BigInt::zero);
            *slot += cu * cv * BigInt::from(sign);
        }
    }
}

/// Expand a bracket tree into a polynomial over words.
#[must_use]
pub fn expand(tree: &Tree) -> Poly {
    match tree {
        Tree::Leaf(l) => {
            let mut p = Poly::new();
            p.insert(vec![*l], BigInt::one());
            p
        }
        Tree::Node(l, r) => {
            let (pl, pr) = (expand(l), expand(r));
            let mut out = Poly::new();
            concat_product(&pl, &pr, 1, &mut out);
            concat_product(&pr, &pl, -1, &mut out);
            out.retain(|_, c| !c.is_zero());
            out
        }
    }
}

/// Bracket polynomial of a Lyndon word.
#[must_use]
pub fn bracket_polynomial(w: &[usize]) -> Poly {
    expand(&bracket(w))
}

/// Inverse of a square matrix by Gauss-Jordan elimination. `None` if singular.
#[must_use]
pub fn invert(matrix: &[Vec<BigRational>]) -> Option<Vec<Vec<BigRational>>> {
    let n = matrix.len();
    let mut a: Vec<Vec<BigRational>> = matrix.to_vec();
    let mut inv: Vec<Vec<BigRational>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| if i == j { BigRational::one() } else { BigRational::zero() })
                .collect()
        })
        .collect();

    for col in 0..n {
        let pivot = (col..n).find(|&r| !a[r][col].is_zero())?;
        a.swap(col, pivot);
        inv.swap(col, pivot);

        let p = a[col][col].clone();
        for c in 0..n {
            a[col][c] = &a[col][c] / &p;
            inv[col][c] = &inv[col][c] / &p;
        }
        for r in 0..n {
            if r == col || a[r][col].is_zero() {
                continue;
            }
            let factor = a[r][col].clone();
            for c in 0..n {
                let da = &factor * &a[col][c];
                let di = &factor * &inv[col][c];
                a[r][c] -= da;
                inv[r][c] -= di;
            }
        }
    }
    Some(inv)
}

/// Reference tensor-to-Lyndon-basis map as sorted
/// `(basis_index, word_tensor_index, coefficient)` triples.
///
/// At each depth, with Lyndon words `l_0 < l_1 < …`, the matrix
/// `A[i][j] = coeff(l_j, P_{l_i})` maps basis coefficients to Lyndon
/// coordinates as `x = Aᵀ a`, so `a = (A⁻¹)ᵀ x`.
///
/// # Errors
///
/// [`VerifyError`] if a depth matrix is singular or its inverse is not an
/// `i64` integer matrix.
pub fn reference_transform(k: usize, n: usize) -> Result<Vec<(usize, usize, i64)>, VerifyError> {
    let mut out = Vec::new();
    let mut offset = 0;
    for depth in 1..=n {
        let words = lyndon_words_of_length(k, depth);
        let polys: Vec<Poly> = words.iter().map(|w| bracket_polynomial(w)).collect();
        let matrix: Vec<Vec<BigRational>> = polys
            .iter()
            .map(|p| {
                words
                    .iter()
                    .map(|w| BigRational::from_integer(p.get(w).cloned().unwrap_or_default()))
                    .collect()
            })
            .collect();
        let inverse = invert(&matrix).ok_or(VerifyError::Singular { depth })?;

        for (i, _) in words.iter().enumerate() {
            for (t, word) in words.iter().enumerate() {
                let value = &inverse[t][i];
                if value.is_zero() {
                    continue;
                }
                if !value.is_integer() {
                    return Err(VerifyError::NonIntegral {
                        depth,
                        value: value.to_string(),
                    });
                }
                let coefficient = value
                    .to_integer()
                    .to_i64()
                    .ok_or(VerifyError::Overflow { depth })?;
                out.push((offset + i, rank(k, word), coefficient));
            }
        }
        offset += words.len();
    }
    out.sort_unstable();
    Ok(out)
}
