//! Lyndon words, Hall-basis bracketing and the Lyndon-basis transform.
//!
//! Given an alphabet size `k` and a depth `n`, this crate enumerates every
//! Lyndon word of length at most `n`, brackets each one by its standard
//! factorization, and derives the exact sparse linear map that expresses a
//! Lie element of the truncated tensor algebra in the Lyndon basis. That map
//! is what compresses a path signature into a log-signature.
//!
//! Everything here is combinatorial: no tensor values are touched, all
//! coefficients are exact integers and the result depends only on `(k, n)`.
//!
//! # Pipeline
//!
//! ```text
//! LyndonSpec ─► generate (Duval) ─► attach_brackets ─► AnagramClasses
//!                                                         │
//!              Vec<TransformEntry> ◄─ BasisTransformer ◄──┘
//! ```
//!
//! | Stage | Entry point |
//! |-------|-------------|
//! | word generation | [`LyndonWords::generate`] |
//! | standard bracketing | [`LyndonWords::attach_brackets`] |
//! | anagram classes | [`AnagramClasses::classify`] |
//! | basis transform | [`LyndonWords::to_lyndon_basis`] |
//! | memoized bundle | [`LyndonInfo::get`] |
//!
//! # Indices
//!
//! | Value | Counts over |
//! |-------|-------------|
//! | `compressed_index` | all Lyndon words, depth first then lexicographic |
//! | `tensor_algebra_index` | all words of one depth, lexicographic |
//! | `flat_tensor_index` | all words of depths `1..=n`, depth first |
//!
//! # Example
//!
//! ```
//! use lyndon_basis::{lyndon_brackets, lyndon_words, lyndon_words_to_basis_transform};
//!
//! assert_eq!(
//!     lyndon_words(2, 3).unwrap(),
//!     vec![vec![0], vec![1], vec![0, 1], vec![0, 0, 1], vec![0, 1, 1]]
//! );
//!
//! let brackets: Vec<String> = lyndon_brackets(2, 3)
//!     .unwrap()
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//! assert_eq!(brackets, ["0", "1", "[0,1]", "[0,[0,1]]", "[[0,1],1]"]);
//!
//! let transforms = lyndon_words_to_basis_transform(3, 3).unwrap();
//! assert!(transforms.iter().all(|e| e.coefficient != 0));
//! ```
//!
//! # Logging
//!
//! Stages emit `tracing` spans and `debug!` events with word, class and
//! entry counts. No subscriber is installed by the library.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

// Errors
pub mod error;

// Spec, modes and closed-form counts
pub mod spec;

// Letters, words and the per-word record
pub mod word;

// Word arena (depth classes, lookup, extra reclamation)
pub mod words;

// Duval enumeration
pub mod generator;

// Standard factorization and bracket trees
pub mod bracket;

// Anagram partition
pub mod anagram;

// Integer polynomials over words
pub mod expansion;

// Triangular solve per anagram class
pub mod transform;

// Memoized derivations
pub mod cache;

pub use anagram::{anagram_key, AnagramClass, AnagramClasses};
pub use bracket::{standard_split, BracketExpr};
pub use cache::{clear_cache, LyndonInfo};
pub use error::{Error, Result};
pub use expansion::Expansion;
pub use spec::{LyndonMode, LyndonSpec};
pub use transform::{BasisTransformer, TransformEntry};
pub use word::{is_lyndon, tensor_algebra_index, AnagramInfo, Bracket, Letter, LyndonWord};
pub use words::LyndonWords;

/// Prelude module for convenient imports.
///
/// ```
/// use lyndon_basis::prelude::*;
/// ```
pub mod prelude {
    pub use crate::anagram::{AnagramClass, AnagramClasses};
    pub use crate::bracket::BracketExpr;
    pub use crate::cache::LyndonInfo;
    pub use crate::error::{Error, Result};
    pub use crate::spec::{LyndonMode, LyndonSpec};
    pub use crate::transform::TransformEntry;
    pub use crate::word::{Letter, LyndonWord};
    pub use crate::words::LyndonWords;
}

/// Letters of every Lyndon word of length `1..=depth`, in compressed order.
///
/// # Errors
///
/// [`Error::InvalidSpec`] for a zero argument, or any generation error.
pub fn lyndon_words(alphabet_size: usize, depth: usize) -> Result<Vec<Vec<Letter>>> {
    let spec = LyndonSpec::new(alphabet_size, depth)?;
    let info = LyndonInfo::get(spec, LyndonMode::Words)?;
    Ok(info.words().iter().map(|w| w.letters().to_vec()).collect())
}

/// Bracket tree of every Lyndon word of length `1..=depth`, in compressed
/// order.
///
/// # Errors
///
/// [`Error::InvalidSpec`] for a zero argument, or any derivation error.
pub fn lyndon_brackets(alphabet_size: usize, depth: usize) -> Result<Vec<BracketExpr>> {
    let spec = LyndonSpec::new(alphabet_size, depth)?;
    let info = LyndonInfo::get(spec, LyndonMode::Brackets)?;
    let words = info.words();
    (0..words.amount()).map(|i| words.bracket_expr(i)).collect()
}

/// Sparse map from tensor-algebra coordinates to Lyndon-basis coordinates.
///
/// # Errors
///
/// [`Error::InvalidSpec`] for a zero argument, or any derivation error.
pub fn lyndon_words_to_basis_transform(
    alphabet_size: usize,
    depth: usize,
) -> Result<Vec<TransformEntry>> {
    let spec = LyndonSpec::new(alphabet_size, depth)?;
    let info = LyndonInfo::get(spec, LyndonMode::Brackets)?;
    Ok(info.transforms().to_vec())
}

/// Size of the truncated tensor algebra, `Σ_{d=1..depth} alphabet_size^d`.
///
/// # Errors
///
/// [`Error::InvalidSpec`] for a zero argument; [`Error::IndexOverflow`] if
/// the size exceeds `usize`.
pub fn signature_channels(alphabet_size: usize, depth: usize) -> Result<usize> {
    LyndonSpec::new(alphabet_size, depth)?.signature_channels()
}

/// Number of Lyndon words of length `1..=depth`.
///
/// # Errors
///
/// [`Error::InvalidSpec`] for a zero argument; [`Error::IndexOverflow`] if
/// the count exceeds `usize`.
pub fn logsignature_channels(alphabet_size: usize, depth: usize) -> Result<usize> {
    LyndonSpec::new(alphabet_size, depth)?.logsignature_channels()
}
