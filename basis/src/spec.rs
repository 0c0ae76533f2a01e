//! The immutable `(alphabet_size, depth)` pair that drives every derivation.
//!
//! Also hosts the closed-form dimension counts: the size of the truncated
//! tensor algebra (signature channels) and the number of Lyndon words up to
//! a given length (log-signature channels, via the necklace formula).
//!
//! # Example
//!
//! ```
//! use lyndon_basis::LyndonSpec;
//!
//! let spec = LyndonSpec::new(2, 3).unwrap();
//! assert_eq!(spec.signature_channels().unwrap(), 2 + 4 + 8);
//! assert_eq!(spec.logsignature_channels().unwrap(), 2 + 1 + 2);
//! assert!(LyndonSpec::new(0, 3).is_err());
//! ```

use crate::error::{Error, Result};
use core::fmt;

/// Alphabet size and maximum word length of a Lyndon-basis derivation.
///
/// # Invariant
///
/// Both fields are at least 1. The only constructor is [`LyndonSpec::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LyndonSpec {
    alphabet_size: usize,
    depth: usize,
}

/// Which parts of the Lyndon structure a derivation should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LyndonMode {
    /// Lyndon words and their indices only.
    Words,
    /// Words plus their standard bracketing and the basis transform.
    Brackets,
}

impl LyndonSpec {
    /// Validate and build a spec.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSpec`] if `alphabet_size` or `depth` is zero.
    pub fn new(alphabet_size: usize, depth: usize) -> Result<Self> {
        if alphabet_size == 0 || depth == 0 {
            return Err(Error::InvalidSpec {
                alphabet_size,
                depth,
            });
        }
        Ok(Self {
            alphabet_size,
            depth,
        })
    }

    /// Number of letters in the alphabet.
    #[inline]
    #[must_use]
    pub const fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Maximum word length.
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Number of words (Lyndon or not) of exactly `level` letters.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOverflow`] if `alphabet_size^level` exceeds `usize`.
    pub fn words_at(&self, level: usize) -> Result<usize> {
        if self.alphabet_size == 1 {
            return Ok(1);
        }
        u32::try_from(level)
            .ok()
            .and_then(|exp| self.alphabet_size.checked_pow(exp))
            .ok_or_else(|| self.overflow())
    }

    /// Position of the first depth-`level` word inside a flat concatenation
    /// of the levels `1..=depth`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOverflow`] if the offset exceeds `usize`.
    pub fn level_offset(&self, level: usize) -> Result<usize> {
        if self.alphabet_size == 1 {
            return Ok(level.saturating_sub(1));
        }
        (1..level).try_fold(0usize, |acc, l| {
            acc.checked_add(self.words_at(l)?)
                .ok_or_else(|| self.overflow())
        })
    }

    /// Size of the truncated tensor algebra without its scalar term:
    /// `Σ_{d=1..depth} alphabet_size^d`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOverflow`] if the total exceeds `usize`.
    pub fn signature_channels(&self) -> Result<usize> {
        self.level_offset(self.depth)?
            .checked_add(self.words_at(self.depth)?)
            .ok_or_else(|| self.overflow())
    }

    /// Number of Lyndon words of length at most `depth`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOverflow`] if the count exceeds `usize`.
    pub fn logsignature_channels(&self) -> Result<usize> {
        if self.alphabet_size == 1 {
            return Ok(1);
        }
        (1..=self.depth).try_fold(0usize, |acc, level| {
            acc.checked_add(self.lyndon_count(level)?)
                .ok_or_else(|| self.overflow())
        })
    }

    /// Number of Lyndon words of exactly `level` letters, by the necklace
    /// formula `(1/n) Σ_{d | n} μ(d) k^(n/d)`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOverflow`] if an intermediate power exceeds `i128`.
    pub fn lyndon_count(&self, level: usize) -> Result<usize> {
        if level == 0 {
            return Ok(0);
        }
        // Over one letter only the letter itself is Lyndon.
        if self.alphabet_size == 1 {
            return Ok(usize::from(level == 1));
        }
        let k = i128::try_from(self.alphabet_size).map_err(|_| self.overflow())?;
        let mut total: i128 = 0;
        for d in (1..=level).filter(|d| level % d == 0) {
            let mu = mobius(d);
            if mu == 0 {
                continue;
            }
            let exp = u32::try_from(level / d).map_err(|_| self.overflow())?;
            let term = k.checked_pow(exp).ok_or_else(|| self.overflow())?;
            total = if mu > 0 {
                total.checked_add(term)
            } else {
                total.checked_sub(term)
            }
            .ok_or_else(|| self.overflow())?;
        }
        let level = i128::try_from(level).map_err(|_| self.overflow())?;
        usize::try_from(total / level).map_err(|_| self.overflow())
    }

    fn overflow(&self) -> Error {
        Error::IndexOverflow {
            alphabet_size: self.alphabet_size,
            depth: self.depth,
        }
    }
}

impl fmt::Display for LyndonSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LyndonSpec(alphabet_size={}, depth={})",
            self.alphabet_size, self.depth
        )
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LyndonSpec {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            alphabet_size: usize,
            depth: usize,
        }
        let raw = Raw::deserialize(deserializer)?;
        LyndonSpec::new(raw.alphabet_size, raw.depth).map_err(serde::de::Error::custom)
    }
}

/// Möbius function by trial division; `n` is at most the depth.
fn mobius(mut n: usize) -> i8 {
    let mut sign = 1i8;
    let mut p = 2;
    while p * p <= n {
        if n % p == 0 {
            n /= p;
            if n % p == 0 {
                return 0;
            }
            sign = -sign;
        }
        p += 1;
    }
    if n > 1 {
        sign = -sign;
    }
    sign
}
