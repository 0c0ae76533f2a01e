//! Process-wide memoization of derivations.
//!
//! A derivation is a pure function of `(spec, mode)`, so the result is
//! computed once and shared behind an [`Arc`]. The cached collection has
//! already had its transient anagram data reclaimed.

use crate::error::Result;
use crate::spec::{LyndonMode, LyndonSpec};
use crate::transform::TransformEntry;
use crate::words::LyndonWords;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tracing::{debug, instrument, warn};

type CacheMap = HashMap<(LyndonSpec, LyndonMode), Arc<LyndonInfo>>;

/// Everything a numeric consumer needs for one spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyndonInfo {
    mode: LyndonMode,
    words: LyndonWords,
    transforms: Vec<TransformEntry>,
}

impl LyndonInfo {
    /// Run the derivation without touching the cache.
    ///
    /// [`LyndonMode::Words`] generates the words only and leaves the
    /// transform list empty.
    ///
    /// # Errors
    ///
    /// Any error of generation, bracketing or transform derivation.
    #[instrument(skip_all, fields(alphabet_size = spec.alphabet_size(), depth = spec.depth(), mode = ?mode))]
    pub fn derive(spec: LyndonSpec, mode: LyndonMode) -> Result<Self> {
        let (words, transforms) = match mode {
            LyndonMode::Words => (LyndonWords::generate(spec)?, Vec::new()),
            LyndonMode::Brackets => {
                let mut words = LyndonWords::with_brackets(spec)?;
                let transforms = words.to_lyndon_basis()?;
                (words, transforms)
            }
        };
        Ok(Self {
            mode,
            words,
            transforms,
        })
    }

    /// Cached derivation for `(spec, mode)`.
    ///
    /// Repeated calls with the same arguments return the same `Arc`.
    /// Failed derivations are not cached.
    ///
    /// Entries are never evicted. The cache holds one derivation per
    /// distinct `(spec, mode)` pair requested since the last
    /// [`clear_cache`], so its size is bounded only by how many pairs the
    /// caller uses.
    ///
    /// # Errors
    ///
    /// As [`LyndonInfo::derive`].
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use lyndon_basis::{LyndonInfo, LyndonMode, LyndonSpec};
    ///
    /// let spec = LyndonSpec::new(2, 4).unwrap();
    /// let a = LyndonInfo::get(spec, LyndonMode::Brackets).unwrap();
    /// let b = LyndonInfo::get(spec, LyndonMode::Brackets).unwrap();
    /// assert!(Arc::ptr_eq(&a, &b));
    /// assert_eq!(a.words().amount(), 8);
    /// ```
    pub fn get(spec: LyndonSpec, mode: LyndonMode) -> Result<Arc<Self>> {
        if let Some(hit) = lock().get(&(spec, mode)) {
            return Ok(Arc::clone(hit));
        }
        // Derive outside the lock; a racing thread may do the same work,
        // the first insert wins.
        let info = Arc::new(Self::derive(spec, mode)?);
        let mut cache = lock();
        let shared = Arc::clone(cache.entry((spec, mode)).or_insert(info));
        debug!(cached = cache.len(), "cached Lyndon derivation");
        Ok(shared)
    }

    /// The mode this derivation ran in.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> LyndonMode {
        self.mode
    }

    /// The spec this derivation ran for.
    #[inline]
    #[must_use]
    pub const fn spec(&self) -> &LyndonSpec {
        self.words.spec()
    }

    /// The word collection; bracketed in [`LyndonMode::Brackets`].
    #[inline]
    #[must_use]
    pub const fn words(&self) -> &LyndonWords {
        &self.words
    }

    /// The transform entries; empty in [`LyndonMode::Words`].
    #[inline]
    #[must_use]
    pub fn transforms(&self) -> &[TransformEntry] {
        &self.transforms
    }
}

fn cache() -> &'static Mutex<CacheMap> {
    static CACHE: OnceLock<Mutex<CacheMap>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn lock() -> MutexGuard<'static, CacheMap> {
    cache().lock().unwrap_or_else(|poisoned| {
        warn!("Lyndon cache mutex poisoned; recovering");
        poisoned.into_inner()
    })
}

/// Drop every cached derivation. Outstanding `Arc`s stay valid.
///
/// This is the only way to release memory held by the cache.
pub fn clear_cache() {
    let mut cache = lock();
    let dropped = cache.len();
    cache.clear();
    debug!(dropped, "cleared Lyndon cache");
}
