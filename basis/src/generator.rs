//! Lyndon word enumeration by Duval's algorithm.
//!
//! J.-P. Duval, *Génération d'une section des classes de conjugaison et
//! arbre des mots de Lyndon de longueur bornée*, Theor. Comput. Sci. 1988.
//!
//! Starting from the single letter `0`, each step
//!
//! 1. emits the current word,
//! 2. extends it to length `depth` by repeating its own prefix periodically,
//! 3. strips trailing maximal letters,
//! 4. increments the last remaining letter.
//!
//! The emitted sequence is every Lyndon word of length `1..=depth` in
//! lexicographic order, each exactly once, in amortized constant time per
//! letter written. Filing each word under its length therefore leaves every
//! depth class lexicographically sorted.

use crate::error::Result;
use crate::spec::LyndonSpec;
use crate::word::Letter;
use crate::words::LyndonWords;
use tracing::{debug, instrument};

/// Enumerate every Lyndon word of `spec` and index the result.
///
/// # Errors
///
/// [`Error::IndexOverflow`](crate::Error::IndexOverflow) if the tensor
/// algebra of `spec` is not addressable in `usize`.
#[instrument(skip_all, fields(alphabet_size = spec.alphabet_size(), depth = spec.depth()))]
pub fn generate(spec: LyndonSpec) -> Result<LyndonWords> {
    // Fail before any work if flat indices cannot be represented.
    spec.signature_channels()?;

    let mut classes = duval(spec.alphabet_size(), spec.depth());
    debug!(
        per_depth = ?classes.iter().map(Vec::len).collect::<Vec<_>>(),
        "generated Lyndon words"
    );
    classes.shrink_to_fit();
    LyndonWords::from_depth_classes(spec, classes)
}

/// Duval's successor loop, returning the words grouped by length.
///
/// A one-letter alphabet has the single Lyndon word `0`; its later depth
/// classes are empty and left out.
fn duval(alphabet_size: usize, depth: usize) -> Vec<Vec<Vec<Letter>>> {
    if alphabet_size == 1 {
        return vec![vec![vec![0]]];
    }
    let max_letter = alphabet_size - 1;
    let mut classes: Vec<Vec<Vec<Letter>>> = vec![Vec::new(); depth];
    let mut word: Vec<Letter> = Vec::with_capacity(depth);
    word.push(0);

    loop {
        classes[word.len() - 1].push(word.clone());

        let period = word.len();
        for i in period..depth {
            let letter = word[i - period];
            word.push(letter);
        }
        while word.last() == Some(&max_letter) {
            word.pop();
        }
        match word.last_mut() {
            Some(last) => *last += 1,
            None => break,
        }
    }
    classes
}
