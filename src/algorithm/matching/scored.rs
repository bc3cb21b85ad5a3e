//! Generic best-score greedy matching
//!
//! A single left-to-right pass: for every record `i` not yet matched, all later
//! unmatched records `j` are scored with `score(i, j)` and the best one is
//! committed if its score is strictly positive. The pass is greedy per index,
//! not a globally optimal assignment; results downstream depend on exactly this
//! order, so it must stay that way.
//!
//! Scores of zero, negative scores and NaN mark a pair as ineligible. Among
//! equal best scores the lowest `j` wins. Committed pairs are finally ranked by
//! descending score; the sort is stable, so equal scores keep ascending left
//! index order.

use std::fmt;

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::algorithm::matching::types::{ScoredMatch, ScoredPair};

/// Breach of the "every record in at most one pair" contract
///
/// This never describes bad input: it means the matching pass itself is
/// wrong, and the matcher panics with it rather than returning it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A record was paired with itself
    SelfPair {
        /// Source index of the record
        index: usize,
    },
    /// A record takes part in two committed pairs
    Reused {
        /// Source index of the record
        index: usize,
        /// Commit position of the first pair using it
        first_pair: usize,
        /// Commit position of the second pair using it
        second_pair: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfPair { index } => write!(f, "record {index} was paired with itself"),
            Self::Reused {
                index,
                first_pair,
                second_pair,
            } => write!(
                f,
                "record {index} is part of pair {first_pair} and pair {second_pair}"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Committed pair by source indices, before ranking
#[derive(Debug, Clone, Copy, PartialEq)]
struct Committed {
    a_index: usize,
    b_index: usize,
    score: f64,
}

/// Matcher pairing arbitrary records by a caller-supplied score
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoredMatcher;

impl ScoredMatcher {
    /// Create a new scored matcher
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Pair records greedily by best score
    ///
    /// # Panics
    ///
    /// Panics with an [`InvariantViolation`] if the pass ever commits a record
    /// twice or pairs a record with itself.
    pub fn match_items<'a, T, F>(&self, items: &'a [T], score: F) -> ScoredMatch<'a, T>
    where
        F: Fn(&T, &T) -> f64,
    {
        match_by_score(items, score)
    }
}

fn match_by_score<'a, T, F>(items: &'a [T], score: F) -> ScoredMatch<'a, T>
where
    F: Fn(&T, &T) -> f64,
{
    let n = items.len();
    let mut consumed = vec![false; n];
    let mut committed: Vec<Committed> = Vec::new();

    for (i, a) in items.iter().enumerate() {
        if consumed[i] {
            continue;
        }

        let mut best: Option<(usize, f64)> = None;
        for (j, b) in items.iter().enumerate().skip(i + 1) {
            if consumed[j] {
                continue;
            }
            let s = score(a, b);
            if s.is_nan() || s <= 0.0 {
                continue;
            }
            if best.is_none_or(|(_, best_score)| s > best_score) {
                best = Some((j, s));
            }
        }

        if let Some((j, s)) = best {
            debug!("Committing pair ({i}, {j}) with score {s}");
            consumed[i] = true;
            consumed[j] = true;
            committed.push(Committed {
                a_index: i,
                b_index: j,
                score: s,
            });
        }
    }

    enforce_disjoint(&committed);

    committed.sort_by(|x, y| y.score.total_cmp(&x.score));

    let pairs: Vec<ScoredPair<'a, T>> = committed
        .iter()
        .map(|c| ScoredPair {
            a: &items[c.a_index],
            b: &items[c.b_index],
            score: c.score,
        })
        .collect();

    let unmatched: Vec<&'a T> = items
        .iter()
        .zip(&consumed)
        .filter(|(_, used)| !**used)
        .map(|(item, _)| item)
        .collect();

    info!(
        "Scored matching committed {} pairs; {} of {} records unmatched",
        pairs.len(),
        unmatched.len(),
        n
    );

    ScoredMatch { pairs, unmatched }
}

/// Panic unless no record occurs in more than one pair
fn enforce_disjoint(committed: &[Committed]) {
    if let Err(violation) = check_disjoint(committed) {
        panic!("scored matching invariant violated: {violation}");
    }
}

fn check_disjoint(committed: &[Committed]) -> Result<(), InvariantViolation> {
    let mut seen: FxHashMap<usize, usize> = FxHashMap::default();
    for (pair, c) in committed.iter().enumerate() {
        if c.a_index == c.b_index {
            return Err(InvariantViolation::SelfPair { index: c.a_index });
        }
        for index in [c.a_index, c.b_index] {
            if let Some(first_pair) = seen.insert(index, pair) {
                return Err(InvariantViolation::Reused {
                    index,
                    first_pair,
                    second_pair: pair,
                });
            }
        }
    }
    Ok(())
}
