//! Bounded discrete logarithms in GT via baby-step giant-step.
//!
//! Decryption leaves the plaintext in the exponent of `e(g1, g2)`; this
//! module digs it back out. A [`BabyStepTable`] holds the precomputed baby
//! steps for a fixed `(base, max_value)` pair and is the explicit context a
//! caller builds once, shares read-only, and reuses across decryptions.
//! Building the table is the dominant cost of a decryption session.
//!
//! GT elements are keyed by their compressed canonical bytes so that equal
//! elements always collide in the map.

use std::collections::HashMap;

use ark_ec::pairing::{Pairing, PairingOutput};
use ark_serialize::CanonicalSerialize;
use rayon::prelude::*;
use tracing::debug;

use crate::error::SweError;

/// Precomputed baby steps `base * j -> j` for `j` in `[0, ceil(sqrt(max_value)))`.
///
/// Immutable after construction. The group order must exceed `max_value` so
/// that the baby-step keys are pairwise distinct; this is a precondition of
/// the scheme, not rechecked at runtime.
#[derive(Clone, Debug)]
pub struct BabyStepTable<E: Pairing> {
    base: PairingOutput<E>,
    max_value: u64,
    m: u64,
    table: HashMap<Vec<u8>, u64>,
}

impl<E: Pairing> BabyStepTable<E> {
    /// Builds the table for `base` and the half-open solution range
    /// `[0, max_value)`. Table size and build time are `O(sqrt(max_value))`;
    /// the range is partitioned across rayon workers and merged.
    ///
    /// # Errors
    /// Returns `InvalidParameters` if `max_value` is zero.
    pub fn build(base: PairingOutput<E>, max_value: u64) -> Result<Self, SweError> {
        if max_value == 0 {
            return Err(SweError::InvalidParameters(
                "max_value must be at least 1".to_string(),
            ));
        }

        let m = sqrt_ceil(max_value);
        let workers = rayon::current_num_threads() as u64;
        let shard_len = m.div_ceil(workers);

        let shards: Vec<Vec<(Vec<u8>, u64)>> = (0..workers)
            .into_par_iter()
            .map(|w| {
                let start = w * shard_len;
                let end = (start + shard_len).min(m);
                let mut entries = Vec::with_capacity(end.saturating_sub(start) as usize);
                if start >= end {
                    return Ok(entries);
                }
                let mut g = base * E::ScalarField::from(start);
                for j in start..end {
                    entries.push((gt_bytes(&g)?, j));
                    g += base;
                }
                Ok(entries)
            })
            .collect::<Result<_, SweError>>()?;

        let mut table = HashMap::with_capacity(m as usize);
        for shard in shards {
            table.extend(shard);
        }
        debug!(max_value, baby_steps = m, "built baby-step table");

        Ok(BabyStepTable {
            base,
            max_value,
            m,
            table,
        })
    }

    /// The base this table was built for.
    pub fn base(&self) -> &PairingOutput<E> {
        &self.base
    }

    /// One past the largest solvable exponent.
    pub fn max_value(&self) -> u64 {
        self.max_value
    }

    /// Finds `x` in `[0, max_value)` with `base * x == value`, taking at most
    /// `ceil(sqrt(max_value))` giant steps.
    ///
    /// # Errors
    /// Returns `DiscreteLogNotFound` when no exponent within the bound
    /// matches.
    pub fn solve(&self, value: &PairingOutput<E>) -> Result<u64, SweError> {
        let giant_step = -(self.base * E::ScalarField::from(self.m));
        let mut gamma = *value;
        for i in 0..self.m {
            if let Some(&j) = self.table.get(&gt_bytes(&gamma)?) {
                let x = i * self.m + j;
                if x < self.max_value {
                    return Ok(x);
                }
            }
            gamma += giant_step;
        }
        Err(SweError::DiscreteLogNotFound)
    }
}

/// Smallest `m` with `m * m >= value`.
fn sqrt_ceil(value: u64) -> u64 {
    let mut m = (value as f64).sqrt().ceil() as u64;
    while m * m < value {
        m += 1;
    }
    m
}

fn gt_bytes<E: Pairing>(value: &PairingOutput<E>) -> Result<Vec<u8>, SweError> {
    let mut bytes = Vec::new();
    value.serialize_compressed(&mut bytes)?;
    Ok(bytes)
}
