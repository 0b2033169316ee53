//! Encryption side of the witness encryption scheme.

use ark_ec::{
    pairing::{Pairing, PairingOutput},
    PrimeGroup,
};
use ark_serialize::*;
use ark_std::{rand::RngCore, UniformRand};
use rayon::prelude::*;
use tracing::debug;

use crate::error::SweError;
use crate::hashing::{hash_keys_to_scalars, HashToG1};
use crate::poly::SharingPolynomial;

/// A ciphertext of the signature-based witness encryption scheme.
///
/// Safe to publish: opening it requires a Lagrange-weighted aggregate
/// signature over the target statement from a threshold quorum of the
/// verification keys it was encrypted to.
#[derive(CanonicalSerialize, CanonicalDeserialize, Clone, Debug)]
pub struct Ciphertext<E: Pairing> {
    /// Fresh random G2 element used to blind the secret in `c0`.
    pub h: E::G2,
    /// `h * r + g2 * s`, the blinded sharing secret.
    pub c0: E::G2,
    /// One re-randomized share per verification key: `vk_i * r + g2 * s_i`
    /// (`c_j` in the paper). Length equals the key count.
    pub c1: Vec<E::G2>,
    /// The masked plaintexts in GT (`c'_i` in the paper). Length equals the
    /// message count.
    pub c2: Vec<PairingOutput<E>>,
    /// Per-message blinding of `g2 * r`: `g2 * r * alpha_i`.
    pub a: Vec<E::G2>,
    /// Per-message blinding of the target statement's hash:
    /// `H(target) * alpha_i`.
    pub t: Vec<E::G1>,
}

impl<E: Pairing> Ciphertext<E> {
    /// Number of verification keys this ciphertext was encrypted to.
    pub fn num_keys(&self) -> usize {
        self.c1.len()
    }

    /// Number of plaintext scalars carried.
    pub fn num_messages(&self) -> usize {
        self.c2.len()
    }
}

/// Encrypts a vector of bounded plaintext scalars to a key set and target
/// statement.
///
/// Any quorum of at least `threshold` of the `ver_keys` holders that signs
/// `target_message` can open the ciphertext. Each plaintext must lie in
/// `[0, max_value)` for the discrete-log bound the decryptor will use;
/// out-of-range values are not recoverable.
///
/// # Errors
/// Returns `InvalidParameters` if the key list is empty, the threshold is
/// zero or exceeds the key count, or two keys hash to the same x-coordinate
/// (which would zero a Lagrange denominator and make the sharing unsound).
pub fn encrypt<E: HashToG1, R: RngCore>(
    threshold: usize,
    ver_keys: &[E::G2],
    target_message: &[u8],
    plaintexts: &[E::ScalarField],
    rng: &mut R,
) -> Result<Ciphertext<E>, SweError> {
    let n = ver_keys.len();
    if n == 0 {
        return Err(SweError::InvalidParameters(
            "at least one verification key is required".to_string(),
        ));
    }
    if threshold == 0 || threshold > n {
        return Err(SweError::InvalidParameters(format!(
            "threshold ({threshold}) must be in 1..={n}"
        )));
    }

    let xs = hash_keys_to_scalars::<E>(ver_keys)?;
    for i in 0..n {
        for j in i + 1..n {
            if xs[i] == xs[j] {
                return Err(SweError::InvalidParameters(format!(
                    "verification keys {i} and {j} hash to the same x-coordinate"
                )));
            }
        }
    }

    // Degree threshold-1 polynomial; constant term is the hidden secret.
    let sharing = SharingPolynomial::sample(threshold, rng)?;
    let shares: Vec<E::ScalarField> = xs.iter().map(|x| sharing.evaluate(x)).collect();

    let g2 = E::G2::generator();
    let r = E::ScalarField::rand(rng);
    let alphas: Vec<E::ScalarField> = (0..plaintexts.len())
        .map(|_| E::ScalarField::rand(rng))
        .collect();
    let h = g2 * E::ScalarField::rand(rng);

    let g2_r = g2 * r;
    let g2_s = g2 * sharing.secret();
    let c0 = h * r + g2_s;
    let c1: Vec<E::G2> = ver_keys
        .iter()
        .zip(&shares)
        .map(|(vk, share)| *vk * r + g2 * *share)
        .collect();

    let target_hash = E::hash_to_g1(target_message)?;
    let e_gh = E::pairing(E::G1::generator(), g2);

    // The per-message fields are independent of each other.
    let per_message: Vec<(E::G2, E::G1, PairingOutput<E>)> = plaintexts
        .par_iter()
        .zip(alphas.par_iter())
        .map(|(plaintext, alpha)| {
            let a_i = g2_r * *alpha;
            let t_i = target_hash * *alpha;
            let c2_i = E::pairing(t_i, g2_s) + e_gh * *plaintext;
            (a_i, t_i, c2_i)
        })
        .collect();

    let mut a = Vec::with_capacity(per_message.len());
    let mut t = Vec::with_capacity(per_message.len());
    let mut c2 = Vec::with_capacity(per_message.len());
    for (a_i, t_i, c2_i) in per_message {
        a.push(a_i);
        t.push(t_i);
        c2.push(c2_i);
    }

    debug!(
        n,
        threshold,
        messages = plaintexts.len(),
        "encrypted message batch"
    );

    Ok(Ciphertext { h, c0, c1, c2, a, t })
}
