//! BLS signatures with modified, Lagrange-weighted aggregation.
//!
//! Signing and verification are textbook BLS over G1/G2. Aggregation is not:
//! instead of summing signatures directly, each signature is weighted by the
//! Lagrange coefficient of its key's x-coordinate, taken over exactly the
//! participating key list. The aggregate of a threshold quorum therefore acts
//! like the quorum's reconstructed secret, which is the property the witness
//! encryption layer decrypts against.

use ark_ec::{pairing::Pairing, PrimeGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{rand::RngCore, UniformRand, Zero};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::SweError;
use crate::hashing::{hash_keys_to_scalars, HashToG1};
use crate::poly::lagrange_coefficient;

/// Secret signing key of one party.
///
/// The scalar never leaves this struct; it is zeroized when dropped and
/// redacted from debug output.
#[derive(CanonicalSerialize, CanonicalDeserialize, Clone)]
pub struct SecretKey<E: Pairing> {
    sk: E::ScalarField,
}

impl<E: Pairing> SecretKey<E> {
    /// Creates a new secret key with a uniformly random scalar.
    pub fn new<R: RngCore>(rng: &mut R) -> Self {
        SecretKey {
            sk: E::ScalarField::rand(rng),
        }
    }

    /// The matching verification key `g2 * sk`.
    pub fn verification_key(&self) -> E::G2 {
        E::G2::generator() * self.sk
    }
}

impl<E: HashToG1> SecretKey<E> {
    /// Signs a message: `H(message) * sk` with `H` the G1 hash-to-curve.
    pub fn sign(&self, message: &[u8]) -> Result<E::G1, SweError> {
        Ok(E::hash_to_g1(message)? * self.sk)
    }
}

impl<E: Pairing> Zeroize for SecretKey<E> {
    fn zeroize(&mut self) {
        self.sk = E::ScalarField::zero();
    }
}

impl<E: Pairing> ZeroizeOnDrop for SecretKey<E> {}

impl<E: Pairing> Drop for SecretKey<E> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<E: Pairing> core::fmt::Debug for SecretKey<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SecretKey(<redacted>)")
    }
}

/// A party's signing key pair.
#[derive(Clone, Debug)]
pub struct KeyPair<E: Pairing> {
    pub sk: SecretKey<E>,
    pub vk: E::G2,
}

impl<E: Pairing> KeyPair<E> {
    /// Generates a fresh key pair.
    pub fn generate<R: RngCore>(rng: &mut R) -> Self {
        let sk = SecretKey::new(rng);
        let vk = sk.verification_key();
        KeyPair { sk, vk }
    }
}

/// Verifies a single BLS signature: `e(sig, g2) == e(H(message), vk)`.
///
/// A cryptographically invalid signature is reported as `Ok(false)`, not as
/// an error.
pub fn verify<E: HashToG1>(
    vk: &E::G2,
    message: &[u8],
    signature: &E::G1,
) -> Result<bool, SweError> {
    let h = E::hash_to_g1(message)?;
    Ok(E::pairing(*signature, E::G2::generator()) == E::pairing(h, *vk))
}

/// Aggregates signatures with Lagrange weights over exactly the supplied key
/// list.
///
/// With `x_i = hash_g2_to_scalar(vk_i)` and `L_i` the Lagrange coefficient of
/// `x_i` over this list, returns `sum_i L_i * sig_i`. The result only
/// verifies (and only decrypts a ciphertext) relative to this exact key
/// subset.
///
/// # Errors
/// Returns `InvalidParameters` on empty or mismatched input lists, or when
/// two keys hash to the same x-coordinate.
pub fn aggregate<E: Pairing>(
    signatures: &[E::G1],
    ver_keys: &[E::G2],
) -> Result<E::G1, SweError> {
    if signatures.len() != ver_keys.len() {
        return Err(SweError::InvalidParameters(format!(
            "signature count ({}) must match key count ({})",
            signatures.len(),
            ver_keys.len()
        )));
    }
    if signatures.is_empty() {
        return Err(SweError::InvalidParameters(
            "cannot aggregate an empty signature list".to_string(),
        ));
    }

    let xs = hash_keys_to_scalars::<E>(ver_keys)?;
    let mut agg_sig = E::G1::zero();
    for (i, sig) in signatures.iter().enumerate() {
        agg_sig += *sig * lagrange_coefficient(&xs, i)?;
    }
    Ok(agg_sig)
}

/// Verifies a Lagrange-weighted aggregate signature:
/// `e(agg_sig, g2) == prod_i e(H(messages[i]), vks[i])^{L_i}`.
///
/// # Errors
/// Returns `InvalidParameters` on empty or mismatched input lists, or on a
/// duplicate x-coordinate; a signature that merely fails the pairing check is
/// `Ok(false)`.
pub fn agg_verify<E: HashToG1>(
    agg_sig: &E::G1,
    messages: &[&[u8]],
    ver_keys: &[E::G2],
) -> Result<bool, SweError> {
    if messages.len() != ver_keys.len() {
        return Err(SweError::InvalidParameters(format!(
            "message count ({}) must match key count ({})",
            messages.len(),
            ver_keys.len()
        )));
    }
    if messages.is_empty() {
        return Err(SweError::InvalidParameters(
            "cannot verify an empty aggregate".to_string(),
        ));
    }

    let xs = hash_keys_to_scalars::<E>(ver_keys)?;
    let mut weighted_hashes = Vec::with_capacity(messages.len());
    for (i, message) in messages.iter().enumerate() {
        weighted_hashes.push(E::hash_to_g1(message)? * lagrange_coefficient(&xs, i)?);
    }

    let lhs = E::pairing(*agg_sig, E::G2::generator());
    let rhs = E::multi_pairing(weighted_hashes, ver_keys.iter().copied());
    Ok(lhs == rhs)
}
