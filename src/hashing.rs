//! Message and key hashing.
//!
//! Two unrelated hash functions live here:
//!
//! - [`HashToG1`], the RFC 9380 hash-to-curve suite used to map signed
//!   messages into G1 for BLS signing.
//! - [`hash_g2_to_scalar`], the map from a verification key to its
//!   x-coordinate in the secret-sharing polynomial.
//!
//! The latter is deliberately naive: it reduces a Blake2b digest of the
//! compressed key modulo r, which is neither uniform nor collision-resistant
//! in the hash-to-field sense. It only has to be deterministic and agree
//! between encryption and decryption. An RFC 9380 Section 5 hash-to-field
//! would be the production-grade replacement.

use ark_bls12_381::{g1::Config as G1Config, Bls12_381, G1Projective};
use ark_ec::hashing::{
    curve_maps::wb::WBMap, map_to_curve_hasher::MapToCurveBasedHasher, HashToCurve,
};
use ark_ec::pairing::Pairing;
use ark_ff::{field_hashers::DefaultFieldHasher, PrimeField};
use ark_serialize::CanonicalSerialize;
use blake2::{Blake2b512, Digest};
use sha2::Sha256;

use crate::error::SweError;

/// Domain separation tag for the G1 signature hash, per the BLS ciphersuite
/// naming convention.
const DST_G1: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

/// A pairing engine that can hash arbitrary byte messages into its G1 group.
///
/// The scheme modules stay generic over `E: Pairing`; this trait carries the
/// one curve-specific operation they need.
pub trait HashToG1: Pairing {
    /// Hashes a message to a G1 group element.
    fn hash_to_g1(message: &[u8]) -> Result<Self::G1, SweError>;
}

impl HashToG1 for Bls12_381 {
    fn hash_to_g1(message: &[u8]) -> Result<Self::G1, SweError> {
        let hasher = MapToCurveBasedHasher::<
            G1Projective,
            DefaultFieldHasher<Sha256, 128>,
            WBMap<G1Config>,
        >::new(DST_G1)
        .map_err(|e| SweError::Hashing(format!("{e:?}")))?;
        let point = hasher
            .hash(message)
            .map_err(|e| SweError::Hashing(format!("{e:?}")))?;
        Ok(point.into())
    }
}

/// Maps a verification key to its polynomial x-coordinate.
///
/// Warning: naive digest-mod-r construction, not uniformly distributed over
/// the scalar field (see the module docs). Consistency between `encrypt`,
/// `aggregate` and `decrypt` is the only property relied upon.
pub fn hash_g2_to_scalar<E: Pairing>(key: &E::G2) -> Result<E::ScalarField, SweError> {
    let mut bytes = Vec::new();
    key.serialize_compressed(&mut bytes)?;
    let digest = Blake2b512::digest(&bytes);
    Ok(E::ScalarField::from_be_bytes_mod_order(&digest))
}

/// Maps every verification key in a list to its x-coordinate.
pub(crate) fn hash_keys_to_scalars<E: Pairing>(
    ver_keys: &[E::G2],
) -> Result<Vec<E::ScalarField>, SweError> {
    ver_keys.iter().map(hash_g2_to_scalar::<E>).collect()
}
