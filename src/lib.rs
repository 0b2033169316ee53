//! Signature-based Witness Encryption
//!
//! This library implements the threshold signature-based witness encryption
//! (SWE) scheme described in [ePrint:2022/433](https://eprint.iacr.org/2022/433.pdf).
//!
//! ## Overview
//!
//! A sender encrypts a vector of bounded numeric messages to a set of `n`
//! BLS verification keys and a target statement. The ciphertext opens for
//! anyone holding an aggregate signature over the target statement from at
//! least `t` of the key holders. The trick is that signature aggregation is
//! weighted with the same Lagrange coefficients the encryptor used for
//! Shamir-sharing its secret, so a valid quorum aggregate algebraically
//! reconstructs the secret's action on the ciphertext and cancels the
//! one-time pad. The plaintext then sits in the exponent of `e(g1, g2)` and
//! is recovered with a bounded baby-step giant-step search.
//!
//! ## Key Components
//!
//! - **Secret sharing** ([`poly`]): random sharing polynomials and Lagrange
//!   coefficients.
//! - **Modified BLS** ([`bls`]): key generation, signing, verification, and
//!   the Lagrange-weighted aggregation rule.
//! - **Witness encryption** ([`encryption`], [`decryption`]): the
//!   encrypt/decrypt protocol.
//! - **Discrete-log solver** ([`bsgs`]): the reusable baby-step table.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ark_bls12_381::Bls12_381;
//! use ark_ec::{pairing::Pairing, PrimeGroup};
//! use signature_witness_encryption::{
//!     bls::{aggregate, KeyPair},
//!     bsgs::BabyStepTable,
//!     decryption::decrypt,
//!     encryption::encrypt,
//! };
//!
//! type E = Bls12_381;
//! type Fr = <E as Pairing>::ScalarField;
//!
//! let mut rng = ark_std::test_rng();
//! let n = 4; // number of key holders
//! let threshold = 3; // quorum size required to decrypt
//!
//! // Key generation, one pair per party.
//! let keys: Vec<KeyPair<E>> = (0..n).map(|_| KeyPair::generate(&mut rng)).collect();
//! let vks: Vec<_> = keys.iter().map(|kp| kp.vk).collect();
//!
//! // Encrypt a bounded message to the key set and a target statement.
//! let plaintexts = vec![Fr::from(42u64)];
//! let ct = encrypt::<E, _>(threshold, &vks, b"event-X", &plaintexts, &mut rng).unwrap();
//!
//! // A quorum signs the target statement; aggregation runs over exactly the
//! // quorum's keys.
//! let quorum = [0usize, 1, 3];
//! let sigs: Vec<_> = quorum
//!     .iter()
//!     .map(|&i| keys[i].sk.sign(b"event-X").unwrap())
//!     .collect();
//! let quorum_vks: Vec<_> = quorum.iter().map(|&i| vks[i]).collect();
//! let agg_sig = aggregate::<E>(&sigs, &quorum_vks).unwrap();
//!
//! // Build the discrete-log context once, then decrypt.
//! let base = E::pairing(
//!     <E as Pairing>::G1::generator(),
//!     <E as Pairing>::G2::generator(),
//! );
//! let table = BabyStepTable::build(base, 1 << 24).unwrap();
//! let recovered = decrypt(&ct, &agg_sig, &vks, &quorum, &table).unwrap();
//! assert_eq!(recovered, plaintexts);
//! ```

pub mod bls;
pub mod bsgs;
pub mod decryption;
pub mod encryption;
pub mod error;
pub mod hashing;
pub mod poly;

pub use error::SweError;
