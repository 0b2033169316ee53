//! Decryption side of the witness encryption scheme.

use ark_ec::{pairing::Pairing, PrimeGroup};
use ark_std::Zero;
use rayon::prelude::*;
use tracing::debug;

use crate::bsgs::BabyStepTable;
use crate::encryption::Ciphertext;
use crate::error::SweError;
use crate::hashing::hash_keys_to_scalars;
use crate::poly::lagrange_coefficient;

/// Opens a ciphertext with a threshold aggregate signature.
///
/// `used_indices` names the signer subset (indices into `ver_keys`) whose
/// signatures over the target statement were aggregated into `agg_sig` with
/// [`crate::bls::aggregate`]. The same subset drives the Lagrange weights on
/// both sides, which is what makes the aggregate signature cancel the
/// one-time pad; a subset that does not match the aggregate, or one smaller
/// than the encryption threshold, leaves the pad in place and surfaces as
/// `DiscreteLogNotFound`. The subset size itself is deliberately not checked
/// against the threshold: the ciphertext does not carry it.
///
/// `table` is the explicit discrete-log context; it must have been built for
/// the base `e(g1, g2)` and the plaintext bound used at encryption time, and
/// can be shared read-only across any number of calls.
///
/// # Errors
/// - `InvalidParameters` on a malformed ciphertext, an out-of-range or
///   duplicate signer index, an empty subset, or a table built for a foreign
///   base.
/// - `DiscreteLogNotFound` when a recovered GT value has no exponent within
///   the table's bound; the batch aborts at the first failing message.
pub fn decrypt<E: Pairing>(
    ct: &Ciphertext<E>,
    agg_sig: &E::G1,
    ver_keys: &[E::G2],
    used_indices: &[usize],
    table: &BabyStepTable<E>,
) -> Result<Vec<E::ScalarField>, SweError> {
    let n = ver_keys.len();
    if ct.c1.len() != n {
        return Err(SweError::InvalidParameters(format!(
            "ciphertext carries {} key shares but {} verification keys were supplied",
            ct.c1.len(),
            n
        )));
    }
    if ct.c2.len() != ct.a.len() || ct.c2.len() != ct.t.len() {
        return Err(SweError::InvalidParameters(
            "malformed ciphertext: per-message field lengths disagree".to_string(),
        ));
    }
    if used_indices.is_empty() {
        return Err(SweError::InvalidParameters(
            "at least one signer index is required".to_string(),
        ));
    }
    if let Some(&bad) = used_indices.iter().find(|&&i| i >= n) {
        return Err(SweError::InvalidParameters(format!(
            "signer index {bad} out of range for {n} keys"
        )));
    }

    let e_gh = E::pairing(E::G1::generator(), E::G2::generator());
    if table.base() != &e_gh {
        return Err(SweError::InvalidParameters(
            "baby-step table was built for a different base".to_string(),
        ));
    }

    // Recombine the posted shares over the signer subset with the same
    // Lagrange weights the aggregate signature was formed with. Duplicate
    // indices surface here as duplicate evaluation points.
    let subset_keys: Vec<E::G2> = used_indices.iter().map(|&i| ver_keys[i]).collect();
    let xs = hash_keys_to_scalars::<E>(&subset_keys)?;
    let mut combined = E::G2::zero();
    for (k, &i) in used_indices.iter().enumerate() {
        combined += ct.c1[i] * lagrange_coefficient(&xs, k)?;
    }

    // Per-message: strip the one-time pad, then extract the exponent.
    let plaintexts: Vec<E::ScalarField> = ct
        .c2
        .par_iter()
        .zip(ct.a.par_iter())
        .zip(ct.t.par_iter())
        .map(|((c2_i, a_i), t_i)| {
            let z = *c2_i + E::pairing(*agg_sig, *a_i) - E::pairing(*t_i, combined);
            table.solve(&z).map(E::ScalarField::from)
        })
        .collect::<Result<_, SweError>>()?;

    debug!(
        messages = plaintexts.len(),
        signers = used_indices.len(),
        "decrypted message batch"
    );
    Ok(plaintexts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bls::{aggregate, KeyPair, SecretKey};
    use crate::encryption::encrypt;
    use ark_ec::pairing::PairingOutput;

    type E = ark_bls12_381::Bls12_381;
    type G1 = <E as Pairing>::G1;
    type G2 = <E as Pairing>::G2;
    type Fr = <E as Pairing>::ScalarField;

    const TARGET: &[u8] = b"event-X";

    fn keys(n: usize) -> (Vec<SecretKey<E>>, Vec<G2>) {
        let mut rng = ark_std::test_rng();
        let mut sks = Vec::new();
        let mut vks = Vec::new();
        for _ in 0..n {
            let kp = KeyPair::<E>::generate(&mut rng);
            vks.push(kp.vk);
            sks.push(kp.sk);
        }
        (sks, vks)
    }

    fn pairing_base() -> PairingOutput<E> {
        E::pairing(G1::generator(), G2::generator())
    }

    /// Signs the target with every key in `indices` and aggregates over that
    /// exact subset.
    fn quorum_signature(sks: &[SecretKey<E>], vks: &[G2], indices: &[usize]) -> G1 {
        let sigs: Vec<G1> = indices.iter().map(|&i| sks[i].sign(TARGET).unwrap()).collect();
        let subset: Vec<G2> = indices.iter().map(|&i| vks[i]).collect();
        aggregate::<E>(&sigs, &subset).unwrap()
    }

    #[test]
    fn test_any_quorum_of_three_of_four_decrypts() {
        let mut rng = ark_std::test_rng();
        let (sks, vks) = keys(4);
        let plaintexts = vec![Fr::from(42u64)];
        let ct = encrypt::<E, _>(3, &vks, TARGET, &plaintexts, &mut rng).unwrap();
        let table = BabyStepTable::build(pairing_base(), 1 << 10).unwrap();

        for subset in [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]] {
            let agg_sig = quorum_signature(&sks, &vks, &subset);
            let recovered = decrypt(&ct, &agg_sig, &vks, &subset, &table).unwrap();
            assert_eq!(recovered, plaintexts, "subset {subset:?} failed");
        }
    }

    #[test]
    fn test_multi_message_batch_roundtrip() {
        let mut rng = ark_std::test_rng();
        let (sks, vks) = keys(3);
        let plaintexts = vec![
            Fr::from(0u64),
            Fr::from(1u64),
            Fr::from(2u64),
            Fr::from(30000u64),
        ];
        let ct = encrypt::<E, _>(2, &vks, TARGET, &plaintexts, &mut rng).unwrap();
        let table = BabyStepTable::build(pairing_base(), 1 << 16).unwrap();

        let agg_sig = quorum_signature(&sks, &vks, &[0, 2]);
        let recovered = decrypt(&ct, &agg_sig, &vks, &[0, 2], &table).unwrap();
        assert_eq!(recovered, plaintexts);
    }

    #[test]
    fn test_missing_signer_in_two_of_two_fails() {
        let mut rng = ark_std::test_rng();
        let (sks, vks) = keys(2);
        let ct = encrypt::<E, _>(2, &vks, TARGET, &[Fr::from(42u64)], &mut rng).unwrap();
        let table = BabyStepTable::build(pairing_base(), 1 << 10).unwrap();

        // Only key 0 signed; the aggregate does not correspond to the full
        // pair, so the pad never cancels.
        let lone_sig = quorum_signature(&sks, &vks, &[0]);
        assert!(matches!(
            decrypt(&ct, &lone_sig, &vks, &[0, 1], &table),
            Err(SweError::DiscreteLogNotFound)
        ));
    }

    #[test]
    fn test_mismatched_subset_fails() {
        let mut rng = ark_std::test_rng();
        let (sks, vks) = keys(3);
        let ct = encrypt::<E, _>(2, &vks, TARGET, &[Fr::from(7u64)], &mut rng).unwrap();
        let table = BabyStepTable::build(pairing_base(), 1 << 10).unwrap();

        // Aggregate over {0, 1} but recombine over {0, 2}.
        let agg_sig = quorum_signature(&sks, &vks, &[0, 1]);
        assert!(matches!(
            decrypt(&ct, &agg_sig, &vks, &[0, 2], &table),
            Err(SweError::DiscreteLogNotFound)
        ));
    }

    #[test]
    fn test_wrong_target_statement_fails() {
        let mut rng = ark_std::test_rng();
        let (sks, vks) = keys(2);
        let ct = encrypt::<E, _>(2, &vks, TARGET, &[Fr::from(7u64)], &mut rng).unwrap();
        let table = BabyStepTable::build(pairing_base(), 1 << 10).unwrap();

        let sigs: Vec<G1> = sks.iter().map(|sk| sk.sign(b"event-Y").unwrap()).collect();
        let agg_sig = aggregate::<E>(&sigs, &vks).unwrap();
        assert!(matches!(
            decrypt(&ct, &agg_sig, &vks, &[0, 1], &table),
            Err(SweError::DiscreteLogNotFound)
        ));
    }

    #[test]
    fn test_24_bit_boundary() {
        let mut rng = ark_std::test_rng();
        let (sks, vks) = keys(2);
        let max_value = 1u64 << 24;
        let table = BabyStepTable::build(pairing_base(), max_value).unwrap();
        let agg_sig = quorum_signature(&sks, &vks, &[0, 1]);

        // Largest in-contract plaintext round-trips.
        let in_range = vec![Fr::from(max_value - 1)];
        let ct = encrypt::<E, _>(2, &vks, TARGET, &in_range, &mut rng).unwrap();
        assert_eq!(decrypt(&ct, &agg_sig, &vks, &[0, 1], &table).unwrap(), in_range);

        // One past the bound is out of contract.
        let out_of_range = vec![Fr::from(max_value)];
        let ct = encrypt::<E, _>(2, &vks, TARGET, &out_of_range, &mut rng).unwrap();
        assert!(matches!(
            decrypt(&ct, &agg_sig, &vks, &[0, 1], &table),
            Err(SweError::DiscreteLogNotFound)
        ));
    }

    #[test]
    fn test_decrypt_rejects_key_count_mismatch() {
        let mut rng = ark_std::test_rng();
        let (sks, vks) = keys(3);
        let ct = encrypt::<E, _>(2, &vks, TARGET, &[Fr::from(1u64)], &mut rng).unwrap();
        let table = BabyStepTable::build(pairing_base(), 1 << 10).unwrap();
        let agg_sig = quorum_signature(&sks, &vks, &[0, 1]);

        assert!(matches!(
            decrypt(&ct, &agg_sig, &vks[..2], &[0, 1], &table),
            Err(SweError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_decrypt_rejects_out_of_range_index() {
        let mut rng = ark_std::test_rng();
        let (sks, vks) = keys(2);
        let ct = encrypt::<E, _>(2, &vks, TARGET, &[Fr::from(1u64)], &mut rng).unwrap();
        let table = BabyStepTable::build(pairing_base(), 1 << 10).unwrap();
        let agg_sig = quorum_signature(&sks, &vks, &[0, 1]);

        assert!(matches!(
            decrypt(&ct, &agg_sig, &vks, &[0, 2], &table),
            Err(SweError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_decrypt_rejects_empty_subset() {
        let mut rng = ark_std::test_rng();
        let (_, vks) = keys(2);
        let ct = encrypt::<E, _>(2, &vks, TARGET, &[Fr::from(1u64)], &mut rng).unwrap();
        let table = BabyStepTable::build(pairing_base(), 1 << 10).unwrap();

        assert!(matches!(
            decrypt(&ct, &G1::generator(), &vks, &[], &table),
            Err(SweError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_decrypt_rejects_foreign_table_base() {
        let mut rng = ark_std::test_rng();
        let (sks, vks) = keys(2);
        let ct = encrypt::<E, _>(2, &vks, TARGET, &[Fr::from(1u64)], &mut rng).unwrap();
        let agg_sig = quorum_signature(&sks, &vks, &[0, 1]);

        let foreign_base = pairing_base() * Fr::from(2u64);
        let table = BabyStepTable::build(foreign_base, 1 << 10).unwrap();
        assert!(matches!(
            decrypt(&ct, &agg_sig, &vks, &[0, 1], &table),
            Err(SweError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_table_is_reusable_across_ciphertexts() {
        let mut rng = ark_std::test_rng();
        let (sks, vks) = keys(2);
        let table = BabyStepTable::build(pairing_base(), 1 << 10).unwrap();
        let agg_sig = quorum_signature(&sks, &vks, &[0, 1]);

        for value in [3u64, 500, 1023] {
            let plaintexts = vec![Fr::from(value)];
            let ct = encrypt::<E, _>(2, &vks, TARGET, &plaintexts, &mut rng).unwrap();
            assert_eq!(
                decrypt(&ct, &agg_sig, &vks, &[0, 1], &table).unwrap(),
                plaintexts
            );
        }
    }
}
