use ark_bls12_381::Bls12_381 as Curve;
use ark_ec::pairing::Pairing;
use ark_ec::PrimeGroup;
use ark_serialize::CanonicalSerialize;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use clap::Parser;
use tracing::info;

use signature_witness_encryption::bls::{agg_verify, aggregate, KeyPair};
use signature_witness_encryption::bsgs::BabyStepTable;
use signature_witness_encryption::decryption::decrypt;
use signature_witness_encryption::encryption::encrypt;

type Fr = <Curve as Pairing>::ScalarField;
type G1 = <Curve as Pairing>::G1;
type G2 = <Curve as Pairing>::G2;

#[derive(Parser, Debug)]
#[command(
    about = "End-to-end signature-based witness encryption demo",
    author,
    version
)]
struct Args {
    /// Number of key holders
    #[arg(long, default_value_t = 4)]
    keys: usize,

    /// Quorum size required to decrypt
    #[arg(long, default_value_t = 3)]
    threshold: usize,

    /// Per-message bit length; plaintexts must lie in [0, 2^msg_lengths)
    #[arg(long, default_value_t = 24)]
    msg_lengths: u32,

    /// Target statement the quorum must sign
    #[arg(long, default_value = "event-X")]
    target: String,

    /// Seed for deterministic key and ciphertext generation
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if args.threshold == 0 || args.threshold > args.keys {
        return Err("threshold must be in 1..=keys".into());
    }
    if args.msg_lengths == 0 || args.msg_lengths > 40 {
        return Err("msg-lengths must be in 1..=40".into());
    }
    let max_value = 1u64 << args.msg_lengths;
    let target = args.target.as_bytes();

    let mut rng = StdRng::seed_from_u64(args.seed);

    // One key pair per party.
    let keys: Vec<KeyPair<Curve>> = (0..args.keys)
        .map(|_| KeyPair::generate(&mut rng))
        .collect();
    let vks: Vec<G2> = keys.iter().map(|kp| kp.vk).collect();
    info!(keys = args.keys, threshold = args.threshold, "generated key pairs");

    let plaintexts = vec![
        Fr::from(0u64),
        Fr::from(1u64),
        Fr::from(2u64),
        Fr::from(30000u64),
    ];
    let ct = encrypt::<Curve, _>(args.threshold, &vks, target, &plaintexts, &mut rng)?;

    let mut ct_bytes = Vec::new();
    ct.serialize_compressed(&mut ct_bytes)?;
    info!(
        messages = ct.num_messages(),
        bytes = ct_bytes.len(),
        prefix = %hex::encode(&ct_bytes[..16.min(ct_bytes.len())]),
        "encrypted message batch"
    );

    // Sample a random quorum of size threshold to sign the target statement.
    let mut quorum: Vec<usize> =
        rand::seq::index::sample(&mut rand::rng(), args.keys, args.threshold).into_vec();
    quorum.sort_unstable();
    info!(?quorum, "quorum signing the target statement");

    let sigs: Vec<G1> = quorum
        .iter()
        .map(|&i| keys[i].sk.sign(target))
        .collect::<Result<_, _>>()?;
    let quorum_vks: Vec<G2> = quorum.iter().map(|&i| vks[i]).collect();
    let agg_sig = aggregate::<Curve>(&sigs, &quorum_vks)?;

    let statements: Vec<&[u8]> = vec![target; quorum.len()];
    info!(
        valid = agg_verify::<Curve>(&agg_sig, &statements, &quorum_vks)?,
        "verified aggregate signature"
    );

    let base = Curve::pairing(G1::generator(), G2::generator());
    let table = BabyStepTable::build(base, max_value)?;
    let recovered = decrypt(&ct, &agg_sig, &vks, &quorum, &table)?;
    assert_eq!(recovered, plaintexts);
    info!(messages = recovered.len(), "decrypted message batch matches");

    Ok(())
}
