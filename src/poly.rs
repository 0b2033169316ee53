//! Shamir-style polynomial secret sharing.
//!
//! A secret is the constant term of a random degree `t-1` polynomial; a share
//! is an evaluation of that polynomial, and any `t` shares recover the secret
//! through Lagrange interpolation at zero. The same Lagrange weights double
//! as the signature-aggregation weights in [`crate::bls`], which is what lets
//! a threshold aggregate signature stand in for the reconstructed secret
//! during decryption.

use ark_ff::PrimeField;
use ark_poly::{univariate::DensePolynomial, DenseUVPolynomial, Polynomial};
use ark_std::{rand::RngCore, One, UniformRand, Zero};

use crate::error::SweError;

/// A random secret-sharing polynomial with the shared secret as its constant
/// term.
#[derive(Clone, Debug)]
pub struct SharingPolynomial<F: PrimeField> {
    poly: DensePolynomial<F>,
}

impl<F: PrimeField> SharingPolynomial<F> {
    /// Samples `t` independently uniform coefficients, giving a polynomial of
    /// degree at most `t - 1`. Any `t` evaluations determine the secret.
    ///
    /// # Errors
    /// Returns `InvalidParameters` if `t == 0`.
    pub fn sample<R: RngCore>(t: usize, rng: &mut R) -> Result<Self, SweError> {
        if t == 0 {
            return Err(SweError::InvalidParameters(
                "threshold must be at least 1".to_string(),
            ));
        }
        let coefficients: Vec<F> = (0..t).map(|_| F::rand(rng)).collect();
        Ok(SharingPolynomial {
            poly: DensePolynomial::from_coefficients_vec(coefficients),
        })
    }

    /// The shared secret: the polynomial evaluated at zero.
    pub fn secret(&self) -> F {
        self.poly.coeffs.first().copied().unwrap_or_else(F::zero)
    }

    /// Evaluates the polynomial at `x` (Horner form, so the `x^0` term is
    /// handled without any exponentiation).
    pub fn evaluate(&self, x: &F) -> F {
        self.poly.evaluate(x)
    }
}

/// Computes the Lagrange coefficient `L_i(0)` over the evaluation points
/// `xs`:
///
/// `L_i(0) = prod_{j != i} (-xs[j]) / (xs[i] - xs[j])`
///
/// The weights are taken over exactly the supplied point list, so callers
/// must pass the points of the participating subset, not the full universe.
///
/// # Errors
/// Returns `InvalidParameters` if `i` is out of range or two evaluation
/// points coincide (zero denominator).
pub fn lagrange_coefficient<F: PrimeField>(xs: &[F], i: usize) -> Result<F, SweError> {
    let xi = *xs.get(i).ok_or_else(|| {
        SweError::InvalidParameters(format!("index {} out of range for {} points", i, xs.len()))
    })?;

    let mut li = F::one();
    for (j, &xj) in xs.iter().enumerate() {
        if j == i {
            continue;
        }
        let denominator = xi - xj;
        if denominator.is_zero() {
            return Err(SweError::InvalidParameters(format!(
                "duplicate evaluation point at indices {i} and {j}"
            )));
        }
        li *= -xj / denominator;
    }
    Ok(li)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::Field;

    type Fr = ark_bls12_381::Fr;

    #[test]
    fn test_sample_rejects_zero_threshold() {
        let mut rng = ark_std::test_rng();
        assert!(matches!(
            SharingPolynomial::<Fr>::sample(0, &mut rng),
            Err(SweError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_evaluate_matches_naive_power_sum() {
        let mut rng = ark_std::test_rng();
        let sharing = SharingPolynomial::<Fr>::sample(5, &mut rng).unwrap();
        let x = Fr::rand(&mut rng);

        let mut expected = Fr::zero();
        for (i, c) in sharing.poly.coeffs.iter().enumerate() {
            expected += *c * x.pow([i as u64]);
        }
        assert_eq!(sharing.evaluate(&x), expected);
    }

    #[test]
    fn test_evaluate_at_zero_is_secret() {
        let mut rng = ark_std::test_rng();
        let sharing = SharingPolynomial::<Fr>::sample(4, &mut rng).unwrap();
        assert_eq!(sharing.evaluate(&Fr::zero()), sharing.secret());
    }

    #[test]
    fn test_degree_one_polynomial_is_constant() {
        let mut rng = ark_std::test_rng();
        let sharing = SharingPolynomial::<Fr>::sample(1, &mut rng).unwrap();
        let x = Fr::rand(&mut rng);
        assert_eq!(sharing.evaluate(&x), sharing.secret());
    }

    #[test]
    fn test_lagrange_reconstructs_secret() {
        let mut rng = ark_std::test_rng();
        let t = 3;
        let sharing = SharingPolynomial::<Fr>::sample(t, &mut rng).unwrap();

        let xs: Vec<Fr> = (0..t).map(|_| Fr::rand(&mut rng)).collect();
        let shares: Vec<Fr> = xs.iter().map(|x| sharing.evaluate(x)).collect();

        let mut reconstructed = Fr::zero();
        for i in 0..t {
            reconstructed += lagrange_coefficient(&xs, i).unwrap() * shares[i];
        }
        assert_eq!(reconstructed, sharing.secret());
    }

    #[test]
    fn test_lagrange_singleton_subset_is_one() {
        let mut rng = ark_std::test_rng();
        let xs = vec![Fr::rand(&mut rng)];
        assert_eq!(lagrange_coefficient(&xs, 0).unwrap(), Fr::one());
    }

    #[test]
    fn test_lagrange_rejects_duplicate_points() {
        let mut rng = ark_std::test_rng();
        let x = Fr::rand(&mut rng);
        let xs = vec![x, Fr::rand(&mut rng), x];
        assert!(matches!(
            lagrange_coefficient(&xs, 0),
            Err(SweError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_lagrange_rejects_out_of_range_index() {
        let mut rng = ark_std::test_rng();
        let xs = vec![Fr::rand(&mut rng)];
        assert!(matches!(
            lagrange_coefficient(&xs, 1),
            Err(SweError::InvalidParameters(_))
        ));
    }
}
