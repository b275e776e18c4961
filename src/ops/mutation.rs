//! Mutation operator abstractions for perturbing decision vectors.

use crate::core::{validate_bounds, Individual};
use crate::ops::{check_distribution_index, check_probability, random_unit, OperatorError};
use rand::RngCore;
use std::sync::Arc;

/// Distribution index used by the engine's default polynomial mutation.
pub const DEFAULT_POLY_ETA: f64 = 20.0;

/// Perturbs a decision vector in place.
///
/// # Examples
/// ```
/// use nsga2_sch::ops::MutationOperator;
/// use nsga2_sch::Individual;
/// use rand::thread_rng;
///
/// struct AddOne;
///
/// impl MutationOperator for AddOne {
///     fn mutate(&self, genes: &mut [f64], _rng: &mut dyn rand::RngCore) {
///         genes.iter_mut().for_each(|gene| *gene += 1.0);
///     }
/// }
///
/// let mut individual = Individual::new(vec![0.0, 1.0]);
/// AddOne.mutate_individual(&mut individual, &mut thread_rng());
/// assert_eq!(individual.genes(), &[1.0, 2.0]);
/// ```
pub trait MutationOperator: Send + Sync {
    /// Mutates the provided genes.
    fn mutate(&self, genes: &mut [f64], rng: &mut dyn RngCore);

    /// Helper that mutates an [`Individual`] directly.
    fn mutate_individual(&self, individual: &mut Individual, rng: &mut dyn RngCore) {
        self.mutate(individual.genes_mut(), rng);
    }
}

impl<T: MutationOperator + ?Sized> MutationOperator for &T {
    fn mutate(&self, genes: &mut [f64], rng: &mut dyn RngCore) {
        (**self).mutate(genes, rng);
    }
}

impl<T: MutationOperator + ?Sized> MutationOperator for Box<T> {
    fn mutate(&self, genes: &mut [f64], rng: &mut dyn RngCore) {
        (**self).mutate(genes, rng);
    }
}

impl<T: MutationOperator + ?Sized> MutationOperator for Arc<T> {
    fn mutate(&self, genes: &mut [f64], rng: &mut dyn RngCore) {
        (**self).mutate(genes, rng);
    }
}

/// Polynomial mutation operator that respects problem bounds.
///
/// Every gene is mutated independently with probability `probability`.
#[derive(Debug, Clone)]
pub struct PolynomialMutation {
    distribution_index: f64,
    probability: f64,
    lower_bounds: Vec<f64>,
    upper_bounds: Vec<f64>,
}

impl PolynomialMutation {
    /// Creates a new polynomial mutation operator.
    ///
    /// # Errors
    /// Returns [`OperatorError`] when the distribution index or probability is
    /// invalid, or when the bound vectors are inconsistent.
    pub fn new(
        lower_bounds: Vec<f64>,
        upper_bounds: Vec<f64>,
        distribution_index: f64,
        probability: f64,
    ) -> Result<Self, OperatorError> {
        check_distribution_index("polynomial mutation", distribution_index)?;
        check_probability("polynomial mutation", probability)?;
        validate_bounds(&lower_bounds, &upper_bounds)?;
        Ok(Self {
            distribution_index,
            probability,
            lower_bounds,
            upper_bounds,
        })
    }

    fn perturbation(&self, delta1: f64, delta2: f64, r: f64) -> f64 {
        let exponent = self.distribution_index + 1.0;
        let mut_pow = 1.0 / exponent;
        let delta_q = if r <= 0.5 {
            let value = 2.0 * r + (1.0 - 2.0 * r) * (1.0 - delta1).powf(exponent);
            value.powf(mut_pow) - 1.0
        } else {
            let value = 2.0 * (1.0 - r) + 2.0 * (r - 0.5) * (1.0 - delta2).powf(exponent);
            1.0 - value.powf(mut_pow)
        };
        if delta_q.is_finite() {
            delta_q
        } else {
            0.0
        }
    }
}

impl MutationOperator for PolynomialMutation {
    fn mutate(&self, genes: &mut [f64], rng: &mut dyn RngCore) {
        let bounds = self.lower_bounds.iter().zip(self.upper_bounds.iter());
        for (gene, (&lower, &upper)) in genes.iter_mut().zip(bounds) {
            if random_unit(rng) >= self.probability {
                continue;
            }
            let range = upper - lower;
            if range <= 0.0 {
                *gene = lower;
                continue;
            }
            let delta1 = (*gene - lower) / range;
            let delta2 = (upper - *gene) / range;
            let delta_q = self.perturbation(delta1, delta2, random_unit(rng));
            *gene = (*gene + delta_q * range).clamp(lower, upper);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn operator(probability: f64) -> PolynomialMutation {
        PolynomialMutation::new(vec![-1.0; 4], vec![1.0; 4], DEFAULT_POLY_ETA, probability).unwrap()
    }

    #[test]
    fn zero_rate_is_identity() {
        let operator = operator(0.0);
        let mut rng = StdRng::seed_from_u64(11);
        let mut genes = [0.1, -0.2, 0.3, 0.9];
        for _ in 0..100 {
            operator.mutate(&mut genes, &mut rng);
        }
        assert_eq!(genes, [0.1, -0.2, 0.3, 0.9]);
    }

    #[test]
    fn full_rate_changes_genes_within_bounds() {
        let operator = operator(1.0);
        let mut rng = StdRng::seed_from_u64(12);
        let original = [0.1, -0.2, 0.3, 0.9];
        let mut genes = original;
        operator.mutate(&mut genes, &mut rng);
        assert_ne!(genes, original);
        for _ in 0..500 {
            operator.mutate(&mut genes, &mut rng);
            assert!(genes.iter().all(|gene| (-1.0..=1.0).contains(gene)));
        }
    }

    #[test]
    fn perturbation_is_zero_at_midpoint_draw() {
        let operator = operator(1.0);
        assert!(operator.perturbation(0.5, 0.5, 0.5).abs() < 1e-12);
    }

    #[test]
    fn perturbation_sign_follows_branch() {
        let operator = operator(1.0);
        assert!(operator.perturbation(0.5, 0.5, 0.1) < 0.0);
        assert!(operator.perturbation(0.5, 0.5, 0.9) > 0.0);
    }

    #[test]
    fn out_of_range_gene_is_clamped() {
        let operator = PolynomialMutation::new(vec![0.0], vec![1.0], 20.0, 1.0).unwrap();
        let mut genes = [2.0];
        operator.mutate(&mut genes, &mut StdRng::seed_from_u64(13));
        assert!(genes[0] <= 1.0);
    }

    #[test]
    fn invalid_rate_is_rejected() {
        assert!(matches!(
            PolynomialMutation::new(vec![0.0], vec![1.0], 20.0, -0.1),
            Err(OperatorError::InvalidProbability { .. })
        ));
    }
}
