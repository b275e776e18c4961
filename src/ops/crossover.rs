//! Crossover operator abstractions for recombining decision vectors.

use crate::core::{validate_bounds, Individual};
use crate::ops::{check_distribution_index, check_probability, random_unit, OperatorError};
use rand::RngCore;
use std::sync::Arc;

/// Distribution index used by the engine's default SBX operator.
pub const DEFAULT_SBX_ETA: f64 = 20.0;

/// Parent genes closer than this are copied instead of recombined.
pub const IDENTICAL_GENE_TOLERANCE: f64 = 1e-14;

/// Produces two children by mixing genes from two parents.
///
/// # Examples
/// ```
/// use nsga2_sch::ops::CrossoverOperator;
/// use nsga2_sch::Individual;
/// use rand::thread_rng;
///
/// struct Swap;
///
/// impl CrossoverOperator for Swap {
///     fn crossover(&self, parent_a: &[f64], parent_b: &[f64], _rng: &mut dyn rand::RngCore) -> (Vec<f64>, Vec<f64>) {
///         (parent_b.to_vec(), parent_a.to_vec())
///     }
/// }
///
/// let parent_a = Individual::new(vec![0.0, 1.0]);
/// let parent_b = Individual::new(vec![2.0, 3.0]);
/// let (child_a, child_b) = Swap.crossover_individuals(&parent_a, &parent_b, &mut thread_rng());
/// assert_eq!(child_a.genes(), &[2.0, 3.0]);
/// assert_eq!(child_b.genes(), &[0.0, 1.0]);
/// ```
pub trait CrossoverOperator: Send + Sync {
    /// Applies crossover to parent slices and returns their offspring.
    fn crossover(
        &self,
        parent_a: &[f64],
        parent_b: &[f64],
        rng: &mut dyn RngCore,
    ) -> (Vec<f64>, Vec<f64>);

    /// Helper that produces fresh, unranked [`Individual`] children.
    fn crossover_individuals(
        &self,
        parent_a: &Individual,
        parent_b: &Individual,
        rng: &mut dyn RngCore,
    ) -> (Individual, Individual) {
        let (child_a, child_b) = self.crossover(parent_a.genes(), parent_b.genes(), rng);
        (Individual::new(child_a), Individual::new(child_b))
    }
}

impl<T: CrossoverOperator + ?Sized> CrossoverOperator for &T {
    fn crossover(
        &self,
        parent_a: &[f64],
        parent_b: &[f64],
        rng: &mut dyn RngCore,
    ) -> (Vec<f64>, Vec<f64>) {
        (**self).crossover(parent_a, parent_b, rng)
    }
}

impl<T: CrossoverOperator + ?Sized> CrossoverOperator for Box<T> {
    fn crossover(
        &self,
        parent_a: &[f64],
        parent_b: &[f64],
        rng: &mut dyn RngCore,
    ) -> (Vec<f64>, Vec<f64>) {
        (**self).crossover(parent_a, parent_b, rng)
    }
}

impl<T: CrossoverOperator + ?Sized> CrossoverOperator for Arc<T> {
    fn crossover(
        &self,
        parent_a: &[f64],
        parent_b: &[f64],
        rng: &mut dyn RngCore,
    ) -> (Vec<f64>, Vec<f64>) {
        (**self).crossover(parent_a, parent_b, rng)
    }
}

/// Simulated Binary Crossover (SBX) following Deb & Agrawal.
///
/// The pair is recombined with probability `probability`; otherwise both
/// children are exact copies of their parents. Recombined genes are clamped
/// to the bounds.
#[derive(Debug, Clone)]
pub struct SimulatedBinaryCrossover {
    distribution_index: f64,
    probability: f64,
    lower_bounds: Vec<f64>,
    upper_bounds: Vec<f64>,
}

impl SimulatedBinaryCrossover {
    /// Creates a new SBX operator.
    ///
    /// # Errors
    /// Returns [`OperatorError`] when the distribution index is non-positive
    /// or not finite, when `probability` lies outside `[0, 1]`, or when the
    /// bound vectors are inconsistent.
    pub fn new(
        lower_bounds: Vec<f64>,
        upper_bounds: Vec<f64>,
        distribution_index: f64,
        probability: f64,
    ) -> Result<Self, OperatorError> {
        check_distribution_index("sbx", distribution_index)?;
        check_probability("sbx", probability)?;
        validate_bounds(&lower_bounds, &upper_bounds)?;
        Ok(Self {
            distribution_index,
            probability,
            lower_bounds,
            upper_bounds,
        })
    }

    fn spread_factor(&self, u: f64) -> f64 {
        let exponent = 1.0 / (self.distribution_index + 1.0);
        if u <= 0.5 {
            (2.0 * u).powf(exponent)
        } else {
            (1.0 / (2.0 * (1.0 - u))).powf(exponent)
        }
    }

    fn crossover_gene(
        &self,
        value_a: f64,
        value_b: f64,
        lower: f64,
        upper: f64,
        rng: &mut dyn RngCore,
    ) -> (f64, f64) {
        if (value_a - value_b).abs() < IDENTICAL_GENE_TOLERANCE {
            return (value_a, value_b);
        }
        let beta = self.spread_factor(random_unit(rng));
        let child1 = 0.5 * ((1.0 + beta) * value_a + (1.0 - beta) * value_b);
        let child2 = 0.5 * ((1.0 - beta) * value_a + (1.0 + beta) * value_b);
        (child1.clamp(lower, upper), child2.clamp(lower, upper))
    }
}

impl CrossoverOperator for SimulatedBinaryCrossover {
    fn crossover(
        &self,
        parent_a: &[f64],
        parent_b: &[f64],
        rng: &mut dyn RngCore,
    ) -> (Vec<f64>, Vec<f64>) {
        if random_unit(rng) >= self.probability {
            return (parent_a.to_vec(), parent_b.to_vec());
        }
        let mut child_a = Vec::with_capacity(parent_a.len());
        let mut child_b = Vec::with_capacity(parent_b.len());
        let bounds = self.lower_bounds.iter().zip(self.upper_bounds.iter());
        for ((&value_a, &value_b), (&lower, &upper)) in
            parent_a.iter().zip(parent_b.iter()).zip(bounds)
        {
            let (gene_a, gene_b) = self.crossover_gene(value_a, value_b, lower, upper, rng);
            child_a.push(gene_a);
            child_b.push(gene_b);
        }
        (child_a, child_b)
    }
}
