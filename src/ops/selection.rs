//! Mating selection: choosing which parents are recombined.

use crate::core::Individual;
use rand::RngCore;
use std::sync::Arc;

/// Picks parents from a population.
///
/// # Examples
/// ```
/// use nsga2_sch::ops::SelectionOperator;
/// use nsga2_sch::Individual;
/// use rand::thread_rng;
///
/// struct FirstOnly;
///
/// impl SelectionOperator for FirstOnly {
///     fn select_index(&self, population: &[Individual], _rng: &mut dyn rand::RngCore) -> Option<usize> {
///         (!population.is_empty()).then(|| 0)
///     }
/// }
///
/// let population = vec![Individual::new(vec![0.0]), Individual::new(vec![1.0])];
/// assert_eq!(FirstOnly.select_pair(&population, &mut thread_rng()), Some((0, 0)));
/// ```
pub trait SelectionOperator: Send + Sync {
    /// Returns the index of the individual to use as a parent, or `None` for
    /// an empty population.
    fn select_index(&self, population: &[Individual], rng: &mut dyn RngCore) -> Option<usize>;

    /// Samples two parents independently. Both draws may return the same index.
    fn select_pair(
        &self,
        population: &[Individual],
        rng: &mut dyn RngCore,
    ) -> Option<(usize, usize)> {
        let first = self.select_index(population, rng)?;
        let second = self.select_index(population, rng)?;
        Some((first, second))
    }
}

impl<T: SelectionOperator + ?Sized> SelectionOperator for &T {
    fn select_index(&self, population: &[Individual], rng: &mut dyn RngCore) -> Option<usize> {
        (**self).select_index(population, rng)
    }
}

impl<T: SelectionOperator + ?Sized> SelectionOperator for Box<T> {
    fn select_index(&self, population: &[Individual], rng: &mut dyn RngCore) -> Option<usize> {
        (**self).select_index(population, rng)
    }
}

impl<T: SelectionOperator + ?Sized> SelectionOperator for Arc<T> {
    fn select_index(&self, population: &[Individual], rng: &mut dyn RngCore) -> Option<usize> {
        (**self).select_index(population, rng)
    }
}

/// Uniform selection with replacement; rank and crowding are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSelection;

impl SelectionOperator for UniformSelection {
    fn select_index(&self, population: &[Individual], rng: &mut dyn RngCore) -> Option<usize> {
        use rand::Rng;

        if population.is_empty() {
            return None;
        }
        Some(rng.gen_range(0, population.len()))
    }
}
