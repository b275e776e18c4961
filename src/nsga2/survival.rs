//! Environmental selection: truncating the merged population back to size.

use crate::core::Individual;

/// Keeps the best `population_size` individuals of a ranked, crowded pool.
///
/// Whole fronts are admitted in rank order while they fit. The first front
/// that does not fit is sorted by descending crowding distance (stable, so
/// ties keep their order) and truncated to fill the remaining slots.
/// Individuals without a rank are treated as belonging to a front after every
/// ranked one.
///
/// The result holds `min(combined.len(), population_size)` individuals.
#[must_use]
pub fn select_survivors(combined: Vec<Individual>, population_size: usize) -> Vec<Individual> {
    let mut fronts: Vec<Vec<Individual>> = Vec::new();
    let mut unranked = Vec::new();
    for individual in combined {
        match individual.rank() {
            Some(rank) if rank > 0 => {
                if fronts.len() < rank {
                    fronts.resize_with(rank, Vec::new);
                }
                fronts[rank - 1].push(individual);
            }
            _ => unranked.push(individual),
        }
    }
    fronts.push(unranked);

    let mut survivors = Vec::with_capacity(population_size);
    for mut front in fronts {
        let remaining = population_size - survivors.len();
        if remaining == 0 {
            break;
        }
        if front.len() <= remaining {
            survivors.append(&mut front);
            continue;
        }
        front.sort_by(|a, b| b.crowding_distance().total_cmp(&a.crowding_distance()));
        front.truncate(remaining);
        survivors.append(&mut front);
        break;
    }
    survivors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Objectives;
    use crate::nsga2::crowding::assign_crowding_distance;
    use crate::nsga2::sorting::non_dominated_sort;

    fn ranked(points: &[(f64, f64)]) -> Vec<Individual> {
        let mut population: Vec<Individual> = points
            .iter()
            .enumerate()
            .map(|(idx, &(f1, f2))| {
                #[allow(clippy::cast_precision_loss)]
                let tag = idx as f64;
                Individual::with_objectives(vec![tag], Objectives::new(f1, f2))
            })
            .collect();
        non_dominated_sort(&mut population);
        assign_crowding_distance(&mut population);
        population
    }

    fn tags(population: &[Individual]) -> Vec<f64> {
        population.iter().map(|individual| individual.genes()[0]).collect()
    }

    #[test]
    fn whole_fronts_fill_exactly() {
        let pool = ranked(&[(1.0, 3.0), (3.0, 1.0), (2.0, 4.0), (4.0, 2.0), (5.0, 5.0)]);
        let survivors = select_survivors(pool, 4);
        assert_eq!(survivors.len(), 4);
        assert!(survivors.iter().all(|individual| individual.rank() <= Some(2)));
    }

    #[test]
    fn overflow_front_prefers_large_crowding() {
        let pool = ranked(&[(0.0, 4.0), (1.0, 3.0), (1.5, 2.5), (4.0, 0.0)]);
        let survivors = select_survivors(pool, 3);
        let kept = tags(&survivors);
        assert!(kept.contains(&0.0));
        assert!(kept.contains(&3.0));
        // Interior distances: tag 1 -> 0.75, tag 2 -> 1.5.
        assert!(kept.contains(&2.0));
        assert!(!kept.contains(&1.0));
    }

    #[test]
    fn small_pool_is_kept_whole() {
        let pool = ranked(&[(1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(select_survivors(pool, 10).len(), 2);
    }

    #[test]
    fn zero_size_keeps_nothing() {
        let pool = ranked(&[(1.0, 1.0)]);
        assert!(select_survivors(pool, 0).is_empty());
    }

    #[test]
    fn unranked_individuals_come_last() {
        let mut pool = ranked(&[(5.0, 5.0)]);
        pool.insert(0, Individual::with_objectives(vec![9.0], Objectives::new(0.0, 0.0)));
        let survivors = select_survivors(pool, 1);
        assert_eq!(tags(&survivors), vec![0.0]);
    }
}
