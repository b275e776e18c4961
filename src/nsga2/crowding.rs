//! Crowding-distance estimation.

use crate::core::{Individual, Objectives};

type ObjectiveAxis = fn(&Objectives) -> f64;

const OBJECTIVE_AXES: [ObjectiveAxis; 2] = [first_objective, second_objective];

fn first_objective(objectives: &Objectives) -> f64 {
    objectives.f1
}

fn second_objective(objectives: &Objectives) -> f64 {
    objectives.f2
}

/// Assigns crowding distances over the whole slice, ignoring front
/// membership.
///
/// Boundary individuals on either objective receive `f64::INFINITY`; a slice
/// of one individual therefore gets infinity as well.
///
/// # Examples
/// ```
/// use nsga2_sch::nsga2::crowding::assign_crowding_distance;
/// use nsga2_sch::{Individual, Objectives};
///
/// let mut population: Vec<Individual> = [(0.0, 4.0), (1.0, 1.0), (4.0, 0.0)]
///     .iter()
///     .map(|&(f1, f2)| Individual::with_objectives(vec![], Objectives::new(f1, f2)))
///     .collect();
/// assign_crowding_distance(&mut population);
/// assert!(population[0].crowding_distance().is_infinite());
/// assert!((population[1].crowding_distance() - 2.0).abs() < 1e-12);
/// ```
pub fn assign_crowding_distance(population: &mut [Individual]) {
    let members: Vec<usize> = (0..population.len()).collect();
    assign_crowding_distance_to(population, &members);
}

/// Assigns crowding distances among the individuals at `members` only.
///
/// Individuals outside `members` are left untouched.
pub fn assign_crowding_distance_to(population: &mut [Individual], members: &[usize]) {
    if members.is_empty() {
        return;
    }
    for &idx in members {
        population[idx].set_crowding_distance(0.0);
    }

    for axis in OBJECTIVE_AXES {
        let value = |idx: usize| axis(&population[idx].objectives());
        let mut sorted = members.to_vec();
        sorted.sort_by(|&a, &b| value(a).total_cmp(&value(b)));

        let first = sorted[0];
        let last = sorted[sorted.len() - 1];
        let min = value(first);
        let max = value(last);
        let range = max - min;

        let mut gaps = Vec::with_capacity(sorted.len().saturating_sub(2));
        if range > 0.0 {
            for window in sorted.windows(3) {
                if let [prev, current, next] = *window {
                    gaps.push((current, (value(next) - value(prev)) / range));
                }
            }
        }

        population[first].set_crowding_distance(f64::INFINITY);
        population[last].set_crowding_distance(f64::INFINITY);
        for (idx, gap) in gaps {
            let distance = population[idx].crowding_distance() + gap;
            population[idx].set_crowding_distance(distance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn population(points: &[(f64, f64)]) -> Vec<Individual> {
        points
            .iter()
            .map(|&(f1, f2)| Individual::with_objectives(Vec::new(), Objectives::new(f1, f2)))
            .collect()
    }

    #[test]
    fn single_individual_is_infinite() {
        let mut pop = population(&[(1.0, 1.0)]);
        assign_crowding_distance(&mut pop);
        assert!(pop[0].crowding_distance().is_infinite());
    }

    #[test]
    fn interior_distance_sums_normalised_gaps() {
        let mut pop = population(&[(0.0, 4.0), (1.0, 3.0), (3.0, 1.0), (4.0, 0.0)]);
        assign_crowding_distance(&mut pop);
        assert!(pop[0].crowding_distance().is_infinite());
        assert!(pop[3].crowding_distance().is_infinite());
        // (3 - 0) / 4 on each objective.
        assert_relative_eq!(pop[1].crowding_distance(), 1.5);
        assert_relative_eq!(pop[2].crowding_distance(), 1.5);
    }

    #[test]
    fn degenerate_objective_contributes_nothing() {
        let mut pop = population(&[(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]);
        assign_crowding_distance(&mut pop);
        let infinite = pop
            .iter()
            .filter(|individual| individual.crowding_distance().is_infinite())
            .count();
        // Ties on f2 still mark one boundary per end of the sorted order.
        assert!(infinite >= 2);
        assert!(pop.iter().all(|individual| individual.crowding_distance() >= 0.0));
    }

    #[test]
    fn subset_leaves_others_untouched() {
        let mut pop = population(&[(0.0, 2.0), (1.0, 1.0), (2.0, 0.0), (5.0, 5.0)]);
        pop[3].set_crowding_distance(42.0);
        assign_crowding_distance_to(&mut pop, &[0, 1, 2]);
        assert_relative_eq!(pop[3].crowding_distance(), 42.0);
        assert_relative_eq!(pop[1].crowding_distance(), 2.0);
    }

    #[test]
    fn previous_values_are_reset() {
        let mut pop = population(&[(0.0, 2.0), (1.0, 1.0), (2.0, 0.0)]);
        pop[1].set_crowding_distance(100.0);
        assign_crowding_distance(&mut pop);
        assert_relative_eq!(pop[1].crowding_distance(), 2.0);
    }
}
