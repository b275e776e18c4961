//! Fast non-dominated sorting (Deb et al., 2002).

use crate::core::Individual;

/// Returns `true` when `candidate` Pareto-dominates `other` (minimisation).
#[must_use]
pub fn dominates(candidate: &Individual, other: &Individual) -> bool {
    candidate.objectives().dominates(&other.objectives())
}

/// Partitions `population` into dominance fronts and records each
/// individual's 1-based rank.
///
/// Every rank from a previous pass is cleared first. The returned fronts hold
/// population indices; `fronts[0]` is the non-dominated set. An empty
/// population yields no fronts.
///
/// # Examples
/// ```
/// use nsga2_sch::nsga2::sorting::non_dominated_sort;
/// use nsga2_sch::{Individual, Objectives};
///
/// let mut population = vec![
///     Individual::with_objectives(vec![], Objectives::new(1.0, 5.0)),
///     Individual::with_objectives(vec![], Objectives::new(3.0, 3.0)),
///     Individual::with_objectives(vec![], Objectives::new(4.0, 4.0)),
/// ];
/// let fronts = non_dominated_sort(&mut population);
/// assert_eq!(fronts, vec![vec![0, 1], vec![2]]);
/// assert_eq!(population[2].rank(), Some(2));
/// ```
pub fn non_dominated_sort(population: &mut [Individual]) -> Vec<Vec<usize>> {
    let size = population.len();
    for individual in population.iter_mut() {
        individual.set_rank(None);
    }
    if size == 0 {
        return Vec::new();
    }

    let mut dominated: Vec<Vec<usize>> = vec![Vec::new(); size];
    let mut domination_counts = vec![0usize; size];
    let mut current_front = Vec::new();
    for p in 0..size {
        for q in 0..size {
            if p == q {
                continue;
            }
            if dominates(&population[p], &population[q]) {
                dominated[p].push(q);
            } else if dominates(&population[q], &population[p]) {
                domination_counts[p] += 1;
            }
        }
        if domination_counts[p] == 0 {
            current_front.push(p);
        }
    }

    let mut fronts: Vec<Vec<usize>> = Vec::new();
    while !current_front.is_empty() {
        let rank = fronts.len() + 1;
        let mut next_front = Vec::new();
        for &p in &current_front {
            population[p].set_rank(Some(rank));
            for &q in &dominated[p] {
                domination_counts[q] -= 1;
                if domination_counts[q] == 0 {
                    next_front.push(q);
                }
            }
        }
        fronts.push(current_front);
        current_front = next_front;
    }
    fronts
}
