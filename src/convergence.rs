//! Convergence measurement against an analytical Pareto front.

use crate::core::experiment::EMPTY_FRONT_SENTINEL;
use crate::core::Objectives;

/// Smallest number of samples used to discretise an analytical front.
pub const MIN_FRONT_SAMPLES: usize = 2;

/// Samples used when a run configuration does not choose a count.
pub const DEFAULT_FRONT_SAMPLES: usize = 10_000;

/// A sampled reference front in objective space.
///
/// # Examples
/// ```
/// use nsga2_sch::convergence::AnalyticalFront;
/// use nsga2_sch::Objectives;
///
/// let front = AnalyticalFront::schaffer(1, 3);
/// assert_eq!(front.points().len(), 3);
/// assert_eq!(front.mean_distance(&[Objectives::new(1.0, 1.0)]), 0.0);
/// assert_eq!(front.mean_distance(&[]), -1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticalFront {
    points: Vec<Objectives>,
}

impl AnalyticalFront {
    /// Wraps an explicit set of reference points.
    #[must_use]
    pub fn from_points(points: Vec<Objectives>) -> Self {
        Self { points }
    }

    /// Samples the optimal front of the two-objective benchmark over
    /// `dimensions` variables.
    ///
    /// Pareto-optimal solutions set every variable to the same `t` in
    /// `[0, 2]`, so `f1 = D t^2` and `f2 = D (t - 2)^2`. `t` is sampled at
    /// `samples` evenly spaced values, never fewer than
    /// [`MIN_FRONT_SAMPLES`].
    #[must_use]
    pub fn schaffer(dimensions: usize, samples: usize) -> Self {
        let samples = samples.max(MIN_FRONT_SAMPLES);
        #[allow(clippy::cast_precision_loss)]
        let scale = dimensions.max(1) as f64;
        #[allow(clippy::cast_precision_loss)]
        let step = 2.0 / (samples - 1) as f64;
        let points = (0..samples)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let t = step * i as f64;
                Objectives::new(scale * t * t, scale * (t - 2.0) * (t - 2.0))
            })
            .collect();
        Self { points }
    }

    /// Reference points, in sampling order.
    #[must_use]
    pub fn points(&self) -> &[Objectives] {
        &self.points
    }

    /// Euclidean distance from `point` to the closest reference point.
    ///
    /// Infinite when the reference front has no points.
    #[must_use]
    pub fn distance_to(&self, point: &Objectives) -> f64 {
        self.points
            .iter()
            .map(|reference| reference.distance(point))
            .fold(f64::INFINITY, f64::min)
    }

    /// Mean of [`Self::distance_to`] over `front`, or
    /// [`EMPTY_FRONT_SENTINEL`] when `front` is empty.
    #[must_use]
    pub fn mean_distance(&self, front: &[Objectives]) -> f64 {
        if front.is_empty() {
            return EMPTY_FRONT_SENTINEL;
        }
        let total: f64 = front.iter().map(|point| self.distance_to(point)).sum();
        #[allow(clippy::cast_precision_loss)]
        let count = front.len() as f64;
        total / count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn endpoints_match_single_objective_optima() {
        let front = AnalyticalFront::schaffer(5, 11);
        let points = front.points();
        assert_eq!(points.len(), 11);
        assert_relative_eq!(points[0].f1, 0.0);
        assert_relative_eq!(points[0].f2, 20.0);
        assert_relative_eq!(points[10].f1, 20.0);
        assert_relative_eq!(points[10].f2, 0.0);
        assert_relative_eq!(points[5].f1, 5.0);
        assert_relative_eq!(points[5].f2, 5.0);
    }

    #[test]
    fn sample_count_has_a_floor() {
        assert_eq!(AnalyticalFront::schaffer(1, 0).points().len(), 2);
        assert_eq!(AnalyticalFront::schaffer(1, 1).points().len(), 2);
    }

    #[test]
    fn distance_is_to_nearest_sample() {
        let front = AnalyticalFront::from_points(vec![
            Objectives::new(0.0, 4.0),
            Objectives::new(4.0, 0.0),
        ]);
        assert_relative_eq!(front.distance_to(&Objectives::new(3.0, 0.0)), 1.0);
        assert_relative_eq!(
            front.mean_distance(&[Objectives::new(0.0, 5.0), Objectives::new(4.0, 3.0)]),
            2.0
        );
    }

    #[test]
    fn empty_reference_is_infinitely_far() {
        let front = AnalyticalFront::from_points(Vec::new());
        assert!(front.distance_to(&Objectives::new(0.0, 0.0)).is_infinite());
    }

    #[test]
    fn empty_front_returns_sentinel() {
        let front = AnalyticalFront::schaffer(3, 20);
        assert_relative_eq!(front.mean_distance(&[]), EMPTY_FRONT_SENTINEL);
    }
}
