//! Objective evaluation with budget accounting.

use crate::core::Individual;
use crate::ops::{BiObjectiveProblem, ProblemResult};

/// Evaluates individuals against a problem and counts objective calls.
///
/// Each objective function call adds one to the counter, so evaluating one
/// individual consumes two evaluations.
///
/// # Examples
/// ```
/// use nsga2_sch::nsga2::CountingEvaluator;
/// use nsga2_sch::ops::BiObjectiveProblem;
/// use nsga2_sch::Individual;
///
/// let problem = BiObjectiveProblem::schaffer(1).unwrap();
/// let mut evaluator = CountingEvaluator::new(&problem);
/// let mut individual = Individual::new(vec![1.0]);
/// evaluator.evaluate(&mut individual).unwrap();
/// assert_eq!(evaluator.evaluations(), 2);
/// assert_eq!(individual.objectives().f2, 1.0);
/// ```
#[derive(Debug)]
pub struct CountingEvaluator<'p> {
    problem: &'p BiObjectiveProblem,
    evaluations: usize,
}

impl<'p> CountingEvaluator<'p> {
    /// Creates an evaluator whose counter starts at zero.
    #[must_use]
    pub fn new(problem: &'p BiObjectiveProblem) -> Self {
        Self {
            problem,
            evaluations: 0,
        }
    }

    /// Objective calls performed so far.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Evaluates one individual and stores its objectives.
    ///
    /// # Errors
    /// Returns the problem's error when the genes have the wrong length; the
    /// counter is left unchanged in that case.
    pub fn evaluate(&mut self, individual: &mut Individual) -> ProblemResult<()> {
        let objectives = self.problem.evaluate(individual.genes())?;
        self.evaluations += 2;
        individual.set_objectives(objectives);
        Ok(())
    }

    /// Evaluates every individual in order.
    ///
    /// # Errors
    /// Stops at the first failing individual.
    pub fn evaluate_all(&mut self, individuals: &mut [Individual]) -> ProblemResult<()> {
        for individual in individuals {
            self.evaluate(individual)?;
        }
        Ok(())
    }
}
