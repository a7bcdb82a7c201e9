//! Genetic operators with configurable rates.
//!
//! # Usage
//!
//! ```
//! use u_timetable::config::AlgorithmParams;
//! use u_timetable::executor::genetic::GeneticOperators;
//!
//! let ops = GeneticOperators::from_params(&AlgorithmParams::default());
//! assert_eq!(ops.mutation_rate, 0.1);
//! assert_eq!(ops.tournament_replace_rate, 0.5);
//! ```

use rand::Rng;

use super::chromosome::{reset_mutation, uniform_crossover, ClassChromosome};
use crate::config::AlgorithmParams;
use crate::executor::base::CourseGroup;

/// Selection, crossover, and mutation rates.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneticOperators {
    /// Probability that a no-worse candidate replaces the tournament leader.
    pub tournament_replace_rate: f64,
    /// Per-gene swap probability in crossover.
    pub crossover_swap_rate: f64,
    /// Per-gene re-randomization probability.
    pub mutation_rate: f64,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            tournament_replace_rate: 0.5,
            crossover_swap_rate: 0.5,
            mutation_rate: 0.1,
        }
    }
}

impl GeneticOperators {
    /// Reads the rates from the algorithm params, clamped to [0, 1].
    pub fn from_params(params: &AlgorithmParams) -> Self {
        Self {
            tournament_replace_rate: params.tournament_replace_rate.clamp(0.0, 1.0),
            crossover_swap_rate: params.crossover_swap_rate.clamp(0.0, 1.0),
            mutation_rate: params.mutation_rate.clamp(0.0, 1.0),
        }
    }

    /// Tournament selection over the whole population.
    ///
    /// One linear pass: starting from the first chromosome, each candidate
    /// whose score is at least the current leader's takes the lead with
    /// probability `tournament_replace_rate`.
    ///
    /// # Panics
    /// If `population` is empty.
    pub fn select<'p, R: Rng>(
        &self,
        population: &'p [ClassChromosome],
        rng: &mut R,
    ) -> &'p ClassChromosome {
        let mut best = &population[0];
        for candidate in &population[1..] {
            if candidate.score >= best.score && rng.random_bool(self.tournament_replace_rate) {
                best = candidate;
            }
        }
        best
    }

    /// Uniform crossover producing two children.
    pub fn crossover<R: Rng>(
        &self,
        p1: &ClassChromosome,
        p2: &ClassChromosome,
        rng: &mut R,
    ) -> (ClassChromosome, ClassChromosome) {
        uniform_crossover(p1, p2, self.crossover_swap_rate, rng)
    }

    /// Per-gene reset mutation.
    pub fn mutate<R: Rng>(&self, chromosome: &mut ClassChromosome, groups: &[CourseGroup], rng: &mut R) {
        reset_mutation(chromosome, groups, self.mutation_rate, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn scored(genes: Vec<usize>, score: f64) -> ClassChromosome {
        ClassChromosome { genes, score }
    }

    #[test]
    fn test_default_rates() {
        let ops = GeneticOperators::default();
        assert_eq!(ops, GeneticOperators::from_params(&AlgorithmParams::default()));
    }

    #[test]
    fn test_rates_are_clamped() {
        let params = AlgorithmParams {
            mutation_rate: 3.0,
            crossover_swap_rate: -1.0,
            ..AlgorithmParams::default()
        };
        let ops = GeneticOperators::from_params(&params);
        assert_eq!(ops.mutation_rate, 1.0);
        assert_eq!(ops.crossover_swap_rate, 0.0);
    }

    #[test]
    fn test_select_always_replacing_finds_last_best() {
        let ops = GeneticOperators {
            tournament_replace_rate: 1.0,
            ..GeneticOperators::default()
        };
        let population = vec![
            scored(vec![0], 1.0),
            scored(vec![1], 5.0),
            scored(vec![2], 3.0),
            scored(vec![3], 5.0),
        ];
        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(ops.select(&population, &mut rng).genes, vec![3]);
    }

    #[test]
    fn test_select_never_replacing_keeps_first() {
        let ops = GeneticOperators {
            tournament_replace_rate: 0.0,
            ..GeneticOperators::default()
        };
        let population = vec![scored(vec![0], 1.0), scored(vec![1], 5.0)];
        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(ops.select(&population, &mut rng).genes, vec![0]);
    }

    #[test]
    fn test_select_never_picks_worse() {
        let ops = GeneticOperators::default();
        let population = vec![
            scored(vec![0], 9.0),
            scored(vec![1], 1.0),
            scored(vec![2], 2.0),
        ];
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(ops.select(&population, &mut rng).score, 9.0);
        }
    }

    #[test]
    fn test_mutate_with_groups() {
        let ops = GeneticOperators {
            mutation_rate: 1.0,
            ..GeneticOperators::default()
        };
        let groups = vec![CourseGroup {
            course_id: 1,
            mandatory: true,
            class_ids: vec![10, 11],
        }];
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ch = ClassChromosome::new(vec![0]);
        for _ in 0..20 {
            ops.mutate(&mut ch, &groups, &mut rng);
            assert!(ch.genes[0] <= 2);
        }
    }
}
