//! Genetic executor.
//!
//! Evolves a population of one-gene-per-course chromosomes and keeps the
//! best feasible ones from every generation.
//!
//! # Algorithm
//!
//! 1. Create `generation_size` random chromosomes.
//! 2. Evaluate each one: decode its classes; a selection with two
//!    conflicting classes, or with no class at all, scores
//!    [`INVALID_SCORE`]. Every evaluation counts against the budget.
//! 3. Add the top `best_picked_from_each_generation` feasible chromosomes
//!    to the elite set, deduplicated by gene vector.
//! 4. Breed the next generation: tournament selection of two parents,
//!    uniform crossover into two children, per-gene mutation.
//! 5. Repeat for `generations` generations or until the budget runs out.
//!
//! The result is the elite set.
//!
//! # Submodules
//!
//! - [`operators`]: selection, crossover, and mutation rates

mod chromosome;
pub mod operators;

pub use chromosome::{
    random_gene, reset_mutation, uniform_crossover, ClassChromosome, INVALID_SCORE,
};
pub use operators::GeneticOperators;

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use super::base::{build_schedule, group_and_order_by_course, is_compatible, CourseGroup};
use super::{Executor, SearchContext, Strategy};
use crate::error::Result;
use crate::models::ScoredSchedule;

/// Evolves class selections.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneticExecutor;

impl GeneticExecutor {
    /// Creates the executor.
    pub fn new() -> Self {
        Self
    }

    /// Scores every chromosome of the population.
    ///
    /// Returns `false` if the budget ran out; chromosomes not reached keep
    /// [`INVALID_SCORE`].
    fn evaluate(
        population: &mut [ClassChromosome],
        groups: &[CourseGroup],
        ctx: &mut SearchContext<'_>,
    ) -> Result<bool> {
        for chromosome in population.iter_mut() {
            chromosome.score = INVALID_SCORE;
            if !ctx.budget.try_consume() {
                return Ok(false);
            }
            if let Some(scored) = Self::decode(chromosome, groups, ctx)? {
                chromosome.score = scored.score;
            }
        }
        Ok(true)
    }

    /// Decodes a chromosome into a scored schedule, if feasible.
    fn decode(
        chromosome: &ClassChromosome,
        groups: &[CourseGroup],
        ctx: &SearchContext<'_>,
    ) -> Result<Option<ScoredSchedule>> {
        let classes = chromosome.chosen_classes(groups);
        if classes.is_empty() {
            return Ok(None);
        }
        let cache = &ctx.input.incompatibilities;
        let feasible = classes
            .iter()
            .enumerate()
            .all(|(i, &class_id)| is_compatible(&classes[..i], class_id, cache));
        if !feasible {
            return Ok(None);
        }
        Ok(Some(ctx.scored(build_schedule(ctx.input, &classes)?)))
    }

    /// Adds the generation's best feasible chromosomes to the elite set.
    fn collect_elite(
        population: &[ClassChromosome],
        groups: &[CourseGroup],
        ctx: &SearchContext<'_>,
        elite: &mut BTreeMap<Vec<usize>, ScoredSchedule>,
    ) -> Result<()> {
        let mut ranked: Vec<&ClassChromosome> =
            population.iter().filter(|c| c.is_valid()).collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        for chromosome in ranked
            .into_iter()
            .take(ctx.algorithm_params.best_picked_from_each_generation)
        {
            if elite.contains_key(&chromosome.genes) {
                continue;
            }
            if let Some(scored) = Self::decode(chromosome, groups, ctx)? {
                elite.insert(chromosome.genes.clone(), scored);
            }
        }
        Ok(())
    }

    /// Breeds the next generation.
    fn breed<R: Rng>(
        population: &[ClassChromosome],
        groups: &[CourseGroup],
        ops: &GeneticOperators,
        rng: &mut R,
    ) -> Vec<ClassChromosome> {
        let size = population.len();
        let mut next = Vec::with_capacity(size);
        while next.len() < size {
            let p1 = ops.select(population, rng);
            let p2 = ops.select(population, rng);
            let (mut c1, mut c2) = ops.crossover(p1, p2, rng);
            ops.mutate(&mut c1, groups, rng);
            ops.mutate(&mut c2, groups, rng);
            next.push(c1);
            if next.len() < size {
                next.push(c2);
            }
        }
        next
    }
}

impl Executor for GeneticExecutor {
    fn strategy(&self) -> Strategy {
        Strategy::Genetic
    }

    fn execute(&self, ctx: &mut SearchContext<'_>) -> Result<Vec<ScoredSchedule>> {
        let params = ctx.algorithm_params;
        let groups = group_and_order_by_course(ctx.input)?;
        if groups.is_empty() || params.generation_size == 0 {
            return Ok(Vec::new());
        }

        let ops = GeneticOperators::from_params(params);
        let mut rng = ctx.rng();
        let mut population: Vec<ClassChromosome> = (0..params.generation_size)
            .map(|_| ClassChromosome::random(&groups, &mut rng))
            .collect();
        let mut elite: BTreeMap<Vec<usize>, ScoredSchedule> = BTreeMap::new();

        for generation in 0..params.generations {
            if ctx.budget.should_stop() {
                break;
            }

            let complete = Self::evaluate(&mut population, &groups, ctx)?;
            Self::collect_elite(&population, &groups, ctx, &mut elite)?;

            debug!(
                generation,
                feasible = population.iter().filter(|c| c.is_valid()).count(),
                elite = elite.len(),
                "genetic: generation evaluated"
            );

            if !complete || generation + 1 == params.generations {
                break;
            }
            population = Self::breed(&population, &groups, &ops, &mut rng);
        }

        Ok(elite.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AlgorithmParams, ScheduleParams};
    use crate::executor::test_support::{crowded, two_by_two};
    use crate::executor::SearchBudget;
    use crate::models::{Schedule, ScheduleInputData};

    fn run(
        input: &ScheduleInputData,
        params: &AlgorithmParams,
        budget: SearchBudget,
    ) -> (Vec<ScoredSchedule>, u64) {
        let schedule_params = ScheduleParams::new(4.0);
        let scorer = |s: &Schedule| -(4.0 - s.total_hours).abs();
        let mut ctx = SearchContext::new(input, &schedule_params, params, &scorer, budget);
        let results = GeneticExecutor::new().execute(&mut ctx).unwrap();
        (results, ctx.budget.processed())
    }

    #[test]
    fn test_finds_exact_target() {
        let input = two_by_two();
        let params = AlgorithmParams::default().with_generations(20, 10).with_seed(42);
        let (results, _) = run(&input, &params, SearchBudget::unlimited());

        assert!(!results.is_empty());
        let best = results
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .unwrap();
        assert_eq!(best.schedule.len(), 2);
        assert!((best.schedule.total_hours - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_results_are_feasible_and_distinct() {
        let input = crowded();
        let params = AlgorithmParams::default().with_generations(30, 20).with_seed(1);
        let (results, _) = run(&input, &params, SearchBudget::unlimited());

        let mut keys = std::collections::HashSet::new();
        for scored in &results {
            assert!(scored.score.is_finite());
            assert!(keys.insert(scored.schedule.key()));
            let ids = &scored.schedule.course_class_ids;
            for (i, &a) in ids.iter().enumerate() {
                for &b in &ids[i + 1..] {
                    assert!(!input.incompatibilities.are_incompatible(a, b));
                    assert_ne!(input.course_of(a).unwrap(), input.course_of(b).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_budget_counts_every_evaluation() {
        let input = crowded();
        let params = AlgorithmParams::default().with_generations(10, 100).with_seed(5);
        let (_, processed) = run(&input, &params, SearchBudget::new(35, None));
        assert_eq!(processed, 35);
    }

    #[test]
    fn test_runs_all_generations_within_budget() {
        let input = crowded();
        let params = AlgorithmParams::default().with_generations(10, 4).with_seed(5);
        let (_, processed) = run(&input, &params, SearchBudget::unlimited());
        assert_eq!(processed, 40);
    }

    #[test]
    fn test_zero_budget_is_empty() {
        let input = crowded();
        let params = AlgorithmParams::default().with_seed(5);
        let (results, processed) = run(&input, &params, SearchBudget::new(0, None));
        assert!(results.is_empty());
        assert_eq!(processed, 0);
    }

    #[test]
    fn test_seeded_runs_match() {
        let input = crowded();
        let params = AlgorithmParams::default().with_generations(20, 10).with_seed(9);
        let (a, _) = run(&input, &params, SearchBudget::unlimited());
        let (b, _) = run(&input, &params, SearchBudget::unlimited());
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_rejects_conflicts() {
        let input = crowded();
        let groups = group_and_order_by_course(&input).unwrap();
        let schedule_params = ScheduleParams::new(4.0);
        let params = AlgorithmParams::default();
        let scorer = |_: &Schedule| 1.0;
        let ctx = SearchContext::new(
            &input,
            &schedule_params,
            &params,
            &scorer,
            SearchBudget::unlimited(),
        );

        // Find two groups with a conflicting pair and pick exactly those
        let mut found = false;
        'search: for (gi, ga) in groups.iter().enumerate() {
            for (gj, gb) in groups.iter().enumerate().skip(gi + 1) {
                for (ci, &a) in ga.class_ids.iter().enumerate() {
                    for (cj, &b) in gb.class_ids.iter().enumerate() {
                        if input.incompatibilities.are_incompatible(a, b) {
                            let mut genes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
                            genes[gi] = ci;
                            genes[gj] = cj;
                            let ch = ClassChromosome::new(genes);
                            assert!(GeneticExecutor::decode(&ch, &groups, &ctx)
                                .unwrap()
                                .is_none());
                            found = true;
                            break 'search;
                        }
                    }
                }
            }
        }
        assert!(found);

        let empty = ClassChromosome::new(groups.iter().map(|g| g.len()).collect());
        assert!(GeneticExecutor::decode(&empty, &groups, &ctx).unwrap().is_none());
    }
}
