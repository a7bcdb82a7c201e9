//! One-gene-per-course chromosome.
//!
//! # Encoding
//!
//! Gene `i` indexes into the class list of course group `i`. The value
//! equal to the group's length means "no class chosen for this course",
//! so every gene vector decodes to at most one class per course.
//!
//! The gene vector is itself the canonical identity of the selection:
//! two different vectors never choose the same class set.

use rand::Rng;

use crate::executor::base::CourseGroup;
use crate::models::ClassId;

/// Score of a chromosome whose classes conflict or that chooses nothing.
pub const INVALID_SCORE: f64 = f64::NEG_INFINITY;

/// Chromosome for the genetic executor.
///
/// Higher score = better schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassChromosome {
    /// Chosen class index per course group.
    pub genes: Vec<usize>,
    /// Fitness (higher = better).
    pub score: f64,
}

impl ClassChromosome {
    /// Creates a chromosome from explicit genes (unscored).
    pub fn new(genes: Vec<usize>) -> Self {
        Self {
            genes,
            score: INVALID_SCORE,
        }
    }

    /// Creates a random chromosome.
    pub fn random<R: Rng>(groups: &[CourseGroup], rng: &mut R) -> Self {
        Self::new(groups.iter().map(|g| random_gene(g, rng)).collect())
    }

    /// Classes chosen by the genes, in course-group order.
    pub fn chosen_classes(&self, groups: &[CourseGroup]) -> Vec<ClassId> {
        self.genes
            .iter()
            .zip(groups)
            .filter_map(|(&gene, group)| group.class_ids.get(gene).copied())
            .collect()
    }

    /// Whether the last evaluation found a feasible schedule.
    pub fn is_valid(&self) -> bool {
        self.score > INVALID_SCORE
    }

    /// Whether every gene is within its group's range.
    pub fn is_well_formed(&self, groups: &[CourseGroup]) -> bool {
        self.genes.len() == groups.len()
            && self
                .genes
                .iter()
                .zip(groups)
                .all(|(&gene, group)| gene <= group.len())
    }
}

/// Random gene for a group: a class index or the "none" value.
pub fn random_gene<R: Rng>(group: &CourseGroup, rng: &mut R) -> usize {
    rng.random_range(0..=group.len())
}

// ======================== Crossover ========================

/// Uniform crossover: each gene position is swapped between the two
/// children with probability `swap_rate`.
pub fn uniform_crossover<R: Rng>(
    p1: &ClassChromosome,
    p2: &ClassChromosome,
    swap_rate: f64,
    rng: &mut R,
) -> (ClassChromosome, ClassChromosome) {
    let mut c1 = p1.genes.clone();
    let mut c2 = p2.genes.clone();
    for (a, b) in c1.iter_mut().zip(c2.iter_mut()) {
        if rng.random_bool(swap_rate) {
            std::mem::swap(a, b);
        }
    }
    (ClassChromosome::new(c1), ClassChromosome::new(c2))
}

// ======================== Mutation ========================

/// Reset mutation: each gene is re-randomized with probability `rate`.
pub fn reset_mutation<R: Rng>(
    chromosome: &mut ClassChromosome,
    groups: &[CourseGroup],
    rate: f64,
    rng: &mut R,
) {
    for (gene, group) in chromosome.genes.iter_mut().zip(groups) {
        if rng.random_bool(rate) {
            *gene = random_gene(group, rng);
        }
    }
}
