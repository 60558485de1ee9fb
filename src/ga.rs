use crate::board::Board;
use crate::chromosome::{self, Chromosome};
use crate::param::Param;
use crate::population::Population;
use crate::GaError;
use log::{debug, info};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

//-----------------------------------------------------------------------------
// Genetic Algorithm core functions
//-----------------------------------------------------------------------------

/// Outcome of one genetic-algorithm run over a single board.
#[derive(Clone, Debug, PartialEq)]
pub struct GaAnswer {
    /// Identifier of the best-ever individual at the generation it was seen
    pub best_id: usize,
    /// Clone of the best-ever chromosome
    pub best: Chromosome,
    /// Decoded visited-cell indices of the best chromosome, ascending
    pub path: Vec<usize>,
    /// Number of generations executed
    pub generations: usize,
    /// Best-ever cost after each generation, when keep_trace is enabled
    pub trace: Vec<u64>,
}

/// Main function to run the genetic algorithm over one board
///
/// # Arguments
///
/// * `board` - The game board to traverse.
/// * `param` - Parameters for the genetic algorithm.
/// * `running` - Atomic boolean to control the running state of the algorithm.
///
/// # Returns
///
/// The best-ever chromosome with its decoded path, or an error for boards
/// the encoding cannot score.
pub fn ga(board: &Board, param: &Param, running: Arc<AtomicBool>) -> Result<GaAnswer, GaError> {
    let mut rng = ChaCha8Rng::seed_from_u64(param.general.seed);
    ga_with_rng(board, param, running, &mut rng)
}

/// Same as `ga` but drawing from a caller-owned random stream, so tests and
/// multi-board drivers control seeding. All selection and reproduction draws
/// come from this single sequential stream.
pub fn ga_with_rng(
    board: &Board,
    param: &Param,
    running: Arc<AtomicBool>,
    rng: &mut ChaCha8Rng,
) -> Result<GaAnswer, GaError> {
    let time = Instant::now();

    board.validate()?;

    let n = board.len();
    let population_size = param.ga.population_factor * n;
    let stagnation_limit = (param.ga.stagnation_factor * population_size as f64) as usize;
    let max_generations = param.ga.max_generations_factor * population_size;

    let mut pop = Population::new();
    pop.generate(population_size, n, rng);
    debug!(
        "Population size: {}, stagnation limit {}, generation cap {}",
        population_size, stagnation_limit, max_generations
    );

    // Generation 1: score the whole population before any stop decision
    pop.fit(board);
    let mut generation: usize = 1;

    let (mut best_id, first) = pop.best();
    let mut best = first.clone();
    let mut stagnation: usize = 0;
    let mut trace: Vec<u64> = Vec::new();
    if param.general.keep_trace {
        trace.push(best.cost);
    }

    loop {
        if stagnation >= stagnation_limit {
            info!(
                "Best cost {} unchanged for {} generations, population has converged",
                best.cost, stagnation
            );
            break;
        }
        if generation >= max_generations {
            info!("Reached generation cap ({})", max_generations);
            break;
        }
        if !running.load(Ordering::Relaxed) {
            info!("Signal received");
            break;
        }

        let changed = evolve(&mut pop, generation, param, rng)?;
        generation += 1;
        pop.fit_changed(&changed, board);

        let (candidate_id, candidate) = pop.best();
        if candidate.cost < best.cost {
            best = candidate.clone();
            best_id = candidate_id;
            stagnation = 0;
        } else {
            stagnation += 1;
        }
        if param.general.keep_trace {
            trace.push(best.cost);
        }
    }

    let elapsed = time.elapsed();
    info!(
        "Genetic algorithm computed {} generations in {:.2?}, best cost {}",
        generation, elapsed, best.cost
    );

    let path = best.path();
    Ok(GaAnswer {
        best_id,
        best,
        path,
        generations: generation,
        trace,
    })
}

/// Run one evolution step: replace the least-fit half of the population with
/// offspring of roulette-drawn parents
///
/// # Arguments
///
/// * `pop` - The current population, modified in place.
/// * `generation` - The generation number stamped on the offspring.
/// * `param` - Parameters for the genetic algorithm.
/// * `rng` - Random number generator.
///
/// # Returns
///
/// The identifiers whose chromosomes were replaced and need re-scoring.
pub fn evolve(
    pop: &mut Population,
    generation: usize,
    param: &Param,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<usize>, GaError> {
    let losers = find_least_fit(pop);
    let partition = mating_partition(pop)?;

    for pair in losers.chunks(2) {
        // Two independent draws; drawing the same parent twice is a legal
        // no-op crossover, mutation still applies
        let parent1 = draw_parent(&partition, rng.gen::<f64>());
        let parent2 = draw_parent(&partition, rng.gen::<f64>());
        mate(pop, parent1, parent2, (pair[0], pair[1]), param, rng);
        pop.individuals[pair[0]].epoch = generation;
        pop.individuals[pair[1]].epoch = generation;
    }

    Ok(losers)
}

/// Identifiers of the worst half of the population by cost, in ascending
/// identifier order. The count is half the population, rounded up to the
/// nearest even number so replacement always happens in parent pairs.
pub fn find_least_fit(pop: &Population) -> Vec<usize> {
    let mut ids: Vec<usize> = (0..pop.len()).collect();
    ids.sort_by(|&a, &b| pop.individuals[b].cost.cmp(&pop.individuals[a].cost));

    let mut losers_number = pop.len() / 2;
    if losers_number % 2 != 0 {
        losers_number += 1;
    }

    let mut losers: Vec<usize> = ids.into_iter().take(losers_number).collect();
    losers.sort_unstable();
    losers
}

/// Build the roulette wheel: each chromosome, in population order, receives
/// a sub-interval of [0,1) whose width is its share of the total fitness
///
/// # Arguments
///
/// * `pop` - The scored population.
///
/// # Returns
///
/// Co-indexed (start, end) interval bounds, or `SelectionDegenerate` when no
/// usable partition exists. The latter indicates corrupted scores and should
/// never occur on a validated board.
pub fn mating_partition(pop: &Population) -> Result<Vec<(f64, f64)>, GaError> {
    if pop.is_empty() {
        return Err(GaError::SelectionDegenerate(
            "cannot build a mating partition over an empty population".to_string(),
        ));
    }

    let total: f64 = pop.individuals.iter().map(|i| i.fitness).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(GaError::SelectionDegenerate(format!(
            "total fitness {} cannot be partitioned into [0,1)",
            total
        )));
    }

    let mut partition = Vec::with_capacity(pop.len());
    let mut start = 0.0;
    for individual in &pop.individuals {
        let end = start + individual.fitness / total;
        partition.push((start, end));
        start = end;
    }
    Ok(partition)
}

/// Map a uniform draw in [0,1) to the chromosome whose interval contains it.
/// Bounds are closed on both ends, so a draw exactly on a shared boundary may
/// match either neighbor; both are acceptable.
pub fn draw_parent(partition: &[(f64, f64)], draw: f64) -> usize {
    for (id, &(start, end)) in partition.iter().enumerate() {
        if draw >= start && draw <= end {
            return id;
        }
    }
    // float accumulation can leave the last interval short of 1.0
    partition.len() - 1
}

/// Write two offspring of the given parents into the target slots. The slots
/// first receive plain parent copies; with probability cross_rate a one-point
/// crossover is attempted at random loci until both spliced children are
/// structurally valid or the retry budget (one attempt per population member)
/// runs out, in which case the parent copies stand. Both slots are then
/// mutated.
pub fn mate(
    pop: &mut Population,
    parent1: usize,
    parent2: usize,
    targets: (usize, usize),
    param: &Param,
    rng: &mut ChaCha8Rng,
) {
    // Parents can themselves sit in the replacement half, so snapshot their
    // genomes before touching the target slots
    let parent1_genes = pop.individuals[parent1].genes.clone();
    let parent2_genes = pop.individuals[parent2].genes.clone();
    pop.individuals[targets.0].genes = parent1_genes.clone();
    pop.individuals[targets.1].genes = parent2_genes.clone();

    let n = parent1_genes.len();
    // A 2-gene chromosome has no interior locus to cross at
    if n > 2 && rng.gen::<f64>() <= param.ga.cross_rate {
        let mut attempts = 0;
        while attempts < pop.len() {
            let locus = rng.gen_range(1..=n - 2);
            if let Some((child1, child2)) = try_cross(&parent1_genes, &parent2_genes, locus) {
                pop.individuals[targets.0].genes = child1;
                pop.individuals[targets.1].genes = child2;
                break;
            }
            attempts += 1;
        }
        if attempts == pop.len() {
            debug!("No valid crossover locus found, keeping parent copies");
        }
    }

    mutate(&mut pop.individuals[targets.0].genes, param.ga.mutation_rate, rng);
    mutate(&mut pop.individuals[targets.1].genes, param.ga.mutation_rate, rng);
}

/// Splice both parents at `locus`, returning the two children only if
/// neither carries a double zero. Since both parents are valid, the junction
/// pair (locus-1, locus) is the only place a violation can appear, but the
/// check covers the full length as a guard against invalid inputs.
fn try_cross(parent1: &[u8], parent2: &[u8], locus: usize) -> Option<(Vec<u8>, Vec<u8>)> {
    let mut child1 = parent1[..locus].to_vec();
    child1.extend_from_slice(&parent2[locus..]);
    let mut child2 = parent2[..locus].to_vec();
    child2.extend_from_slice(&parent1[locus..]);

    for i in 0..child1.len() - 1 {
        if chromosome::has_double_zero(&child1, i) || chromosome::has_double_zero(&child2, i) {
            return None;
        }
    }
    Some((child1, child2))
}

/// Flip each interior gene with independent probability `mutation_rate`. A
/// flip to 0 that creates a double zero with either neighbor is immediately
/// forced back to 1; the mutation is dropped rather than retried.
pub fn mutate(genes: &mut [u8], mutation_rate: f64, rng: &mut ChaCha8Rng) {
    for i in 1..genes.len() - 1 {
        if rng.gen::<f64>() <= mutation_rate {
            if genes[i] == 0 {
                genes[i] = 1;
            } else {
                genes[i] = 0;
                chromosome::repair_double_zero(genes, i);
            }
        }
    }
}
