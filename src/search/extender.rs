use std::ops::Range;

use log::debug;

use crate::clique::CliqueState;
use crate::error::{CliqueError, CliqueResult};
use crate::graph::{AdjacencyGraph, VertexId};
use crate::search::coordinator::{Candidate, ParallelCoordinator};

/** look-ahead score of candidate v: number of non-member vertices that stay adjoinable once v
is added to the clique (v itself included).
recomputed from scratch for each candidate, O(N·|clique|).
*/
pub fn rho(graph:&AdjacencyGraph, clique:&CliqueState, v:VertexId) -> usize {
    graph.vertices()
        .filter(|w| !clique.contains(*w))
        .filter(|w| *w == v || (graph.are_adjacent(v, *w) && clique.is_adjoinable(*w, graph)))
        .count()
}

/** first best candidate of a vertex range (ascending scan, strict improvement).
this is what a single worker computes during one step.
*/
pub fn scan_range(graph:&AdjacencyGraph, clique:&CliqueState, range:Range<VertexId>) -> Option<Candidate> {
    let mut best:Option<Candidate> = None;
    for v in range {
        if clique.contains(v) || !clique.is_adjoinable(v, graph) { continue; }
        let candidate = Candidate::new(v, rho(graph, clique, v));
        if candidate.improves(best.as_ref()) {
            best = Some(candidate);
        }
    }
    best
}

/** clique obtained by a greedy run, and the candidate chosen at each step */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// final clique
    pub clique: CliqueState,
    /// steps[i]: candidate added at step i
    pub steps: Vec<Candidate>,
}

/** greedy clique extension.
At each step, adds the candidate vertex with the largest rho (first one in ascending order on
ties) until no candidate has a positive rho. The candidate scan is split by the coordinator.
*/
#[derive(Debug)]
pub struct GreedyExtender<'a, C> {
    /// graph (shared, read-only)
    graph: &'a AdjacencyGraph,
    /// distributes the candidate scan
    coordinator: &'a C,
}

impl<'a, C:ParallelCoordinator> GreedyExtender<'a, C> {

    /// creates an extender over the graph
    pub fn new(graph:&'a AdjacencyGraph, coordinator:&'a C) -> Self {
        Self { graph, coordinator }
    }

    /// vertices that can be added to the clique
    pub fn candidates(&self, clique:&CliqueState) -> Vec<VertexId> {
        self.graph.vertices()
            .filter(|v| !clique.contains(*v) && clique.is_adjoinable(*v, self.graph))
            .collect()
    }

    /** chooses the vertex to add at this step, or None if no candidate improves the clique.
    `step` is only used to report worker failures.
    */
    pub fn select(&self, clique:&CliqueState, step:usize) -> CliqueResult<Option<Candidate>> {
        let graph = self.graph;
        self.coordinator
            .best_candidate(graph.nb_vertices(), |range| scan_range(graph, clique, range))
            .map_err(|fault| CliqueError::worker_failure(clique.seed(), step, fault))
    }

    /** grows the clique until no candidate improves it.
    terminates after at most N-1 steps since the clique grows at each step.
    fails with `InvariantViolation` if the seed is not a vertex of the graph.
    */
    pub fn run(&self, mut clique:CliqueState) -> CliqueResult<Extension> {
        if clique.seed() >= self.graph.nb_vertices() {
            return Err(CliqueError::InvariantViolation {
                vertex: clique.seed(),
                reason: format!("seed out of range, the graph has {} vertices", self.graph.nb_vertices()),
            });
        }
        let mut steps = Vec::new();
        loop {
            // maximal clique: no need to wake the workers
            if self.candidates(&clique).is_empty() { break; }
            let candidate = match self.select(&clique, steps.len())? {
                None => break,
                Some(c) => c,
            };
            clique.extend(candidate.vertex, self.graph)?;
            debug!(
                "seed {} step {}: added vertex {} (rho {}), clique size {}",
                clique.seed(), steps.len(), candidate.vertex, candidate.rho, clique.size()
            );
            steps.push(candidate);
        }
        Ok(Extension { clique, steps })
    }
}
