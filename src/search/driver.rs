use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};
use serde::Serialize;

use crate::clique::CliqueState;
use crate::config::SearchConfig;
use crate::error::{CliqueError, CliqueResult};
use crate::graph::{AdjacencyGraph, VertexId};
use crate::search::coordinator::{ParallelCoordinator, PoolCoordinator, SequentialCoordinator};
use crate::search::extender::GreedyExtender;

/** shared flag used to stop a search between two seeds */
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// creates a token that is not cancelled
    pub fn new() -> Self { Self::default() }

    /// requests the search to stop before its next seed
    pub fn cancel(&self) { self.0.store(true, Ordering::SeqCst); }

    /// true once cancel() was called
    pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::SeqCst) }
}

/** result of a search */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// best clique found
    pub clique: CliqueState,
    /// size of the best clique
    pub size: usize,
    /// seed vertex that produced it
    pub seed: VertexId,
    /// number of seeds whose greedy run completed
    pub seeds_explored: usize,
    /// number of workers used for each step
    pub workers: usize,
    /// true if the search stopped before trying every seed
    pub cancelled: bool,
}

/** runs a greedy extension from every vertex and keeps the largest clique.
seeds are tried in ascending order and the best is only replaced by a strictly larger clique,
so the result does not depend on the coordinator.
*/
#[derive(Debug)]
pub struct CliqueSearch<C> {
    /// graph (shared, read-only)
    graph: Arc<AdjacencyGraph>,
    /// distributes each step across workers
    coordinator: C,
    /// checked before each seed
    cancel: CancellationToken,
}

impl<C:ParallelCoordinator> CliqueSearch<C> {

    /// creates a search over the graph
    pub fn new(graph:Arc<AdjacencyGraph>, coordinator:C) -> Self {
        Self { graph, coordinator, cancel: CancellationToken::new() }
    }

    /// stops the search between seeds once the token is cancelled
    pub fn with_cancellation(mut self, cancel:CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /** runs the search.
    fails on empty graphs, on worker failures, and if cancelled before the first seed completes.
    */
    pub fn run(&self) -> CliqueResult<SearchReport> {
        let n = self.graph.nb_vertices();
        if n == 0 {
            return Err(CliqueError::EmptyGraph);
        }
        info!("greedy clique search: {} vertices, {} workers", n, self.coordinator.nb_workers());
        let extender = GreedyExtender::new(&self.graph, &self.coordinator);
        let mut best:Option<CliqueState> = None;
        let mut seeds_explored = 0;
        let mut cancelled = false;
        for seed in self.graph.vertices() {
            if self.cancel.is_cancelled() {
                info!("search cancelled after {} / {} seeds", seeds_explored, n);
                cancelled = true;
                break;
            }
            let extension = extender.run(CliqueState::new(seed))?;
            seeds_explored += 1;
            debug!("seed {}: clique of size {}", seed, extension.clique.size());
            if best.as_ref().map_or(true, |b| extension.clique.size() > b.size()) {
                info!("new best clique! ({}, seed {})", extension.clique.size(), seed);
                best = Some(extension.clique);
            }
        }
        let clique = best.ok_or(CliqueError::Cancelled)?;
        info!("best clique: {} vertices", clique.size());
        Ok(SearchReport {
            size: clique.size(),
            seed: clique.seed(),
            clique,
            seeds_explored,
            workers: self.coordinator.nb_workers(),
            cancelled,
        })
    }
}

/** runs a search with the configured number of workers (1: sequential, otherwise a thread
pool that lives for the duration of the search)
*/
pub fn run_search(graph:Arc<AdjacencyGraph>, config:&SearchConfig, cancel:CancellationToken) -> CliqueResult<SearchReport> {
    if config.workers <= 1 {
        CliqueSearch::new(graph, SequentialCoordinator).with_cancellation(cancel).run()
    } else {
        let pool = PoolCoordinator::new(config.workers)?;
        CliqueSearch::new(graph, pool).with_cancellation(cancel).run()
    }
}

/// best clique over all seeds, using the default configuration
pub fn find_best_clique(graph:&Arc<AdjacencyGraph>) -> CliqueResult<CliqueState> {
    find_best_clique_with(graph, &SearchConfig::default())
}

/// best clique over all seeds
pub fn find_best_clique_with(graph:&Arc<AdjacencyGraph>, config:&SearchConfig) -> CliqueResult<CliqueState> {
    run_search(graph.clone(), config, CancellationToken::new()).map(|report| report.clique)
}
