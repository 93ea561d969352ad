use std::ops::Range;

use thiserror::Error;

use crate::graph::VertexId;

/// Result type alias using `CliqueError`.
pub type CliqueResult<T> = std::result::Result<T, CliqueError>;

/** errors raised while building graphs, growing cliques or running the search */
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliqueError {
    /// malformed or non-square adjacency input
    #[error("ConstructionError: {0}")]
    Construction(String),

    /// the search was given a graph without vertices
    #[error("EmptyGraphError: the graph has no vertices")]
    EmptyGraph,

    /// attempted to add a duplicate or non-adjoinable vertex to a clique
    #[error("InvariantViolation: cannot add vertex {vertex} to the clique ({reason})")]
    InvariantViolation {
        /// vertex that was refused
        vertex: VertexId,
        /// why it was refused
        reason: String,
    },

    /// a worker terminated abnormally during an extension step
    #[error("WorkerFailure: worker {worker} failed on vertices {range:?} (seed {seed}, step {step}): {message}")]
    WorkerFailure {
        /// seed of the greedy run that failed
        seed: VertexId,
        /// extension step index within that run
        step: usize,
        /// rank of the failing worker
        worker: usize,
        /// vertex range the worker was scanning
        range: Range<VertexId>,
        /// panic payload, if any
        message: String,
    },

    /// the search was cancelled before any seed completed
    #[error("Cancelled: the search was cancelled before a clique was found")]
    Cancelled,

    /// invalid search configuration
    #[error("ConfigError: {0}")]
    Config(String),

    /// input file could not be parsed
    #[error("ParseError: {0}")]
    Parse(String),

    /// IO error
    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("SerdeJsonError: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

/** a worker of a [`crate::search::coordinator::ParallelCoordinator`] panicked */
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("worker {worker} panicked on vertices {range:?}: {message}")]
pub struct WorkerFault {
    /// rank of the worker (index of its partition)
    pub worker: usize,
    /// vertex range it was scanning
    pub range: Range<VertexId>,
    /// panic payload
    pub message: String,
}

impl CliqueError {
    /// attaches the greedy run context to a worker fault
    pub fn worker_failure(seed:VertexId, step:usize, fault:WorkerFault) -> Self {
        CliqueError::WorkerFailure {
            seed,
            step,
            worker: fault.worker,
            range: fault.range,
            message: fault.message,
        }
    }
}
