//! DOGS implementation of a parallel greedy heuristic for the Maximum Clique problem

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// dense adjacency graph
pub mod graph;

/// clique under construction and clique checker
pub mod clique;

/// error types
pub mod error;

/// search configuration
pub mod config;

/// read the `adjacency_matrix.txt` format
pub mod matrix;

/// read DIMACS formats
pub mod dimacs;

/// helper and utility methods for executables
pub mod util;

/// greedy clique search (extension, coordination, driver)
pub mod search;

pub use crate::clique::CliqueState;
pub use crate::config::SearchConfig;
pub use crate::error::{CliqueError, CliqueResult};
pub use crate::graph::{AdjacencyGraph, VertexId};
pub use crate::search::driver::{find_best_clique, find_best_clique_with, run_search, CancellationToken, CliqueSearch, SearchReport};
