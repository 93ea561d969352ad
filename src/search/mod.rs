//! Greedy clique search: candidate scan distribution, extension loop and seed driver.

/// splits the candidate scan across workers and reduces their results
pub mod coordinator;

/// greedy extension of a single clique (rho look-ahead)
pub mod extender;

/// runs the extension from every seed and keeps the best clique
pub mod driver;
