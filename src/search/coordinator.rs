use std::any::Any;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Serialize;

use crate::error::{CliqueError, CliqueResult, WorkerFault};
use crate::graph::VertexId;

/** extension candidate: a vertex and its look-ahead score */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// vertex that would be added
    pub vertex: VertexId,
    /// number of vertices still adjoinable once `vertex` is added
    pub rho: usize,
}

impl Candidate {
    /// creates a candidate
    pub fn new(vertex:VertexId, rho:usize) -> Self { Self { vertex, rho } }

    /** returns true if self should replace the current best.
    strict comparison: the first candidate reaching the maximum wins, and a rho of 0 never
    improves anything.
    */
    pub fn improves(&self, best:Option<&Candidate>) -> bool {
        self.rho > best.map_or(0, |b| b.rho)
    }

    /** reduces partial results ordered by range start into the global best.
    gives the same answer as a sequential ascending scan as long as each partial result is the
    first-wins best of its range.
    */
    pub fn reduce<I>(partials:I) -> Option<Candidate> where I:IntoIterator<Item=Option<Candidate>> {
        partials.into_iter().flatten().fold(None, |best, c| {
            if c.improves(best.as_ref()) { Some(c) } else { best }
        })
    }
}

/** splits 0..n into contiguous near-equal ranges, one per worker.
the first n % workers ranges get one more vertex. Empty ranges are dropped, so fewer than
`workers` ranges are returned when n < workers.
*/
pub fn partition(n:usize, workers:usize) -> Vec<Range<VertexId>> {
    let workers = workers.max(1);
    let base = n / workers;
    let remainder = n % workers;
    let mut res = Vec::with_capacity(workers);
    let mut start = 0;
    for w in 0..workers {
        let len = base + if w < remainder { 1 } else { 0 };
        if len == 0 { break; }
        res.push(start..start+len);
        start += len;
    }
    res
}

/** distributes a vertex range over workers and reduces their results.
implementations must return the partial results ordered by range start (never by completion
time) and must not return before every partition is done.
*/
pub trait ParallelCoordinator {
    /// number of workers the scan is split across
    fn nb_workers(&self) -> usize;

    /// applies scan to every partition of 0..n, results ordered by range start
    fn map_ranges<T,F>(&self, n:usize, scan:F) -> Result<Vec<T>, WorkerFault>
    where T:Send, F:Fn(Range<VertexId>) -> T + Sync;

    /// applies scan to every partition of 0..n and keeps the first best candidate
    fn best_candidate<F>(&self, n:usize, scan:F) -> Result<Option<Candidate>, WorkerFault>
    where F:Fn(Range<VertexId>) -> Option<Candidate> + Sync {
        Ok(Candidate::reduce(self.map_ranges(n, scan)?))
    }
}

/** runs the whole range on the calling thread */
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialCoordinator;

impl ParallelCoordinator for SequentialCoordinator {
    fn nb_workers(&self) -> usize { 1 }

    fn map_ranges<T,F>(&self, n:usize, scan:F) -> Result<Vec<T>, WorkerFault>
    where T:Send, F:Fn(Range<VertexId>) -> T + Sync {
        Ok(partition(n, 1).into_iter().map(scan).collect())
    }
}

/** fixed pool of worker threads, built once and reused for every step of every seed.
each step waits for all its partitions. A panicking worker makes the whole step fail.
*/
#[derive(Debug)]
pub struct PoolCoordinator {
    /// worker threads
    pool: ThreadPool,
    /// nb workers (one partition each)
    workers: usize,
}

impl PoolCoordinator {
    /// spawns a pool of `workers` threads
    pub fn new(workers:usize) -> CliqueResult<Self> {
        if workers == 0 {
            return Err(CliqueError::Config("the number of workers must be positive".to_string()));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("clique-worker-{}", i))
            .build()
            .map_err(|e| CliqueError::Config(format!("unable to spawn {} workers: {}", workers, e)))?;
        Ok(Self { pool, workers })
    }
}

impl ParallelCoordinator for PoolCoordinator {
    fn nb_workers(&self) -> usize { self.workers }

    fn map_ranges<T,F>(&self, n:usize, scan:F) -> Result<Vec<T>, WorkerFault>
    where T:Send, F:Fn(Range<VertexId>) -> T + Sync {
        let ranges = partition(n, self.workers);
        let scan = &scan;
        self.pool.install(|| {
            ranges.into_par_iter().enumerate().map(|(worker, range)| {
                panic::catch_unwind(AssertUnwindSafe(|| scan(range.clone())))
                    .map_err(|payload| WorkerFault { worker, range, message: panic_message(payload) })
            }).collect()
        })
    }
}

/// extracts the message of a panic payload
fn panic_message(payload:Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(s) => *s,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(s) => (*s).to_string(),
            Err(_) => "worker panicked".to_string(),
        },
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition() {
        assert_eq!(partition(10, 3), vec![0..4, 4..7, 7..10]);
        assert_eq!(partition(9, 3), vec![0..3, 3..6, 6..9]);
        assert_eq!(partition(2, 4), vec![0..1, 1..2]);
        assert_eq!(partition(5, 1), vec![0..5]);
        assert!(partition(0, 4).is_empty());
        // 0 workers is treated as 1
        assert_eq!(partition(3, 0), vec![0..3]);
    }

    #[test]
    fn test_partition_covers_range() {
        for n in 0..40 {
            for w in 1..9 {
                let ranges = partition(n, w);
                assert!(ranges.len() <= w);
                let flat:Vec<usize> = ranges.iter().cloned().flatten().collect();
                assert_eq!(flat, (0..n).collect::<Vec<_>>());
                let sizes:Vec<usize> = ranges.iter().map(|r| r.len()).collect();
                assert!(sizes.windows(2).all(|s| s[0] >= s[1] && s[0] - s[1] <= 1));
            }
        }
    }

    #[test]
    fn test_improves() {
        let c = Candidate::new(3, 2);
        assert!(c.improves(None));
        assert!(c.improves(Some(&Candidate::new(0, 1))));
        assert!(!c.improves(Some(&Candidate::new(0, 2))));
        assert!(!Candidate::new(1, 0).improves(None));
    }

    #[test]
    fn test_reduce_first_wins() {
        let partials = vec![
            None,
            Some(Candidate::new(4, 3)),
            Some(Candidate::new(7, 3)),
            Some(Candidate::new(9, 2)),
        ];
        assert_eq!(Candidate::reduce(partials), Some(Candidate::new(4, 3)));
        let partials = vec![Some(Candidate::new(1, 3)), Some(Candidate::new(8, 4))];
        assert_eq!(Candidate::reduce(partials), Some(Candidate::new(8, 4)));
        let partials = vec![Some(Candidate::new(1, 0)), None];
        assert_eq!(Candidate::reduce(partials), None);
    }

    #[test]
    fn test_sequential_map_ranges() {
        let res = SequentialCoordinator.map_ranges(5, |r| r.len()).unwrap();
        assert_eq!(res, vec![5]);
        assert!(SequentialCoordinator.map_ranges(0, |r| r.len()).unwrap().is_empty());
    }

    #[test]
    fn test_pool_results_ordered_by_range_start() {
        let pool = PoolCoordinator::new(4).unwrap();
        assert_eq!(pool.nb_workers(), 4);
        for _ in 0..20 {
            let res = pool.map_ranges(10, |r| {
                // later ranges finish first
                std::thread::sleep(std::time::Duration::from_millis((10 - r.start) as u64));
                r.start
            }).unwrap();
            assert_eq!(res, vec![0, 3, 6, 8]);
        }
    }

    #[test]
    fn test_pool_best_candidate_matches_sequential() {
        // rho only depends on v % 5: ties cross partition boundaries
        let scan = |r:Range<usize>| {
            let mut best:Option<Candidate> = None;
            for v in r {
                let c = Candidate::new(v, v % 5);
                if c.improves(best.as_ref()) { best = Some(c); }
            }
            best
        };
        let expected = SequentialCoordinator.best_candidate(23, scan).unwrap();
        assert_eq!(expected, Some(Candidate::new(4, 4)));
        for w in 1..8 {
            let pool = PoolCoordinator::new(w).unwrap();
            assert_eq!(pool.best_candidate(23, scan).unwrap(), expected);
        }
    }

    #[test]
    fn test_pool_worker_panic() {
        let pool = PoolCoordinator::new(3).unwrap();
        let res = pool.map_ranges(9, |r| {
            if r.start == 3 { panic!("boom on {:?}", r); }
            r.len()
        });
        let fault = res.unwrap_err();
        assert_eq!(fault.worker, 1);
        assert_eq!(fault.range, 3..6);
        assert_eq!(fault.message, "boom on 3..6");
        // the pool is still usable afterwards
        assert_eq!(pool.map_ranges(9, |r| r.len()).unwrap(), vec![3,3,3]);
    }

    #[test]
    fn test_pool_needs_workers() {
        assert!(matches!(PoolCoordinator::new(0), Err(CliqueError::Config(_))));
    }
}
