use bit_set::BitSet;
use log::warn;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::error::{CliqueError, CliqueResult};

/** Vertex Id */
pub type VertexId = usize;

/** largest number of vertices of a dense graph (the adjacency matrix takes 512 MiB) */
pub const MAX_VERTICES: usize = 1 << 16;

/// refuses vertex counts whose N×N matrix would not fit in memory
fn check_nb_vertices(n:usize) -> CliqueResult<()> {
    if n > MAX_VERTICES {
        return Err(CliqueError::Construction(format!(
            "{} vertices is too many for a dense adjacency matrix (at most {})", n, MAX_VERTICES
        )));
    }
    Ok(())
}

/** models an undirected graph as a dense adjacency matrix.
adj_matrix[i] is the bitset of the neighbors of i. Never mutated once built, so it can be
shared between the workers of a search without locking.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyGraph {
    /// nb vertices
    n: usize,
    /// nb edges (i < j pairs with i adjacent to j)
    m: usize,
    /// adj_matrix[i]: bitset of the vertices adjacent to i
    adj_matrix: Vec<BitSet>,
}

impl AdjacencyGraph {

    /** constructor using a complete N×N matrix of adjacency flags.
    fails if the matrix is empty or not square.
    */
    pub fn from_matrix<R:AsRef<[bool]>>(rows:&[R]) -> CliqueResult<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(CliqueError::Construction("the adjacency matrix has no rows".to_string()));
        }
        check_nb_vertices(n)?;
        let mut adj_matrix = vec![BitSet::with_capacity(n) ; n];
        for (i,(row,adj)) in rows.iter().zip(adj_matrix.iter_mut()).enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(CliqueError::Construction(format!(
                    "the adjacency matrix is not square: row {} has {} columns, expected {}", i, row.len(), n
                )));
            }
            for (j,flag) in row.iter().enumerate() {
                if *flag { adj.insert(j); }
            }
        }
        Ok(Self::build(n, adj_matrix))
    }

    /** constructor using n and a row-major slice of n*n adjacency flags */
    pub fn from_flags(n:usize, flags:&[bool]) -> CliqueResult<Self> {
        if n == 0 {
            return Err(CliqueError::Construction("the adjacency matrix has no rows".to_string()));
        }
        let expected = n.checked_mul(n).ok_or_else(|| CliqueError::Construction(format!(
            "{} vertices is too many for a dense adjacency matrix", n
        )))?;
        if flags.len() != expected {
            return Err(CliqueError::Construction(format!(
                "the adjacency matrix is not square: {} flags given for {} vertices (expected {})",
                flags.len(), n, expected
            )));
        }
        let rows:Vec<&[bool]> = flags.chunks(n).collect();
        Self::from_matrix(&rows)
    }

    /** constructor using an adjacency list (edges are inserted in both directions).
    An empty list gives a graph with no vertices.
    */
    pub fn from_adj_list(adj_list:&[Vec<VertexId>]) -> CliqueResult<Self> {
        let n = adj_list.len();
        check_nb_vertices(n)?;
        let mut adj_matrix = vec![BitSet::with_capacity(n) ; n];
        for (a,l) in adj_list.iter().enumerate() {
            for b in l {
                if *b >= n {
                    return Err(CliqueError::Construction(format!(
                        "vertex {} has neighbor {} but the graph has {} vertices", a, b, n
                    )));
                }
                adj_matrix[a].insert(*b);
                adj_matrix[*b].insert(a);
            }
        }
        Ok(Self::build(n, adj_matrix))
    }

    /** random Erdős–Rényi graph G(n,p), reproducible from the seed */
    pub fn random_gnp(n:usize, p:f64, seed:u64) -> CliqueResult<Self> {
        if !(0. ..=1.).contains(&p) {
            return Err(CliqueError::Construction(format!("edge probability {} is not in [0,1]", p)));
        }
        check_nb_vertices(n)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut adj_list = vec![Vec::new() ; n];
        for (i,l) in adj_list.iter_mut().enumerate() {
            for j in (i+1)..n {
                if rng.gen_bool(p) { l.push(j); }
            }
        }
        Self::from_adj_list(&adj_list)
    }

    fn build(n:usize, adj_matrix:Vec<BitSet>) -> Self {
        // self-loops are not edges. plain loop: the size_hint of BitSet iterators is not reliable
        let mut m = 0;
        for (i,adj) in adj_matrix.iter().enumerate() {
            for j in adj.iter() {
                if j > i { m += 1; }
            }
        }
        let res = Self { n, m, adj_matrix };
        if !res.is_symmetric() {
            warn!("the adjacency matrix is not symmetric, only the rows of clique members are read");
        }
        res
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.m }

    /// iterates over the vertices in ascending order
    pub fn vertices(&self) -> std::ops::Range<VertexId> { 0..self.n }

    /// returns true iff u and v are adjacent (O(1))
    pub fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool {
        self.adj_matrix[u].contains(v)
    }

    /// neighbors of u (excluding u itself)
    pub fn neighbors(&self, u:VertexId) -> impl Iterator<Item=VertexId> + '_ {
        let adj = &self.adj_matrix[u];
        self.vertices().filter(move |v| *v != u && adj.contains(*v))
    }

    /// degree of u (self-loops are not counted)
    pub fn degree(&self, u:VertexId) -> usize {
        let adj = &self.adj_matrix[u];
        adj.len() - if adj.contains(u) { 1 } else { 0 }
    }

    /// true iff adjacent(i,j) == adjacent(j,i) for every pair
    pub fn is_symmetric(&self) -> bool {
        self.adj_matrix.iter().enumerate().all(|(i,adj)| {
            adj.iter().all(|j| self.adj_matrix[j].contains(i))
        })
    }

    /// print statistics of the instance
    pub fn display_statistics(&self) {
        println!("\t{} \t vertices", self.nb_vertices());
        println!("\t{} \t edges", self.nb_edges());
        let degrees:Vec<usize> = self.vertices().map(|i| self.degree(i)).collect();
        println!("\t{} \t min degree", degrees.iter().min().unwrap_or(&0));
        println!("\t{} \t max degree", degrees.iter().max().unwrap_or(&0));
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_matrix() {
        let g = AdjacencyGraph::from_matrix(&[
            vec![false, true,  true],
            vec![true,  false, false],
            vec![true,  false, false],
        ]).unwrap();
        assert_eq!(g.nb_vertices(), 3);
        assert_eq!(g.nb_edges(), 2);
        assert!(g.are_adjacent(0, 2));
        assert!(g.are_adjacent(2, 0));
        assert!(!g.are_adjacent(1, 2));
        assert_eq!(g.neighbors(0).collect::<Vec<_>>(), vec![1,2]);
        assert!(g.is_symmetric());
    }

    #[test]
    fn test_triangle_counts() {
        let g = AdjacencyGraph::from_matrix(&[
            vec![false, true,  true],
            vec![true,  false, true],
            vec![true,  true,  false],
        ]).unwrap();
        assert_eq!(g.nb_edges(), 3);
        assert_eq!(g.degree(0), 2);
        assert_eq!(g.neighbors(1).count(), 2);
        let k = AdjacencyGraph::random_gnp(70, 1., 0).unwrap();
        assert_eq!(k.nb_edges(), 70*69/2);
        assert!(k.vertices().all(|v| k.degree(v) == 69));
    }

    #[test]
    fn test_too_many_vertices() {
        let res = AdjacencyGraph::from_flags(usize::MAX, &[false]);
        assert!(matches!(res, Err(CliqueError::Construction(_))));
        let res = AdjacencyGraph::random_gnp(MAX_VERTICES + 1, 0.5, 0);
        assert!(matches!(res, Err(CliqueError::Construction(_))));
    }

    #[test]
    fn test_self_loops_are_not_edges() {
        let g = AdjacencyGraph::from_flags(2, &[true, false, false, true]).unwrap();
        assert_eq!(g.nb_edges(), 0);
        assert_eq!(g.degree(0), 0);
        assert!(g.are_adjacent(0, 0));
    }

    #[test]
    fn test_not_square() {
        let res = AdjacencyGraph::from_matrix(&[vec![false, true], vec![true]]);
        assert!(matches!(res, Err(CliqueError::Construction(_))));
        let res = AdjacencyGraph::from_flags(3, &[false ; 8]);
        assert!(matches!(res, Err(CliqueError::Construction(_))));
    }

    #[test]
    fn test_empty_matrix() {
        let rows:Vec<Vec<bool>> = Vec::new();
        assert!(matches!(AdjacencyGraph::from_matrix(&rows), Err(CliqueError::Construction(_))));
        assert!(matches!(AdjacencyGraph::from_flags(0, &[]), Err(CliqueError::Construction(_))));
        // an adjacency list may describe the empty graph
        assert_eq!(AdjacencyGraph::from_adj_list(&[]).unwrap().nb_vertices(), 0);
    }

    #[test]
    fn test_from_adj_list() {
        let g = AdjacencyGraph::from_adj_list(&[vec![1], vec![2], vec![]]).unwrap();
        assert_eq!(g.nb_edges(), 2);
        assert!(g.are_adjacent(2, 1));
        assert!(!g.are_adjacent(0, 2));
        assert!(AdjacencyGraph::from_adj_list(&[vec![3]]).is_err());
    }

    #[test]
    fn test_asymmetric_input_is_kept() {
        let g = AdjacencyGraph::from_flags(2, &[false, true, false, false]).unwrap();
        assert!(!g.is_symmetric());
        assert!(g.are_adjacent(0, 1));
        assert!(!g.are_adjacent(1, 0));
    }

    #[test]
    fn test_random_gnp() {
        let g1 = AdjacencyGraph::random_gnp(30, 0.5, 42).unwrap();
        let g2 = AdjacencyGraph::random_gnp(30, 0.5, 42).unwrap();
        assert_eq!(g1, g2);
        assert!(g1.is_symmetric());
        assert_eq!(AdjacencyGraph::random_gnp(10, 1., 0).unwrap().nb_edges(), 45);
        assert_eq!(AdjacencyGraph::random_gnp(10, 0., 0).unwrap().nb_edges(), 0);
        assert!(AdjacencyGraph::random_gnp(10, 1.5, 0).is_err());
    }
}
