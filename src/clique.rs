use bit_set::BitSet;
use serde::Serialize;

use crate::error::{CliqueError, CliqueResult};
use crate::graph::{AdjacencyGraph, VertexId};

/** clique under construction.
members are kept in discovery order (the seed first). Every pair of members is adjacent at all
times: [`CliqueState::extend`] refuses any vertex that would break this.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CliqueState {
    /// vertices in the clique, in insertion order
    members: Vec<VertexId>,
    /// same vertices, for O(1) membership tests
    #[serde(skip)]
    inside: BitSet,
}

impl CliqueState {

    /// creates a clique containing only the seed vertex
    pub fn new(seed:VertexId) -> Self {
        let mut inside = BitSet::new();
        inside.insert(seed);
        Self { members: vec![seed], inside }
    }

    /// vertex the clique was grown from
    pub fn seed(&self) -> VertexId { self.members[0] }

    /// number of vertices in the clique
    pub fn size(&self) -> usize { self.members.len() }

    /// vertices in discovery order
    pub fn members(&self) -> &[VertexId] { &self.members }

    /// returns true iff v is a member
    pub fn contains(&self, v:VertexId) -> bool { self.inside.contains(v) }

    /// returns true iff v is adjacent to every current member
    pub fn is_adjoinable(&self, v:VertexId, graph:&AdjacencyGraph) -> bool {
        self.members.iter().all(|u| graph.are_adjacent(*u, v))
    }

    /** adds v to the clique.
    fails with an `InvariantViolation` if v is out of range, already a member, or misses an edge
    to some member.
    */
    pub fn extend(&mut self, v:VertexId, graph:&AdjacencyGraph) -> CliqueResult<()> {
        if v >= graph.nb_vertices() {
            return Err(CliqueError::InvariantViolation {
                vertex: v,
                reason: format!("the graph has {} vertices", graph.nb_vertices()),
            });
        }
        if self.contains(v) {
            return Err(CliqueError::InvariantViolation {
                vertex: v,
                reason: "already a member".to_string(),
            });
        }
        if let Some(u) = self.members.iter().find(|u| !graph.are_adjacent(**u, v)) {
            return Err(CliqueError::InvariantViolation {
                vertex: v,
                reason: format!("not adjacent to member {}", u),
            });
        }
        self.members.push(v);
        self.inside.insert(v);
        Ok(())
    }
}

/**
returns true iff the vertices are distinct, in range, and pairwise adjacent
*/
pub fn is_clique(graph:&AdjacencyGraph, vertices:&[VertexId]) -> bool {
    let mut visited = BitSet::new();
    for v in vertices {
        if *v >= graph.nb_vertices() || !visited.insert(*v) {
            return false;
        }
    }
    vertices.iter().enumerate().all(|(i,a)| {
        vertices[i+1..].iter().all(|b| graph.are_adjacent(*a, *b) && graph.are_adjacent(*b, *a))
    })
}
