use std::fs;

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1, space0, space1};
use nom::combinator::{all_consuming, map, map_res, rest, value};
use nom::sequence::{pair, preceded, terminated};

use crate::error::{CliqueError, CliqueResult};
use crate::graph::{AdjacencyGraph, VertexId, MAX_VERTICES};

/// a line of a DIMACS file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `c ...`
    Comment,
    /// `p edge n m` (or `p col n m`)
    Header(usize, usize),
    /// `e u v` (1-based)
    Edge(usize, usize),
}

/// reads a number preceded by spaces
fn read_integer(s:&str) -> IResult<&str, usize> {
    preceded(space1, map_res(digit1, |d:&str| d.parse::<usize>()))(s)
}

/// reads two numbers separated by spaces
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    pair(read_integer, read_integer)(s)
}

/// comment line
fn read_comment(s:&str) -> IResult<&str, Line> {
    value(Line::Comment, preceded(char('c'), rest))(s)
}

/// header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, Line> {
    map(
        preceded(pair(char('p'), preceded(space1, alt((tag("edge"), tag("col"))))), read_two_integers),
        |(n,m)| Line::Header(n,m)
    )(s)
}

/// edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, Line> {
    map(preceded(char('e'), read_two_integers), |(a,b)| Line::Edge(a,b))(s)
}

/// reads a whole (non-empty, trimmed) line
pub fn read_line(s:&str) -> IResult<&str, Line> {
    all_consuming(terminated(alt((read_comment, read_header, read_edge)), space0))(s)
}

/** reads an instance, returns (n,m,adj_list).
edges are stored once, in the adjacency list of their first end. The number of edges read must be
m or m/2 (some generators count both directions).
*/
pub fn read_from_str(s:&str) -> CliqueResult<(usize, usize, Vec<Vec<VertexId>>)> {
    let mut header:Option<(usize,usize)> = None;
    let mut adj_list:Vec<Vec<VertexId>> = Vec::new();
    let mut nb_edges = 0;
    for (i,raw) in s.lines().enumerate() {
        let l = raw.trim();
        if l.is_empty() { continue; }
        let line = read_line(l)
            .map_err(|_| CliqueError::Parse(format!("line {}: unable to read '{}'", i+1, l)))?
            .1;
        match line {
            Line::Comment => {},
            Line::Header(n,m) => {
                if header.is_some() {
                    return Err(CliqueError::Parse(format!("line {}: duplicate header", i+1)));
                }
                if n > MAX_VERTICES {
                    return Err(CliqueError::Parse(format!(
                        "line {}: {} vertices announced, at most {} are supported", i+1, n, MAX_VERTICES
                    )));
                }
                header = Some((n,m));
                adj_list = vec![Vec::new() ; n];
            },
            Line::Edge(a,b) => {
                let n = match header {
                    None => return Err(CliqueError::Parse(format!("line {}: edge before the header", i+1))),
                    Some((n,_)) => n,
                };
                if a == 0 || b == 0 || a > n || b > n {
                    return Err(CliqueError::Parse(format!(
                        "line {}: edge ({},{}) out of range (vertices are numbered from 1 to {})", i+1, a, b, n
                    )));
                }
                adj_list[a-1].push(b-1);
                nb_edges += 1;
            },
        }
    }
    let (n,m) = header.ok_or_else(|| CliqueError::Parse("missing 'p edge' header".to_string()))?;
    if nb_edges != m && 2*nb_edges != m {
        return Err(CliqueError::Parse(format!("the header announces {} edges, {} were read", m, nb_edges)));
    }
    Ok((n, m, adj_list))
}

/// reads a graph from a DIMACS file
pub fn read_from_file(filename:&str) -> CliqueResult<AdjacencyGraph> {
    let s = fs::read_to_string(filename)?;
    let (_,_,adj_list) = read_from_str(&s)?;
    AdjacencyGraph::from_adj_list(&adj_list)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_comment() {
        assert_eq!(read_line("c this is a test comment").unwrap().1, Line::Comment);
        assert_eq!(read_line("c").unwrap().1, Line::Comment);
    }

    #[test]
    fn test_read_header() {
        assert_eq!(read_line("p edge 2 1").unwrap().1, Line::Header(2,1));
        assert_eq!(read_line("p col 2 1").unwrap().1, Line::Header(2,1));
        assert!(read_line("p graph 2 1").is_err());
        assert!(read_line("p edge 2").is_err());
    }

    #[test]
    fn test_read_edge() {
        assert_eq!(read_line("e 1 2").unwrap().1, Line::Edge(1,2));
        assert_eq!(read_line("e  10   3 ").unwrap().1, Line::Edge(10,3));
        assert!(read_line("e 1 2 3").is_err());
        assert!(read_line("e 1").is_err());
    }

    #[test]
    fn test_read_from_str() {
        let s = "c this is a test comment\np edge 3 2\ne 1 2\n\ne 2 3\n";
        let (n,m,adj_list) = read_from_str(s).unwrap();
        assert_eq!((n,m), (3,2));
        assert_eq!(adj_list, vec![vec![1], vec![2], vec![]]);
    }

    #[test]
    fn test_edges_counted_twice() {
        let s = "p edge 2 2\ne 1 2\n";
        assert!(read_from_str(s).is_ok());
        let s = "p edge 2 3\ne 1 2\n";
        assert!(matches!(read_from_str(s), Err(CliqueError::Parse(_))));
    }

    #[test]
    fn test_invalid_files() {
        assert!(read_from_str("e 1 2\np edge 2 1\n").is_err());
        assert!(read_from_str("p edge 2 1\ne 1 3\n").is_err());
        assert!(read_from_str("p edge 2 1\ne 0 1\n").is_err());
        assert!(read_from_str("p edge 2 1\np edge 2 1\ne 1 2\n").is_err());
        assert!(read_from_str("c no header\n").is_err());
        assert!(read_from_str("p edge 2 1\nx 1 2\n").is_err());
    }

    #[test]
    fn test_huge_header() {
        let res = read_from_str("p edge 10000000000 0\n");
        assert!(matches!(res, Err(CliqueError::Parse(_))));
        let res = read_from_str(&format!("p edge {} 0\n", MAX_VERTICES+1));
        assert!(matches!(res, Err(CliqueError::Parse(_))));
    }

    #[test]
    fn test_empty_graph() {
        let (n,m,adj_list) = read_from_str("p edge 0 0\n").unwrap();
        assert_eq!((n,m), (0,0));
        assert!(adj_list.is_empty());
    }

    #[test]
    fn test_read_instance() {
        let g = read_from_file("insts/dimacs/peterson.col").unwrap();
        assert_eq!(g.nb_vertices(), 10);
        assert_eq!(g.nb_edges(), 15);
        assert!(g.vertices().all(|v| g.degree(v) == 3));
    }
}
