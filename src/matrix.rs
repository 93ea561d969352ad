use std::fs;

use nom::IResult;
use nom::character::complete::{digit1, multispace0};
use nom::combinator::map_res;
use nom::multi::many0;
use nom::sequence::preceded;

use crate::error::{CliqueError, CliqueResult};
use crate::graph::AdjacencyGraph;

/// reads an unsigned integer, skipping leading whitespace
fn read_integer(s:&str) -> IResult<&str, usize> {
    preceded(multispace0, map_res(digit1, |d:&str| d.parse::<usize>()))(s)
}

/** reads the vertex count followed by every integer of the matrix.
stops at the first token that is not an unsigned integer.
*/
pub fn read_matrix(s:&str) -> IResult<&str, (usize, Vec<usize>)> {
    let (s, n) = read_integer(s)?;
    let (s, flags) = many0(read_integer)(s)?;
    let (s, _) = multispace0(s)?;
    Ok((s, (n, flags)))
}

/** builds a graph from the `adjacency_matrix.txt` format:
the number of vertices N, then N*N flags (0 or 1), row-major, separated by whitespace.
*/
pub fn read_from_str(s:&str) -> CliqueResult<AdjacencyGraph> {
    let (remaining, (n, flags)) = read_matrix(s)
        .map_err(|e| CliqueError::Parse(format!("unable to read the vertex count: {}", e)))?;
    if !remaining.is_empty() {
        let excerpt:String = remaining.chars().take(20).collect();
        return Err(CliqueError::Parse(format!(
            "unexpected content after {} flags: '{}'", flags.len(), excerpt
        )));
    }
    let mut adjacent = Vec::with_capacity(flags.len());
    for (k,flag) in flags.iter().enumerate() {
        match flag {
            0 => adjacent.push(false),
            1 => adjacent.push(true),
            _ => {
                let (i,j) = if n > 0 { (k / n, k % n) } else { (0, k) };
                return Err(CliqueError::Parse(format!(
                    "invalid adjacency flag {} at row {} column {} (expected 0 or 1)", flag, i, j
                )));
            }
        }
    }
    AdjacencyGraph::from_flags(n, &adjacent)
}

/// reads a graph from an `adjacency_matrix.txt` file
pub fn read_from_file(filename:&str) -> CliqueResult<AdjacencyGraph> {
    let s = fs::read_to_string(filename)?;
    read_from_str(&s)
}
