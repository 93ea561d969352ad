use std::fs;
use std::sync::Arc;

use bit_set::BitSet;
use clap::ArgMatches;
use serde_json::Value;

use crate::{
    clique::is_clique,
    config::SearchConfig,
    dimacs,
    error::{CliqueError, CliqueResult},
    graph::{AdjacencyGraph, VertexId},
    matrix,
};

/** parameters read from the command line */
#[derive(Debug)]
pub struct Params {
    /// instance file name
    pub inst_filename: String,
    /// instance format ("matrix" or "dimacs")
    pub instance_type: String,
    /// graph read from the instance file
    pub instance: Arc<AdjacencyGraph>,
    /// search configuration
    pub config: SearchConfig,
    /// where to write the solution (if any)
    pub sol_file: Option<String>,
    /// where to write the performance statistics (if any)
    pub perf_file: Option<String>,
}

/** reads command line input, loads the instance and the search configuration */
pub fn read_params(main_args:&ArgMatches) -> CliqueResult<Params> {
    let inst_filename = main_args.value_of("instance")
        .ok_or_else(|| CliqueError::Config("no instance given".to_string()))?;
    let instance_type = main_args.value_of("type").unwrap_or("matrix");
    let config = SearchConfig::from_arg(main_args.value_of("workers"))?;
    // read value of the solution filename
    let sol_file = main_args.value_of("solution").map(|e| {
        println!("printing solutions in: {}", e);
        e.to_string()
    });
    // read value of the performance logs filename
    let perf_file = main_args.value_of("perf").map(|e| {
        println!("printing perfs in: {}\n", e);
        e.to_string()
    });
    // read instance file
    let instance = match instance_type {
        "matrix" => matrix::read_from_file(inst_filename)?,
        "dimacs" => dimacs::read_from_file(inst_filename)?,
        _ => return Err(CliqueError::Config(format!(
            "instance type unknown {} (valid: 'matrix', 'dimacs')", instance_type
        ))),
    };
    instance.display_statistics();
    println!("\t{} \t workers", config.workers);
    println!("=======================");
    Ok(Params {
        inst_filename: inst_filename.to_string(),
        instance_type: instance_type.to_string(),
        instance: Arc::new(instance),
        config,
        sol_file,
        perf_file,
    })
}

/// transforms a clique defined by a vector, to a clique defined by a vector of vector
pub fn clique_vec_to_vecvec(sol:&[VertexId], n:usize) -> Vec<Vec<VertexId>> {
    let mut inside_res:BitSet = BitSet::default();
    for i in sol { inside_res.insert(*i); }
    let non_clique = (0..n).filter(|i| !inside_res.contains(*i)).collect();
    vec![sol.to_vec(), non_clique]
}

/** writes a string encoding the solution (one line per part) */
pub fn solution_to_string(solution:&[Vec<VertexId>]) -> String {
    let mut res = String::default();
    for e in solution {
        let line:Vec<String> = e.iter().map(|v| v.to_string()).collect();
        res += line.join(" ").as_str();
        res += "\n";
    }
    res
}

/** exports search results to files.
the clique is checked first: an invalid clique is never written.
*/
pub fn export_results(
    instance:&AdjacencyGraph,
    clique:&[VertexId],
    stats:&Value,
    perf_file:Option<&str>,
    sol_file:Option<&str>,
) -> CliqueResult<()> {
    if let Some(filename) = perf_file {
        fs::write(filename, serde_json::to_string_pretty(stats)?)?;
    }
    if let Some(filename) = sol_file {
        if !is_clique(instance, clique) {
            return Err(CliqueError::Construction(format!("invalid clique {:?}, not exported", clique)));
        }
        let solution = clique_vec_to_vecvec(clique, instance.nb_vertices());
        fs::write(filename, solution_to_string(&solution))?;
    }
    Ok(())
}
