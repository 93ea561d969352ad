use std::time::Instant;

use clap::{App, load_yaml};
use serde_json::json;

use dogs_clique::{CancellationToken, CliqueResult, run_search};
use dogs_clique::util::{read_params, export_results};


/** solves a CLIQUE problem by running the greedy extension from every vertex. */
fn solve() -> CliqueResult<()> {
    // parse arguments
    let yaml = load_yaml!("greedy_clique.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let params = read_params(&main_args)?;

    // solve it
    let t_start = Instant::now();
    let report = run_search(params.instance.clone(), &params.config, CancellationToken::new())?;
    let duration = t_start.elapsed().as_secs_f32();
    println!(
        "greedy clique took {:.3} seconds. Nb vertices: {} (seed {})",
        duration, report.size, report.seed
    );
    println!("clique: {:?}", report.clique.members());
    let stats = json!({
        "primal_list": vec![report.size],
        "time_searched": duration,
        "inst_name": params.inst_filename,
        "inst_type": params.instance_type,
        "report": report,
    });

    // export results
    export_results(
        &params.instance,
        report.clique.members(),
        &stats,
        params.perf_file.as_deref(),
        params.sol_file.as_deref(),
    )
}

pub fn main() {
    if let Err(e) = solve() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
