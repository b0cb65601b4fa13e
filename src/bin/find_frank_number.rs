//! Filter 3-edge-connected cubic graphs by whether their Frank number
//! equals 2. Graphs stream through in graph6 format, one per line; graphs
//! failing the filter are echoed to stdout.

use std::io::{self, BufRead};
use std::time::Instant;

use log::{debug, info, warn, LevelFilter};
use structopt::StructOpt;
use word_bitset::prelude::*;

use frankn::exact::DeletablePool;
use frankn::filter::{decide, Counters, FilterOptions, Shard};
use frankn::io::graph6;
use frankn::log::build_stderr_logger_for_verbosity;

#[derive(StructOpt)]
#[structopt(
    name = "find_frank_number",
    about = "Filter 3-edge-connected cubic graphs having Frank number 2.\n\n\
             Graphs are read from stdin in graph6 format and echoed to stdout \
             if their Frank number is not 2 (with --complement: if it is 2). \
             Unless --only-exact is given, correct answers are only guaranteed \
             for cyclically 4-edge-connected inputs."
)]
struct Opts {
    /// Only check the heuristic sufficient condition; needs cyclically
    /// 4-edge-connected inputs
    #[structopt(short = "2", long = "only-heuristic")]
    only_heuristic: bool,

    /// Use the brute-force pairwise comparison whenever the exact method runs
    #[structopt(short = "b", long = "brute-force")]
    brute_force: bool,

    /// Invert the output: echo the graphs with Frank number 2
    #[structopt(short = "c", long = "complement")]
    complement: bool,

    /// Double-check heuristic successes by building both orientations
    #[structopt(short = "d", long = "double-check")]
    double_check: bool,

    /// Only run the exact method; required for inputs that are merely
    /// 3-edge-connected
    #[structopt(short = "e", long = "only-exact")]
    only_exact: bool,

    /// Print the witness orientations of graphs with Frank number 2 to stderr
    #[structopt(short = "p", long = "print-orientation")]
    print_orientation: bool,

    /// Shard the orientations of a single input graph over the res/mod
    /// classes instead of sharding the input stream
    #[structopt(short = "s", long = "single-graph-parallel")]
    single_graph_parallel: bool,

    /// More detailed statistics on stderr
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,

    /// Residue class `res/mod` with 0 <= res < mod: process only every
    /// mod-th graph (or orientation, with -s)
    #[structopt(name = "res/mod")]
    shard: Option<Shard>,
}

fn process<W: BitWord>(
    line: &str,
    options: &FilterOptions,
    pool: &mut DeletablePool<W>,
    counters: &mut Counters,
    print_labelling: bool,
) -> Option<bool> {
    let graph = match graph6::parse::<W>(line) {
        Ok(graph) => graph,
        Err(error) => {
            warn!("skipping invalid graph: {error}");
            return None;
        }
    };
    if !graph.is_cubic() || !graph.is_connected() {
        warn!("skipping graph that is not connected and cubic");
        return None;
    }
    if print_labelling {
        info!("Labelling of graph:\n{graph}");
    }
    Some(decide(&graph, options, pool, counters))
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_stderr_logger_for_verbosity(LevelFilter::Info, opts.verbose || opts.print_orientation);

    let mut print_orientation = opts.print_orientation;
    if print_orientation && opts.brute_force {
        warn!("no orientations will be printed for the brute-force method");
        print_orientation = false;
    }
    if opts.only_heuristic {
        warn!("Frank number can still be 2 even if the output says otherwise; only using the heuristic method");
    }
    if opts.brute_force {
        info!("using the brute-force method where an exact method is used");
    }
    if opts.only_exact {
        info!("only using the exact method");
    } else {
        warn!("the heuristic only works for cyclically 4-edge-connected graphs");
    }

    let shard = opts.shard.unwrap_or_default();
    if let Some(explicit) = opts.shard {
        info!("Class={explicit}");
    }
    let options = FilterOptions {
        heuristic_only: opts.only_heuristic,
        exact_only: opts.only_exact,
        brute_force: opts.brute_force,
        double_check: opts.double_check,
        print_orientations: print_orientation,
        single_graph_shard: opts.single_graph_parallel.then_some(shard),
    };

    let start = Instant::now();
    let mut counters = Counters::default();
    let mut pool64 = DeletablePool::<u64>::default();
    let mut pool128 = DeletablePool::<u128>::default();

    let mut total_graphs = 0u64;
    let mut checked_graphs = 0u64;
    let mut skipped_graphs = 0u64;
    let mut passed_graphs = 0u64;

    for line in io::stdin().lock().lines() {
        let line = line?;
        total_graphs += 1;

        if opts.single_graph_parallel && total_graphs >= 2 {
            warn!("do not input more than one graph with --single-graph-parallel");
            total_graphs -= 1;
            break;
        }
        if !opts.single_graph_parallel
            && (total_graphs - 1) % shard.modulo != shard.remainder
        {
            continue;
        }

        counters.start_graph();
        debug!("looking at {line}");

        let order = match graph6::order(&line) {
            Ok(order) => order,
            Err(error) => {
                warn!("skipping invalid graph: {error}");
                skipped_graphs += 1;
                continue;
            }
        };

        // the edge set has to fit the bitset width as well; prefer the
        // faster 64-bit path whenever possible
        let edges = 3 * order / 2;
        let verdict = if order == 0 || order % 2 != 0 {
            warn!("skipping graph of order {order}: not a cubic graph");
            None
        } else if edges <= 64 {
            process::<u64>(&line, &options, &mut pool64, &mut counters, print_orientation)
        } else if edges <= 128 {
            process::<u128>(&line, &options, &mut pool128, &mut counters, print_orientation)
        } else {
            warn!("skipping graph: order {order} does not fit the supported bitset widths");
            None
        };

        let Some(frank_two) = verdict else {
            skipped_graphs += 1;
            continue;
        };
        checked_graphs += 1;

        debug!(
            "strongly connected orientations generated: {}",
            counters.strongly_connected_orientations
        );
        if opts.brute_force {
            debug!(
                "sets stored: {} (empty slots: {}), subset hits: {}, superset hits: {}, complementary pairs: {}",
                counters.stored_sets,
                counters.empty_slots,
                counters.orientations_giving_subset,
                counters.orientations_giving_superset,
                counters.complementary_sets
            );
        }
        debug!(
            "{}",
            if frank_two {
                "Frank number = 2"
            } else {
                "Frank number >= 3"
            }
        );

        if frank_two == opts.complement {
            passed_graphs += 1;
            println!("{line}");
        }
    }
    counters.start_graph();

    info!(
        "Checked {} graphs in {:.4} seconds: {} {}.",
        checked_graphs,
        start.elapsed().as_secs_f64(),
        passed_graphs,
        match (opts.complement, opts.only_heuristic) {
            (true, false) => "have Frank number 2",
            (true, true) => "passed the sufficient condition",
            (false, false) => "have Frank number >= 3",
            (false, true) => "did not pass the sufficient condition",
        }
    );
    if skipped_graphs > 0 {
        warn!("{skipped_graphs} graphs were skipped");
    }
    if !opts.only_exact {
        info!(
            "{} graphs satisfied the sufficient condition ({} via a direct bridge, {} via a bridge path), {} did not",
            counters.graphs_satisfying_condition,
            counters.direct_bridge_hits,
            counters.bridge_path_hits,
            counters.graphs_not_satisfying_condition
        );
    }
    if opts.brute_force {
        info!(
            "largest deletable-set pool held {} entries",
            counters.most_stored_sets
        );
    }

    Ok(())
}
