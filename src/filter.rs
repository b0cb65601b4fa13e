//! Per-graph decision pipeline: optionally the two-odd-cycles heuristic,
//! then the exact engine, sharing one set of statistics counters.

use std::fmt;
use std::str::FromStr;

use log::debug;
use thiserror::Error;
use word_bitset::prelude::*;

use crate::exact::{self, DeletablePool, ExactOptions};
use crate::graph::CubicGraph;
use crate::heuristic::{self, HeuristicOptions};

/// A residue class `res/mod` splitting work across independent processes,
/// either over the input graphs or over the orientations of a single graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shard {
    pub remainder: u64,
    pub modulo: u64,
}

impl Default for Shard {
    fn default() -> Self {
        Self {
            remainder: 0,
            modulo: 1,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid res/mod pair: expected `res/mod` with 0 <= res < mod")]
pub struct ShardParseError;

impl FromStr for Shard {
    type Err = ShardParseError;

    fn from_str(value: &str) -> Result<Self, ShardParseError> {
        let (res, modulo) = value.split_once('/').ok_or(ShardParseError)?;
        let shard = Self {
            remainder: res.parse().map_err(|_| ShardParseError)?,
            modulo: modulo.parse().map_err(|_| ShardParseError)?,
        };
        if shard.remainder < shard.modulo {
            Ok(shard)
        } else {
            Err(ShardParseError)
        }
    }
}

impl fmt::Display for Shard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.remainder, self.modulo)
    }
}

#[derive(Clone, Default)]
pub struct FilterOptions {
    /// Stop after the heuristic; a negative answer then only means the
    /// sufficient condition failed.
    pub heuristic_only: bool,
    /// Skip the heuristic entirely. Mandatory for inputs that are not
    /// cyclically 4-edge-connected.
    pub exact_only: bool,
    pub brute_force: bool,
    pub double_check: bool,
    pub print_orientations: bool,
    /// Shard the orientations of a single input graph instead of the input
    /// stream.
    pub single_graph_shard: Option<Shard>,
}

/// Tallies across one graph and across the whole stream, mirrored into the
/// verbose output.
#[derive(Clone, Default)]
pub struct Counters {
    pub total_orientations_generated: u64,
    pub strongly_connected_orientations: u64,
    pub orientations_giving_subset: u64,
    pub orientations_giving_superset: u64,
    pub complementary_sets: u64,
    pub stored_sets: u64,
    pub empty_slots: u64,
    pub most_strongly_connected: u64,
    pub most_stored_sets: u64,
    pub graphs_satisfying_condition: u64,
    pub graphs_not_satisfying_condition: u64,
    pub direct_bridge_hits: u64,
    pub bridge_path_hits: u64,
}

impl Counters {
    /// Clears the per-graph tallies, folding peaks into the stream-wide
    /// high-water marks.
    pub fn start_graph(&mut self) {
        self.most_strongly_connected = self
            .most_strongly_connected
            .max(self.strongly_connected_orientations);
        self.most_stored_sets = self.most_stored_sets.max(self.stored_sets);
        self.total_orientations_generated = 0;
        self.strongly_connected_orientations = 0;
        self.orientations_giving_subset = 0;
        self.orientations_giving_superset = 0;
        self.complementary_sets = 0;
        self.stored_sets = 0;
        self.empty_slots = 0;
    }
}

/// Decides whether `graph` has Frank number 2. With `heuristic_only`, a
/// `false` merely means the sufficient condition did not fire.
pub fn decide<W: BitWord>(
    graph: &CubicGraph<W>,
    options: &FilterOptions,
    pool: &mut DeletablePool<W>,
    counters: &mut Counters,
) -> bool {
    if !options.exact_only {
        let heuristic_options = HeuristicOptions {
            double_check: options.double_check,
            print_orientations: options.print_orientations,
        };
        if heuristic::satisfies_sufficient_condition(graph, &heuristic_options, counters) {
            counters.graphs_satisfying_condition += 1;
            return true;
        }
        counters.graphs_not_satisfying_condition += 1;
        debug!(
            "heuristic failed, {}",
            if options.heuristic_only {
                "not doing the exhaustive check"
            } else {
                "doing the exhaustive check"
            }
        );
    }

    if options.heuristic_only {
        return false;
    }

    let exact_options = ExactOptions {
        brute_force: options.brute_force,
        shard: options.single_graph_shard,
        print_orientations: options.print_orientations,
    };
    exact::frank_number_is_two(graph, &exact_options, pool, counters)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;

    #[test]
    fn shard_parsing() {
        assert_eq!(
            "0/4".parse::<Shard>(),
            Ok(Shard {
                remainder: 0,
                modulo: 4
            })
        );
        assert_eq!(
            "3/4".parse::<Shard>(),
            Ok(Shard {
                remainder: 3,
                modulo: 4
            })
        );
        assert!("4/4".parse::<Shard>().is_err());
        assert!("4".parse::<Shard>().is_err());
        assert!("a/4".parse::<Shard>().is_err());
        assert!("1/".parse::<Shard>().is_err());
        assert_eq!(format!("{}", Shard::default()), "0/1");
    }

    #[test]
    fn heuristic_and_exact_paths_agree_on_the_pentagonal_prism() {
        let graph = pentagonal_prism();
        let mut counters = Counters::default();
        let mut pool = DeletablePool::default();

        let via_heuristic = decide(&graph, &FilterOptions::default(), &mut pool, &mut counters);
        assert!(via_heuristic);
        assert_eq!(counters.graphs_satisfying_condition, 1);

        let exact_only = FilterOptions {
            exact_only: true,
            ..FilterOptions::default()
        };
        counters.start_graph();
        assert!(decide(&graph, &exact_only, &mut pool, &mut counters));
    }

    #[test]
    fn heuristic_only_mode_reports_failures() {
        // the heuristic alone cannot decide the Petersen graph
        let options = FilterOptions {
            heuristic_only: true,
            ..FilterOptions::default()
        };
        let mut counters = Counters::default();
        let mut pool = DeletablePool::default();
        assert!(!decide(&petersen(), &options, &mut pool, &mut counters));
        assert_eq!(counters.graphs_not_satisfying_condition, 1);
    }

    #[test]
    fn high_water_marks_survive_graph_resets() {
        let mut counters = Counters::default();
        counters.strongly_connected_orientations = 7;
        counters.stored_sets = 3;
        counters.start_graph();
        assert_eq!(counters.most_strongly_connected, 7);
        assert_eq!(counters.most_stored_sets, 3);
        assert_eq!(counters.strongly_connected_orientations, 0);
    }
}
