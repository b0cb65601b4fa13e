//! Sufficient condition for Frank number 2 on cyclically 4-edge-connected
//! cubic graphs: some perfect matching leaves a 2-factor with exactly two
//! odd cycles that are tied together by a bridge configuration whose
//! suppressed edges behave as strong 2-edges.

mod configuration;
mod matching;
mod two_factor;
mod witness;

use word_bitset::prelude::*;

use crate::filter::Counters;
use crate::graph::{CubicGraph, NO_NODE};

#[derive(Clone, Default)]
pub struct HeuristicOptions {
    /// Materialize and validate the two witness orientations whenever the
    /// condition fires. A validation failure is a bug, not bad input, and
    /// aborts.
    pub double_check: bool,
    pub print_orientations: bool,
}

/// Enumerates the perfect matchings of `graph` and reports whether any of
/// them exposes one of the two bridge configurations. Only meaningful for
/// cyclically 4-edge-connected inputs.
pub fn satisfies_sufficient_condition<W: BitWord>(
    graph: &CubicGraph<W>,
    options: &HeuristicOptions,
    counters: &mut Counters,
) -> bool {
    let mut scratch = graph.clone();
    let mut f = vec![NO_NODE; graph.number_of_nodes() as usize];
    matching::for_each_perfect_matching(graph, &mut f, &mut |f| {
        configuration::check_two_factor(&mut scratch, f, options, counters)
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;

    fn run(graph: &CubicGraph<u64>, double_check: bool) -> (bool, Counters) {
        let options = HeuristicOptions {
            double_check,
            ..HeuristicOptions::default()
        };
        let mut counters = Counters::default();
        let hit = satisfies_sufficient_condition(graph, &options, &mut counters);
        (hit, counters)
    }

    #[test]
    fn pentagonal_prism_satisfies_the_direct_bridge_configuration() {
        // the spoke matching leaves two odd pentagons connected by spokes
        let (hit, counters) = run(&pentagonal_prism(), false);
        assert!(hit);
        assert_eq!(counters.direct_bridge_hits, 1);
        assert_eq!(counters.bridge_path_hits, 0);
    }

    #[test]
    fn pentagonal_prism_witness_orientations_validate() {
        // double-check mode panics if the built orientations were not
        // complementary
        let (hit, _) = run(&pentagonal_prism(), true);
        assert!(hit);
    }

    #[test]
    fn ring_linked_pentagons_need_the_bridge_path_configuration() {
        let (hit, counters) = run(&ring_linked_pentagons(), true);
        assert!(hit);
        assert_eq!(counters.bridge_path_hits, 1);
        assert_eq!(counters.direct_bridge_hits, 0);
    }

    #[test]
    fn petersen_graph_fails_the_condition() {
        // every 2-factor gives two odd pentagons, but no circuit
        // orientation is consistent
        let (hit, _) = run(&petersen(), false);
        assert!(!hit);
    }

    #[test]
    fn graphs_without_two_odd_cycles_fail() {
        // all 2-factors of K4 and K3,3 are single even cycles
        assert!(!run(&k4(), false).0);
        assert!(!run(&k33(), false).0);
    }

    #[test]
    fn heuristic_success_implies_exact_success() {
        use crate::exact::{frank_number_is_two, DeletablePool, ExactOptions};

        for graph in [k4(), k33(), petersen(), pentagonal_prism()] {
            let (hit, _) = run(&graph, false);
            if hit {
                let mut pool = DeletablePool::default();
                let mut counters = Counters::default();
                assert!(frank_number_is_two(
                    &graph,
                    &ExactOptions::default(),
                    &mut pool,
                    &mut counters
                ));
            }
        }
    }
}
