//! Exact decision of the Frank-number-2 property: enumerate all strongly
//! connected orientations and look for a pair whose deletable-edge sets
//! together cover every edge.

pub mod brute_force;
pub mod constraint;
mod enumerate;

pub use brute_force::{DeletablePool, PoolVerdict};
pub use constraint::ComplementSearch;

use word_bitset::prelude::*;

use crate::errors::InvariantCheck;
use crate::filter::{Counters, Shard};
use crate::graph::{CubicGraph, EdgeNumbering};

#[derive(Clone, Default)]
pub struct ExactOptions {
    /// Compare deletable-edge sets pairwise instead of running the
    /// constraint search per orientation.
    pub brute_force: bool,
    /// Process only every `modulo`-th generated orientation; a positive
    /// answer of any residue class stands, a negative one needs all classes.
    pub shard: Option<Shard>,
    pub print_orientations: bool,
}

/// Does `graph` admit two strongly connected orientations whose deletable
/// edges cover all of `E(G)`? The graph must be cubic and 3-edge-connected.
pub fn frank_number_is_two<W: BitWord>(
    graph: &CubicGraph<W>,
    options: &ExactOptions,
    pool: &mut DeletablePool<W>,
    counters: &mut Counters,
) -> bool {
    let numbering = EdgeNumbering::new(graph);
    pool.reset(numbering.all_edges());

    let found =
        enumerate::OrientationSearch::new(graph, &numbering, options, pool, counters).run();

    if options.brute_force {
        counters.stored_sets = pool.len() as u64;
        counters.empty_slots = pool.tombstones() as u64;
        if options.shard.is_none() {
            // every edge of a 3-edge-connected cubic graph is deletable in
            // some strongly connected orientation, so the pool must cover
            // E(G) once the enumeration has run to completion
            assert!(
                pool.union_of_live() == numbering.all_edges::<W>(),
                "deletable-edge pool does not cover the edge set"
            );
            debug_assert!(pool.is_correct().is_ok() || found);
        }
    }

    found
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;

    fn decide_smart(graph: &CubicGraph<u64>) -> bool {
        let options = ExactOptions::default();
        let mut pool = DeletablePool::default();
        let mut counters = Counters::default();
        frank_number_is_two(graph, &options, &mut pool, &mut counters)
    }

    fn decide_brute(graph: &CubicGraph<u64>) -> bool {
        let options = ExactOptions {
            brute_force: true,
            ..ExactOptions::default()
        };
        let mut pool = DeletablePool::default();
        let mut counters = Counters::default();
        frank_number_is_two(graph, &options, &mut pool, &mut counters)
    }

    #[test]
    fn k4_has_frank_number_two() {
        assert!(decide_smart(&k4()));
        assert!(decide_brute(&k4()));
    }

    #[test]
    fn prism_engines_agree() {
        assert_eq!(decide_smart(&prism()), decide_brute(&prism()));
        assert!(decide_smart(&prism()));
    }

    #[test]
    fn k33_has_frank_number_two() {
        assert!(decide_smart(&k33()));
        assert!(decide_brute(&k33()));
    }

    #[test]
    fn pentagonal_prism_has_frank_number_two() {
        assert!(decide_smart(&pentagonal_prism()));
    }

    #[test]
    fn petersen_graph_has_larger_frank_number() {
        // the classic tight example: no two strongly connected orientations
        // of the Petersen graph cover all edges with deletable ones
        assert!(!decide_smart(&petersen()));
    }

    #[test]
    fn engines_agree_on_random_cubic_graphs() {
        use rand::SeedableRng;
        let mut rng = rand_pcg::Pcg64::seed_from_u64(99);
        let mut checked = 0;
        while checked < 6 {
            let graph = random_cubic(&mut rng, 8);
            if !is_three_edge_connected(&graph) {
                continue;
            }
            checked += 1;
            assert_eq!(decide_smart(&graph), decide_brute(&graph));
        }
    }

    #[test]
    fn orientation_shards_partition_the_search() {
        for graph in [k4(), prism(), petersen()] {
            let full = decide_smart(&graph);
            let modulo = 3;
            let sharded = (0..modulo).any(|remainder| {
                let options = ExactOptions {
                    shard: Some(Shard { remainder, modulo }),
                    ..ExactOptions::default()
                };
                let mut pool = DeletablePool::default();
                let mut counters = Counters::default();
                frank_number_is_two(&graph, &options, &mut pool, &mut counters)
            });
            assert_eq!(full, sharded);
        }
    }
}
