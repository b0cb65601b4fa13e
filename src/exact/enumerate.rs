use log::info;
use word_bitset::prelude::*;

use super::{ComplementSearch, DeletablePool, ExactOptions, PoolVerdict};
use crate::filter::Counters;
use crate::graph::{format_deletable_edges, CubicGraph, DiGraph, EdgeNumbering};

/// Depth-first enumeration of all orientations of a cubic graph, one edge of
/// the canonical numbering per recursion level.
pub(super) struct OrientationSearch<'a, W: BitWord> {
    graph: &'a CubicGraph<W>,
    numbering: &'a EdgeNumbering,
    options: &'a ExactOptions,
    pool: &'a mut DeletablePool<W>,
    counters: &'a mut Counters,
    orientation: DiGraph<W>,
    complement: ComplementSearch<'a, W>,
}

impl<'a, W: BitWord> OrientationSearch<'a, W> {
    pub(super) fn new(
        graph: &'a CubicGraph<W>,
        numbering: &'a EdgeNumbering,
        options: &'a ExactOptions,
        pool: &'a mut DeletablePool<W>,
        counters: &'a mut Counters,
    ) -> Self {
        Self {
            graph,
            numbering,
            options,
            pool,
            counters,
            orientation: DiGraph::new(graph.number_of_nodes()),
            complement: ComplementSearch::new(graph, numbering),
        }
    }

    pub(super) fn run(&mut self) -> bool {
        self.descend(0)
    }

    fn descend(&mut self, edge: usize) -> bool {
        if edge == self.numbering.edges().len() {
            return self.evaluate_oriented();
        }

        let (u, v) = self.numbering.edges()[edge];
        for (from, to) in [(u, v), (v, u)] {
            self.orientation.add_arc(from, to);
            // a vertex of a strongly connected cubic orientation never has
            // all three arcs aligned
            if self.orientation.out_degree(from) != 3
                && self.orientation.in_degree(to) != 3
                && self.descend(edge + 1)
            {
                self.orientation.remove_arc(from, to);
                return true;
            }
            self.orientation.remove_arc(from, to);
        }
        false
    }

    /// All edges are oriented: filter and hand over to one of the
    /// complementary-orientation strategies.
    fn evaluate_oriented(&mut self) -> bool {
        self.counters.total_orientations_generated += 1;

        if let Some(shard) = &self.options.shard {
            if self.counters.total_orientations_generated % shard.modulo != shard.remainder {
                return false;
            }
        }

        if !self.orientation.is_strongly_connected() {
            return false;
        }

        let deletable = self.orientation.deletable_edges(self.numbering);

        // a vertex with three non-deletable incident edges rules out any
        // complementary partner
        let blocked = self.graph.vertices().any(|u| {
            self.graph
                .neighbors_of(u)
                .iter_set_bits()
                .all(|v| !deletable.get_bit(self.numbering.edge_index(u, v)))
        });
        if blocked {
            return false;
        }

        self.counters.strongly_connected_orientations += 1;

        if self.options.brute_force {
            return match self.pool.offer(deletable) {
                PoolVerdict::Complementary => {
                    self.counters.complementary_sets += 1;
                    true
                }
                PoolVerdict::Dominated => {
                    self.counters.orientations_giving_subset += 1;
                    false
                }
                PoolVerdict::Inserted { superseded } => {
                    if superseded {
                        self.counters.orientations_giving_superset += 1;
                    }
                    false
                }
            };
        }

        match self.complement.find(deletable) {
            Some((witness, witness_deletable)) => {
                if self.options.print_orientations {
                    info!(
                        "{}",
                        format_deletable_edges(&self.orientation, self.numbering, deletable)
                    );
                    info!("First orientation:\n{}", self.orientation);
                    info!(
                        "{}",
                        format_deletable_edges(witness, self.numbering, witness_deletable)
                    );
                    info!("Second orientation:\n{witness}");
                }
                true
            }
            None => false,
        }
    }
}
