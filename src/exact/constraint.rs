//! Completion search for a complementary orientation: given the deletable
//! set Δ of one strongly connected orientation, build a second orientation
//! in which every edge outside Δ is deletable.
//!
//! Local structure drives the propagation. In any strongly connected
//! orientation of a cubic graph each vertex has either two out- and one
//! in-arc or the reverse, and the minority arc is never deletable. Hence at
//! most two edges per vertex lie in Δ, and the target orientation must make
//! the minority arc of every vertex a Δ-edge: two Δ-edges at a vertex take
//! opposite directions there, two non-Δ-edges the same direction.

use word_bitset::prelude::*;

use crate::graph::{CubicGraph, DiGraph, EdgeNumbering, Node};

pub struct ComplementSearch<'a, W: BitWord> {
    graph: &'a CubicGraph<W>,
    numbering: &'a EdgeNumbering,
    all_edges: WordSet<W>,
    deletable: WordSet<W>,
    orientation: DiGraph<W>,
    snapshots: Vec<DiGraph<W>>,
}

impl<'a, W: BitWord> ComplementSearch<'a, W> {
    pub fn new(graph: &'a CubicGraph<W>, numbering: &'a EdgeNumbering) -> Self {
        let n = graph.number_of_nodes();
        let m = numbering.edges().len();
        Self {
            graph,
            numbering,
            all_edges: numbering.all_edges(),
            deletable: WordSet::new(),
            orientation: DiGraph::new(n),
            snapshots: (0..m).map(|_| DiGraph::new(n)).collect(),
        }
    }

    /// Searches for an orientation whose deletable set together with
    /// `deletable` covers every edge. On success returns the witness and its
    /// deletable set.
    pub fn find(&mut self, deletable: WordSet<W>) -> Option<(&DiGraph<W>, WordSet<W>)> {
        self.deletable = deletable;
        self.orientation.clear();

        // fix the first arc: the all-reversed orientation has the same
        // deletable set, so one direction suffices
        let v0 = self.graph.neighbors_of(0).lowest_set_bit().unwrap();
        if !self.try_orient(0, v0) {
            return None;
        }
        match self.descend(0) {
            Some(witness_deletable) => Some((&self.orientation, witness_deletable)),
            None => None,
        }
    }

    /// Branches over the orientation of every still-free edge in canonical
    /// order; returns the witness deletable set once all edges are oriented
    /// consistently.
    fn descend(&mut self, edge: usize) -> Option<WordSet<W>> {
        let edges = self.numbering.edges();
        if edge == edges.len() {
            debug_assert_eq!(self.orientation.number_of_arcs() as usize, edges.len());
            let witness_deletable = self.orientation.deletable_edges(self.numbering);
            return ((self.deletable | witness_deletable) == self.all_edges)
                .then_some(witness_deletable);
        }

        let (u, v) = edges[edge];
        if self.orientation.has_arc(u, v) || self.orientation.has_arc(v, u) {
            return self.descend(edge + 1);
        }

        self.snapshots[edge].copy_from(&self.orientation);

        if self.try_orient(u, v) {
            if let Some(found) = self.descend(edge + 1) {
                return Some(found);
            }
        }
        self.orientation.copy_from(&self.snapshots[edge]);

        if self.try_orient(v, u) {
            if let Some(found) = self.descend(edge + 1) {
                return Some(found);
            }
        }
        self.orientation.copy_from(&self.snapshots[edge]);

        None
    }

    /// Adds the arc `x -> y` and propagates everything it forces. A `false`
    /// return means contradiction; the caller rolls back to its snapshot.
    fn try_orient(&mut self, x: Node, y: Node) -> bool {
        if self.orientation.has_arc(x, y) {
            return true;
        }
        if self.orientation.has_arc(y, x) {
            return false;
        }
        if self.orientation.out_degree(x) >= 2 || self.orientation.in_degree(y) >= 2 {
            return false;
        }

        let in_delta = self.deletable.get_bit(self.numbering.edge_index(x, y));
        if in_delta {
            // a second Δ-edge already aligned with xy at a shared endpoint
            // contradicts the alternation requirement
            for w in self.other_neighbors(x, y).iter_set_bits() {
                if self.is_deletable(x, w) && self.orientation.has_arc(x, w) {
                    return false;
                }
            }
            for w in self.other_neighbors(y, x).iter_set_bits() {
                if self.is_deletable(y, w) && self.orientation.has_arc(w, y) {
                    return false;
                }
            }
        } else {
            // xy has to be deletable here, so both endpoints need one in-
            // and one out-arc among their other two edges
            if self.orientation.out_degree(x) >= 2 || self.orientation.in_degree(x) >= 2 {
                return false;
            }
            if self.orientation.out_degree(y) >= 2 || self.orientation.in_degree(y) >= 2 {
                return false;
            }
        }

        self.orientation.add_arc(x, y);

        // a vertex with two out-arcs and no in-arc needs its last edge inward
        if self.orientation.out_degree(x) == 2 && self.orientation.in_degree(x) == 0 {
            let w = (self.graph.neighbors_of(x) - self.orientation.out_neighbors(x))
                .lowest_set_bit()
                .unwrap();
            if !self.try_orient(w, x) {
                return false;
            }
        }
        if self.orientation.out_degree(y) == 0 && self.orientation.in_degree(y) == 2 {
            let w = (self.graph.neighbors_of(y) - self.orientation.in_neighbors(y))
                .lowest_set_bit()
                .unwrap();
            if !self.try_orient(y, w) {
                return false;
            }
        }

        if in_delta {
            // alternation: the partner Δ-edge of xy at x points into x, the
            // one at y leaves y
            for w in self.other_neighbors(x, y).iter_set_bits() {
                if self.is_deletable(x, w) && !self.try_orient(w, x) {
                    return false;
                }
            }
            for w in self.other_neighbors(y, x).iter_set_bits() {
                if self.is_deletable(y, w) && !self.try_orient(y, w) {
                    return false;
                }
            }

            // a Δ-edge flanked by two non-Δ-edges is the minority arc of its
            // endpoint: both others take the opposite direction
            if self.others_non_deletable(x, y) {
                for w in self.other_neighbors(x, y).iter_set_bits() {
                    if !self.try_orient(w, x) {
                        return false;
                    }
                }
            }
            if self.others_non_deletable(y, x) {
                for w in self.other_neighbors(y, x).iter_set_bits() {
                    if !self.try_orient(y, w) {
                        return false;
                    }
                }
            }
        } else {
            // y has its in-arc from xy and one out-arc: the remaining edge
            // must point inward to keep xy deletable
            if self.orientation.out_degree(y) == 1 && self.orientation.in_degree(y) == 1 {
                let w = (self.graph.neighbors_of(y)
                    - self.orientation.out_neighbors(y)
                    - self.orientation.in_neighbors(y))
                .lowest_set_bit()
                .unwrap();
                if !self.try_orient(w, y) {
                    return false;
                }
            }

            // non-Δ-edges sharing a vertex leave or enter it together
            let other = self
                .other_neighbors(x, y)
                .iter_set_bits()
                .find(|&w| !self.is_deletable(x, w));
            if let Some(w) = other {
                if !self.try_orient(x, w) {
                    return false;
                }
            }
            let other = self
                .other_neighbors(y, x)
                .iter_set_bits()
                .find(|&w| !self.is_deletable(y, w));
            if let Some(w) = other {
                if !self.try_orient(w, y) {
                    return false;
                }
            }
        }

        true
    }

    #[inline]
    fn other_neighbors(&self, u: Node, excluded: Node) -> WordSet<W> {
        self.graph.neighbors_of(u) - WordSet::singleton(excluded)
    }

    #[inline]
    fn is_deletable(&self, u: Node, v: Node) -> bool {
        self.deletable.get_bit(self.numbering.edge_index(u, v))
    }

    fn others_non_deletable(&self, u: Node, excluded: Node) -> bool {
        self.other_neighbors(u, excluded)
            .iter_set_bits()
            .all(|w| !self.is_deletable(u, w))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;

    /// Deletable set of the K4 orientation 0->1->2->0, 0->3, 3->1, 2->3.
    fn k4_deletable() -> (CubicGraph<u64>, EdgeNumbering, WordSet<u64>) {
        let graph = k4();
        let numbering = EdgeNumbering::new(&graph);
        let mut orientation = DiGraph::new(4);
        for (u, v) in [(0, 1), (1, 2), (2, 0), (0, 3), (3, 1), (2, 3)] {
            orientation.add_arc(u, v);
        }
        let deletable = orientation.deletable_edges(&numbering);
        (graph, numbering, deletable)
    }

    #[test]
    fn finds_a_complement_for_the_oriented_k4() {
        let (graph, numbering, deletable) = k4_deletable();
        let mut search = ComplementSearch::new(&graph, &numbering);
        let (witness, witness_deletable) = search.find(deletable).unwrap();

        assert_eq!(witness.number_of_arcs(), 6);
        assert!(witness.is_strongly_connected());
        assert_eq!(
            deletable | witness_deletable,
            numbering.all_edges::<u64>()
        );
    }

    #[test]
    fn rejects_an_uncoverable_deletable_set() {
        // an empty Δ asks for an orientation in which every edge is
        // deletable; vertex degrees make that impossible in a cubic graph
        let graph = k4();
        let numbering = EdgeNumbering::new(&graph);
        let mut search = ComplementSearch::new(&graph, &numbering);
        assert!(search.find(WordSet::new()).is_none());
    }
}
