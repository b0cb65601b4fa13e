use std::fmt::{self, Display, Formatter, Write as _};

use smallvec::SmallVec;
use word_bitset::prelude::*;

use super::{EdgeNumbering, Node, NumEdges, NumNodes};
use crate::errors::{DigraphInvariant, InvariantCheck};

type NodeStack = SmallVec<[Node; 128]>;

/// Directed graph as forward plus reverse adjacency bitsets.
///
/// A full orientation of a cubic graph has `3n/2` arcs and no anti-parallel
/// pair; partial orientations occur as intermediate states of the
/// enumerators.
#[derive(Clone, PartialEq, Eq)]
pub struct DiGraph<W: BitWord> {
    out: Vec<WordSet<W>>,
    inn: Vec<WordSet<W>>,
    num_arcs: NumEdges,
}

impl<W: BitWord> DiGraph<W> {
    pub fn new(number_of_nodes: NumNodes) -> Self {
        Self {
            out: vec![WordSet::new(); number_of_nodes as usize],
            inn: vec![WordSet::new(); number_of_nodes as usize],
            num_arcs: 0,
        }
    }

    #[inline]
    pub fn number_of_nodes(&self) -> NumNodes {
        self.out.len() as NumNodes
    }

    #[inline]
    pub fn number_of_arcs(&self) -> NumEdges {
        self.num_arcs
    }

    pub fn clear(&mut self) {
        self.out.fill(WordSet::new());
        self.inn.fill(WordSet::new());
        self.num_arcs = 0;
    }

    /// Overwrites `self` with `other` without reallocating.
    pub fn copy_from(&mut self, other: &Self) {
        self.out.copy_from_slice(&other.out);
        self.inn.copy_from_slice(&other.inn);
        self.num_arcs = other.num_arcs;
    }

    #[inline]
    pub fn add_arc(&mut self, u: Node, v: Node) {
        debug_assert!(!self.has_arc(u, v));
        self.out[u as usize].set_bit(v);
        self.inn[v as usize].set_bit(u);
        self.num_arcs += 1;
    }

    #[inline]
    pub fn remove_arc(&mut self, u: Node, v: Node) {
        debug_assert!(self.has_arc(u, v));
        self.out[u as usize].clear_bit(v);
        self.inn[v as usize].clear_bit(u);
        self.num_arcs -= 1;
    }

    #[inline]
    pub fn has_arc(&self, u: Node, v: Node) -> bool {
        self.out[u as usize].get_bit(v)
    }

    #[inline]
    pub fn out_neighbors(&self, u: Node) -> WordSet<W> {
        self.out[u as usize]
    }

    #[inline]
    pub fn in_neighbors(&self, u: Node) -> WordSet<W> {
        self.inn[u as usize]
    }

    #[inline]
    pub fn out_degree(&self, u: Node) -> NumNodes {
        self.out[u as usize].cardinality()
    }

    #[inline]
    pub fn in_degree(&self, u: Node) -> NumNodes {
        self.inn[u as usize].cardinality()
    }

    /// All arcs reversed. Reversal preserves strong connectivity and the
    /// deletable-edge set.
    pub fn reversed(&self) -> Self {
        Self {
            out: self.inn.clone(),
            inn: self.out.clone(),
            num_arcs: self.num_arcs,
        }
    }

    /// Two-pass strong-connectivity check: a forward DFS over all roots
    /// produces a post-order; the digraph is strongly connected iff the
    /// backward reachability set of the last finished vertex is everything.
    ///
    /// Runs on the exact-engine hot path, so all scratch state lives on the
    /// stack.
    pub fn is_strongly_connected(&self) -> bool {
        let n = self.number_of_nodes();
        debug_assert!(n > 0);

        let mut unvisited = WordSet::<W>::new_all_set(n);
        let mut stack = NodeStack::new();
        let mut last_finished = 0;

        for root in 0..n {
            if !unvisited.get_bit(root) {
                continue;
            }
            unvisited.clear_bit(root);
            stack.push(root);
            while let Some(&u) = stack.last() {
                if let Some(v) = (self.out[u as usize] & unvisited).lowest_set_bit() {
                    unvisited.clear_bit(v);
                    stack.push(v);
                } else {
                    last_finished = u;
                    stack.pop();
                }
            }
        }

        let mut reached = WordSet::<W>::singleton(last_finished);
        stack.push(last_finished);
        while let Some(u) = stack.pop() {
            for v in (self.inn[u as usize] - reached).iter_set_bits() {
                reached.set_bit(v);
                stack.push(v);
            }
        }

        reached.cardinality() == n
    }

    /// Is there a directed path from `from` to `to`?
    pub fn has_directed_path(&self, from: Node, to: Node) -> bool {
        let mut visited = WordSet::<W>::singleton(from);
        let mut stack = NodeStack::new();
        stack.push(from);
        while let Some(u) = stack.pop() {
            if self.out[u as usize].get_bit(to) {
                return true;
            }
            for v in (self.out[u as usize] - visited).iter_set_bits() {
                visited.set_bit(v);
                stack.push(v);
            }
        }
        false
    }

    /// The deletable edges of a strongly connected orientation: every arc is
    /// removed in turn and kept in the result iff an alternative directed
    /// path between its endpoints survives.
    pub fn deletable_edges(&mut self, numbering: &EdgeNumbering) -> WordSet<W> {
        debug_assert!(self.is_strongly_connected());

        let mut deletable = WordSet::new();
        for u in 0..self.number_of_nodes() {
            for v in self.out[u as usize].iter_set_bits() {
                self.remove_arc(u, v);
                if self.has_directed_path(u, v) {
                    deletable.set_bit(numbering.edge_index(u, v));
                }
                self.add_arc(u, v);
            }
        }
        deletable
    }
}

impl<W: BitWord> InvariantCheck<DigraphInvariant> for DiGraph<W> {
    fn is_correct(&self) -> Result<(), DigraphInvariant> {
        let mut arcs = 0;
        for u in 0..self.number_of_nodes() {
            arcs += self.out_degree(u);
            for v in self.out[u as usize].iter_set_bits() {
                if !self.inn[v as usize].get_bit(u) {
                    return Err(DigraphInvariant::MissingMirror(u, v));
                }
            }
            for v in self.inn[u as usize].iter_set_bits() {
                if !self.out[v as usize].get_bit(u) {
                    return Err(DigraphInvariant::MissingMirror(v, u));
                }
            }
        }
        if arcs != self.num_arcs {
            return Err(DigraphInvariant::ArcCount {
                stored: self.num_arcs,
                actual: arcs,
            });
        }
        Ok(())
    }
}

impl<W: BitWord> Display for DiGraph<W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for u in 0..self.number_of_nodes() {
            write!(f, "{u}:")?;
            for v in self.out[u as usize].iter_set_bits() {
                write!(f, " {v}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Renders a deletable-edge set as endpoint pairs, following the arc
/// directions of the orientation it belongs to.
pub fn format_deletable_edges<W: BitWord>(
    orientation: &DiGraph<W>,
    numbering: &EdgeNumbering,
    deletable: WordSet<W>,
) -> String {
    let mut line = String::from("Deletable edges:");
    for u in 0..orientation.number_of_nodes() {
        for v in orientation.out_neighbors(u).iter_set_bits() {
            if deletable.get_bit(numbering.edge_index(u, v)) {
                let _ = write!(line, " {u}--{v}");
            }
        }
    }
    line
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use itertools::Itertools;

    /// Strongly connected orientation of K4: the triangle 0->1->2->0 plus
    /// 0->3, 3->1, 2->3.
    fn oriented_k4() -> (DiGraph<u64>, EdgeNumbering) {
        let graph = k4();
        let numbering = EdgeNumbering::new(&graph);
        let mut orientation = DiGraph::new(4);
        for (u, v) in [(0, 1), (1, 2), (2, 0), (0, 3), (3, 1), (2, 3)] {
            orientation.add_arc(u, v);
        }
        (orientation, numbering)
    }

    #[test]
    fn arc_bookkeeping() {
        let (mut orientation, _) = oriented_k4();
        assert_eq!(orientation.number_of_arcs(), 6);
        assert!(orientation.is_correct().is_ok());

        orientation.remove_arc(0, 3);
        assert_eq!(orientation.number_of_arcs(), 5);
        assert!(!orientation.has_arc(0, 3));
        assert!(orientation.is_correct().is_ok());
    }

    #[test]
    fn strong_connectivity() {
        let (mut orientation, _) = oriented_k4();
        assert!(orientation.is_strongly_connected());

        // removing 1->2 leaves vertex 1 without out-arcs
        orientation.remove_arc(1, 2);
        assert!(!orientation.is_strongly_connected());
    }

    #[test]
    fn directed_path() {
        let (mut orientation, _) = oriented_k4();
        orientation.remove_arc(0, 1);
        assert!(orientation.has_directed_path(0, 1)); // 0 -> 3 -> 1
        orientation.remove_arc(3, 1);
        orientation.remove_arc(1, 2);
        assert!(!orientation.has_directed_path(0, 1));
    }

    #[test]
    fn deletable_edges_of_oriented_k4() {
        let (mut orientation, numbering) = oriented_k4();
        let deletable = orientation.deletable_edges(&numbering);

        // exactly {0,1}, {0,3} and {2,3} survive a single-arc removal
        let expected = [(0, 1), (0, 3), (2, 3)]
            .iter()
            .map(|&(u, v)| numbering.edge_index(u, v))
            .collect_vec();
        assert_eq!(deletable.iter_set_bits().collect_vec(), expected);

        // the oracle restores the orientation it probes
        assert_eq!(orientation.number_of_arcs(), 6);
        assert!(orientation.is_correct().is_ok());
    }

    #[test]
    fn reversal_preserves_deletable_edges() {
        let (mut orientation, numbering) = oriented_k4();
        let deletable = orientation.deletable_edges(&numbering);
        let mut reversed = orientation.reversed();
        assert!(reversed.is_strongly_connected());
        assert_eq!(reversed.deletable_edges(&numbering), deletable);
    }
}
