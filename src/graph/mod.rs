pub mod cyclic;
pub mod digraph;

pub type Node = u32;
pub type NumNodes = Node;
pub type NumEdges = u32;

/// Sentinel for "no vertex" in matching and orientation arrays.
pub const NO_NODE: Node = Node::MAX;

const NO_EDGE: NumEdges = NumEdges::MAX;

use std::ops::Range;

pub use cyclic::*;
pub use digraph::*;

use word_bitset::prelude::*;

/// Undirected cubic graph on at most `W::BITS` vertices, stored as one
/// neighbor bitset per vertex.
///
/// The symmetry invariant `v ∈ adj[u] ⇔ u ∈ adj[v]` is maintained by the
/// editing methods. Vertices are expected to have degree three; this is a
/// caller obligation checked via [`CubicGraph::is_cubic`].
#[derive(Clone, Debug)]
pub struct CubicGraph<W: BitWord> {
    adj: Vec<WordSet<W>>,
}

impl<W: BitWord> CubicGraph<W> {
    pub fn from_adjacency(adj: Vec<WordSet<W>>) -> Self {
        debug_assert!(adj.len() <= W::BITS as usize);
        Self { adj }
    }

    pub fn from_edges(
        number_of_nodes: NumNodes,
        edges: impl IntoIterator<Item = (Node, Node)>,
    ) -> Self {
        let mut graph = Self {
            adj: vec![WordSet::new(); number_of_nodes as usize],
        };
        for (u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    #[inline]
    pub fn number_of_nodes(&self) -> NumNodes {
        self.adj.len() as NumNodes
    }

    /// Number of edges of a cubic graph on this many vertices.
    #[inline]
    pub fn number_of_edges(&self) -> NumEdges {
        3 * self.number_of_nodes() / 2
    }

    #[inline]
    pub fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    #[inline]
    pub fn neighbors_of(&self, u: Node) -> WordSet<W> {
        self.adj[u as usize]
    }

    #[inline]
    pub fn has_edge(&self, u: Node, v: Node) -> bool {
        self.adj[u as usize].get_bit(v)
    }

    #[inline]
    pub fn add_edge(&mut self, u: Node, v: Node) {
        debug_assert_ne!(u, v);
        self.adj[u as usize].set_bit(v);
        self.adj[v as usize].set_bit(u);
    }

    #[inline]
    pub fn remove_edge(&mut self, u: Node, v: Node) {
        self.adj[u as usize].clear_bit(v);
        self.adj[v as usize].clear_bit(u);
    }

    pub fn is_cubic(&self) -> bool {
        self.adj.iter().all(|nbrs| nbrs.cardinality() == 3)
    }

    pub fn is_connected(&self) -> bool {
        let n = self.number_of_nodes();
        if n == 0 {
            return true;
        }
        let mut seen = WordSet::<W>::singleton(0);
        let mut stack = vec![0 as Node];
        while let Some(u) = stack.pop() {
            for v in (self.neighbors_of(u) - seen).iter_set_bits() {
                seen.set_bit(v);
                stack.push(v);
            }
        }
        seen.cardinality() == n
    }
}

impl<W: BitWord> std::fmt::Display for CubicGraph<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for u in self.vertices() {
            write!(f, "{u}:")?;
            for v in self.neighbors_of(u).iter_set_bits() {
                write!(f, " {v}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Canonical numbering of the edges of a cubic graph: vertices are walked in
/// ascending order and every neighbor with a strictly larger index receives
/// the next free edge index. The table is symmetric, its image is exactly
/// `0..3n/2`.
pub struct EdgeNumbering {
    number_of_nodes: NumNodes,
    ids: Vec<NumEdges>,
    edges: Vec<(Node, Node)>,
}

impl EdgeNumbering {
    pub fn new<W: BitWord>(graph: &CubicGraph<W>) -> Self {
        let n = graph.number_of_nodes();
        let mut ids = vec![NO_EDGE; (n as usize) * (n as usize)];
        let mut edges = Vec::with_capacity(graph.number_of_edges() as usize);

        for u in graph.vertices() {
            let mut next = graph.neighbors_of(u).next_set_bit_after(u);
            while let Some(v) = next {
                let id = edges.len() as NumEdges;
                ids[(u * n + v) as usize] = id;
                ids[(v * n + u) as usize] = id;
                edges.push((u, v));
                next = graph.neighbors_of(u).next_set_bit_after(v);
            }
        }

        Self {
            number_of_nodes: n,
            ids,
            edges,
        }
    }

    #[inline]
    pub fn edge_index(&self, u: Node, v: Node) -> NumEdges {
        let id = self.ids[(u * self.number_of_nodes + v) as usize];
        debug_assert_ne!(id, NO_EDGE, "({u}, {v}) is not an edge");
        id
    }

    #[inline]
    pub fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }

    /// Edges in canonical order; the slice index of a pair is its edge index.
    #[inline]
    pub fn edges(&self) -> &[(Node, Node)] {
        &self.edges
    }

    /// The full edge set `{0, …, m - 1}` as a bitset.
    #[inline]
    pub fn all_edges<W: BitWord>(&self) -> WordSet<W> {
        WordSet::new_all_set(self.number_of_edges())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;
    use itertools::Itertools;

    #[test]
    fn edge_numbering_is_canonical_and_symmetric() {
        let graph = petersen();
        let numbering = EdgeNumbering::new(&graph);

        assert_eq!(numbering.number_of_edges(), 15);

        // image is exactly 0..m, each index appearing once
        let ids = numbering
            .edges()
            .iter()
            .map(|&(u, v)| {
                assert_eq!(numbering.edge_index(u, v), numbering.edge_index(v, u));
                numbering.edge_index(u, v)
            })
            .sorted()
            .collect_vec();
        assert_eq!(ids, (0..15).collect_vec());

        // canonical order: edges sorted by (smaller endpoint, larger endpoint)
        assert_eq!(numbering.edges()[0].0, 0);
        assert!(numbering.edges().iter().tuple_windows().all(|(a, b)| a < b));
    }

    #[test]
    fn edge_numbering_on_random_cubic_graphs() {
        use rand::SeedableRng;
        let mut rng = rand_pcg::Pcg64::seed_from_u64(1234);
        for n in [4u32, 6, 8, 10, 12, 14] {
            let graph = random_cubic(&mut rng, n);
            assert!(graph.is_cubic());
            let numbering = EdgeNumbering::new(&graph);
            assert_eq!(numbering.number_of_edges(), 3 * n / 2);
            let distinct = numbering
                .edges()
                .iter()
                .map(|&(u, v)| numbering.edge_index(u, v))
                .unique()
                .count();
            assert_eq!(distinct, (3 * n / 2) as usize);
        }
    }

    #[test]
    fn adjacency_stays_symmetric_under_edits() {
        let mut graph = k4();
        graph.remove_edge(0, 2);
        assert!(!graph.has_edge(2, 0));
        graph.add_edge(0, 2);
        assert!(graph.has_edge(2, 0));
        assert!(graph.is_cubic());
        assert!(graph.is_connected());
    }
}
