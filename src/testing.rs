//! Small cubic graphs used across the test modules, plus a seeded random
//! cubic-graph generator based on the configuration model.

use rand::seq::SliceRandom;
use rand::Rng;
use word_bitset::prelude::*;

use crate::graph::{CubicGraph, Node, NumNodes};

/// The Petersen graph in graph6 (canonical labelling, see [`petersen`]).
pub const PETERSEN_G6: &str = "IsP@OkWHG";

/// The complete graph K4 in graph6.
pub const K4_G6: &str = "C~";

pub fn k4() -> CubicGraph<u64> {
    CubicGraph::from_edges(4, [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)])
}

/// The 3-prism (two triangles joined by a perfect matching). 3-edge-connected
/// but not cyclically 4-edge-connected: the three spokes separate the
/// triangles.
pub fn prism() -> CubicGraph<u64> {
    CubicGraph::from_edges(
        6,
        [
            (0, 1),
            (1, 2),
            (0, 2),
            (3, 4),
            (4, 5),
            (3, 5),
            (0, 3),
            (1, 4),
            (2, 5),
        ],
    )
}

pub fn k33() -> CubicGraph<u64> {
    CubicGraph::from_edges(
        6,
        [
            (0, 3),
            (0, 4),
            (0, 5),
            (1, 3),
            (1, 4),
            (1, 5),
            (2, 3),
            (2, 4),
            (2, 5),
        ],
    )
}

/// Adjacency matching the decoding of [`PETERSEN_G6`]: vertex-transitive,
/// girth five, cyclically 5-edge-connected.
pub fn petersen() -> CubicGraph<u64> {
    CubicGraph::from_edges(
        10,
        [
            (0, 1),
            (0, 2),
            (0, 3),
            (1, 4),
            (1, 5),
            (2, 6),
            (2, 9),
            (3, 7),
            (3, 8),
            (4, 6),
            (4, 8),
            (5, 7),
            (5, 9),
            (6, 7),
            (8, 9),
        ],
    )
}

/// The pentagonal prism: two pentagons `0..5` and `5..10` joined by the
/// spokes `i -- i+5`. Cyclically 4-edge-connected, and the spoke matching
/// leaves two odd pentagons, so the two-odd-cycles condition fires on it.
pub fn pentagonal_prism() -> CubicGraph<u64> {
    CubicGraph::from_edges(
        10,
        [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (0, 4),
            (5, 6),
            (6, 7),
            (7, 8),
            (8, 9),
            (5, 9),
            (0, 5),
            (1, 6),
            (2, 7),
            (3, 8),
            (4, 9),
        ],
    )
}

/// Two pentagons `0..5` and `5..10` whose vertices are all matched into a
/// ten-cycle `10..20`. No matching edge joins the pentagons directly, so the
/// two-odd-cycles condition can only fire through a bridge path across the
/// ring. 3-edge-connected.
pub fn ring_linked_pentagons() -> CubicGraph<u64> {
    let ring_attachment = [5, 1, 7, 9, 0, 2, 4, 6, 8, 3];
    let mut edges = vec![
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 4),
        (0, 4),
        (5, 6),
        (6, 7),
        (7, 8),
        (8, 9),
        (5, 9),
    ];
    edges.extend((0..10).map(|i| (10 + i, 10 + (i + 1) % 10)));
    edges.extend((0..10).map(|i| (ring_attachment[i as usize], 10 + i)));
    CubicGraph::from_edges(20, edges)
}

/// Random connected cubic graph via the configuration model: three stubs per
/// vertex are shuffled and paired until the pairing is simple and the graph
/// connected. Suitable for `n ≤ 40`-ish test sizes; not guaranteed to be
/// 3-edge-connected.
pub fn random_cubic<R: Rng>(rng: &mut R, number_of_nodes: NumNodes) -> CubicGraph<u64> {
    assert!(number_of_nodes >= 4 && number_of_nodes % 2 == 0);

    let mut stubs: Vec<Node> = (0..number_of_nodes).flat_map(|u| [u, u, u]).collect();
    loop {
        stubs.shuffle(rng);
        let mut adj = vec![WordSet::<u64>::new(); number_of_nodes as usize];
        let simple = stubs.chunks_exact(2).all(|pair| {
            let (u, v) = (pair[0], pair[1]);
            if u == v || adj[u as usize].get_bit(v) {
                return false;
            }
            adj[u as usize].set_bit(v);
            adj[v as usize].set_bit(u);
            true
        });
        if !simple {
            continue;
        }
        let graph = CubicGraph::from_adjacency(adj);
        if graph.is_connected() {
            return graph;
        }
    }
}

/// Brute-force 3-edge-connectivity test: no single edge or edge pair may
/// disconnect the graph. Quadratic in the edge count, fine for test sizes.
pub fn is_three_edge_connected<W: BitWord>(graph: &CubicGraph<W>) -> bool {
    if !graph.is_connected() {
        return false;
    }
    let edges: Vec<(Node, Node)> = graph
        .vertices()
        .flat_map(|u| {
            graph
                .neighbors_of(u)
                .iter_set_bits()
                .filter(move |&v| v > u)
                .map(move |v| (u, v))
                .collect::<Vec<_>>()
        })
        .collect();

    let mut scratch = graph.clone();
    for i in 0..edges.len() {
        for j in i + 1..edges.len() {
            scratch.remove_edge(edges[i].0, edges[i].1);
            scratch.remove_edge(edges[j].0, edges[j].1);
            let connected = scratch.is_connected();
            scratch.add_edge(edges[i].0, edges[i].1);
            scratch.add_edge(edges[j].0, edges[j].1);
            if !connected {
                return false;
            }
        }
    }
    true
}
