use log::debug;
use word_bitset::prelude::*;

use super::two_factor::{orientation_is_consistent, rematch, TwoFactor};
use super::{witness, HeuristicOptions};
use crate::filter::Counters;
use crate::graph::{is_cyclically_connected, CubicGraph, Node, NO_NODE};

/// Examines the 2-factor left by the perfect matching `f` for one of the
/// two bridge configurations between two odd cycles.
///
/// `graph` is mutated by the cut probes but always restored before
/// returning.
pub(super) fn check_two_factor<W: BitWord>(
    graph: &mut CubicGraph<W>,
    f: &[Node],
    options: &HeuristicOptions,
    counters: &mut Counters,
) -> bool {
    let n = graph.number_of_nodes() as usize;
    let mut m = vec![NO_NODE; n];
    let Some(two_factor) = TwoFactor::collect(graph, f, &mut m) else {
        return false;
    };
    let mut circuit = vec![NO_NODE; n];

    for u in two_factor.odd[0].elements.iter_set_bits() {
        let v = f[u as usize];

        if two_factor.odd[1].elements.get_bit(v) {
            // configuration 1: the matching edge uv bridges the odd cycles
            let skip1 = two_factor.odd[0].position_of(u);
            let skip2 = two_factor.odd[1].position_of(v);
            two_factor.overlay_odd_cycle_matchings(&mut m, skip1, skip2);
            let (u1, v1) = two_factor.odd[0].cycle_neighbors(skip1);
            let (u2, v2) = two_factor.odd[1].cycle_neighbors(skip2);

            circuit.fill(NO_NODE);
            if orientation_is_consistent(f, &m, &mut circuit, u1, v1)
                && orientation_is_consistent(f, &m, &mut circuit, u2, v2)
            {
                let bridges = [(u, v)];
                if suppressed_edges_are_deletable(graph, &circuit, &bridges) {
                    counters.direct_bridge_hits += 1;
                    if options.double_check || options.print_orientations {
                        witness::verify_complementary_orientations(
                            graph,
                            f,
                            &m,
                            &mut circuit,
                            &bridges,
                            options.print_orientations,
                        );
                    }
                    return true;
                }
                debug!("direct bridge found but its edge is not a strong 2-edge");
            }
            continue;
        }

        if !two_factor.odd[0].elements.get_bit(v) {
            // configuration 2: a path u - y1 - y2 - x2 through an even
            // cycle, entering the second odd cycle at x2
            let y1 = v;
            for y2 in graph.neighbors_of(y1).iter_set_bits() {
                if y2 == u {
                    continue;
                }
                let Some(x2) =
                    (graph.neighbors_of(y2) & two_factor.odd[1].elements).lowest_set_bit()
                else {
                    continue;
                };

                let skip1 = two_factor.odd[0].position_of(u);
                let skip2 = two_factor.odd[1].position_of(x2);
                two_factor.overlay_odd_cycle_matchings(&mut m, skip1, skip2);
                let (u1, v1) = two_factor.odd[0].cycle_neighbors(skip1);
                let (u2, v2) = two_factor.odd[1].cycle_neighbors(skip2);
                let w1 = (graph.neighbors_of(y1)
                    - WordSet::singleton(y2)
                    - WordSet::singleton(f[y1 as usize]))
                .lowest_set_bit()
                .unwrap();
                let w2 = (graph.neighbors_of(y2)
                    - WordSet::singleton(y1)
                    - WordSet::singleton(f[y2 as usize]))
                .lowest_set_bit()
                .unwrap();

                circuit.fill(NO_NODE);
                // the even cycle's matching must pair y1 with y2 so that
                // both stay covered once the path edges are suppressed
                if m[y1 as usize] != y2 {
                    rematch(graph, f, &mut m, y1, y2);
                }

                if orientation_is_consistent(f, &m, &mut circuit, u1, v1)
                    && orientation_is_consistent(f, &m, &mut circuit, u2, v2)
                    && orientation_is_consistent(f, &m, &mut circuit, w1, w2)
                {
                    let bridges = [(u, y1), (y2, x2)];
                    if suppressed_edges_are_deletable(graph, &circuit, &bridges) {
                        counters.bridge_path_hits += 1;
                        if options.double_check || options.print_orientations {
                            witness::verify_complementary_orientations(
                                graph,
                                f,
                                &m,
                                &mut circuit,
                                &bridges,
                                options.print_orientations,
                            );
                        }
                        return true;
                    }
                    debug!("bridge path found but a suppressed edge is not a strong 2-edge");
                }
            }
        }
    }

    false
}

/// With the bridge edges taken out, every suppressed edge has to be a strong
/// 2-edge of the flow assignment for the construction to go through.
fn suppressed_edges_are_deletable<W: BitWord>(
    graph: &mut CubicGraph<W>,
    circuit: &[Node],
    bridges: &[(Node, Node)],
) -> bool {
    for &(a, b) in bridges {
        graph.remove_edge(a, b);
    }

    let mut deletable = true;
    'bridges: for &(a, b) in bridges {
        for endpoint in [a, b] {
            let probe = graph.neighbors_of(endpoint).lowest_set_bit().unwrap();
            if !edge_is_strong_2_edge(graph, circuit, endpoint, probe) {
                deletable = false;
                break 'bridges;
            }
        }
    }

    for &(a, b) in bridges {
        graph.add_edge(a, b);
    }
    deletable
}

/// A strong 2-edge must not lie in a cycle-separating 3-cut together with
/// two of the circuit-oriented edges. Probing all pairs is a sufficient
/// approximation of the flow-theoretic condition.
fn edge_is_strong_2_edge<W: BitWord>(
    graph: &mut CubicGraph<W>,
    circuit: &[Node],
    p: Node,
    q: Node,
) -> bool {
    graph.remove_edge(p, q);
    let mut separating_cut = false;

    'pairs: for i in 0..graph.number_of_nodes() {
        let ci = circuit[i as usize];
        if ci == NO_NODE {
            continue;
        }
        graph.remove_edge(i, ci);
        for j in i + 1..graph.number_of_nodes() {
            let cj = circuit[j as usize];
            if cj == NO_NODE {
                continue;
            }
            graph.remove_edge(j, cj);
            let separated = !is_cyclically_connected(graph);
            graph.add_edge(j, cj);
            if separated {
                separating_cut = true;
                graph.add_edge(i, ci);
                break 'pairs;
            }
        }
        graph.add_edge(i, ci);
    }

    graph.add_edge(p, q);
    !separating_cut
}
