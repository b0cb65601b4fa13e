use log::info;
use word_bitset::prelude::*;

use super::two_factor::orient_circuit_through;
use crate::graph::{
    format_deletable_edges, CubicGraph, DiGraph, EdgeNumbering, Node, NO_NODE,
};

/// Materializes the two complementary orientations promised by a successful
/// configuration test and validates them.
///
/// Both failure modes are proof-side bugs rather than input problems, so
/// they abort: the orientations must be strongly connected and their
/// deletable sets must cover every edge.
pub(super) fn verify_complementary_orientations<W: BitWord>(
    graph: &CubicGraph<W>,
    f: &[Node],
    m: &[Node],
    circuit: &mut [Node],
    bridges: &[(Node, Node)],
    print_orientations: bool,
) {
    let n = graph.number_of_nodes();
    let mut first = DiGraph::new(n);
    let mut second = DiGraph::new(n);

    // the suppressed edges take opposite directions in the two orientations
    let mut endpoints = WordSet::<W>::new();
    for &(a, b) in bridges {
        first.add_arc(a, b);
        second.add_arc(b, a);
        endpoints.set_bit(a);
        endpoints.set_bit(b);
    }

    // matching edges follow the circuit orientation, reversed between the
    // two orientations; circuits not fixed by the consistency checks are
    // oriented now
    for i in 0..n {
        if endpoints.get_bit(i) {
            continue;
        }
        if circuit[i as usize] == NO_NODE {
            orient_circuit_through(f, m, circuit, i, true);
        }
        first.add_arc(circuit[i as usize], i);
        second.add_arc(i, circuit[i as usize]);
    }

    // orient every 2-factor cycle, starting at the bridge endpoints
    let mut unchecked = WordSet::<W>::new_all_set(n);
    for &(a, b) in bridges {
        for endpoint in [a, b] {
            if unchecked.get_bit(endpoint) {
                orient_cycle(graph, f, circuit, endpoint, &mut unchecked, &mut first, &mut second);
            }
        }
    }
    while let Some(start) = unchecked.lowest_set_bit() {
        orient_cycle(graph, f, circuit, start, &mut unchecked, &mut first, &mut second);
    }

    assert!(
        first.is_strongly_connected() && second.is_strongly_connected(),
        "orientations derived from the two-odd-cycles condition are not strongly connected"
    );

    let numbering = EdgeNumbering::new(graph);
    let first_deletable = first.deletable_edges(&numbering);
    let second_deletable = second.deletable_edges(&numbering);

    if print_orientations {
        info!(
            "{}",
            format_deletable_edges(&first, &numbering, first_deletable)
        );
        info!("First orientation:\n{first}");
        info!(
            "{}",
            format_deletable_edges(&second, &numbering, second_deletable)
        );
        info!("Second orientation:\n{second}");
    }

    assert!(
        (first_deletable | second_deletable) == numbering.all_edges(),
        "orientations derived from the two-odd-cycles condition are not complementary"
    );
}

/// Walks one cycle of the 2-factor and orients its edges: with the circuit
/// orientation where one is fixed (reversing it in the second orientation),
/// with the walk direction in both orientations otherwise.
fn orient_cycle<W: BitWord>(
    graph: &CubicGraph<W>,
    f: &[Node],
    circuit: &[Node],
    start: Node,
    unchecked: &mut WordSet<W>,
    first: &mut DiGraph<W>,
    second: &mut DiGraph<W>,
) {
    let mut cur = start;

    // walk towards the side whose predecessor's circuit pointer follows its
    // matching edge, so the cycle direction agrees with the fixed flow
    let cycle_neighbors = graph.neighbors_of(cur) - WordSet::singleton(f[cur as usize]);
    let mut prev = cycle_neighbors.lowest_set_bit().unwrap();
    if circuit[prev as usize] == NO_NODE || circuit[prev as usize] != f[prev as usize] {
        prev = cycle_neighbors.next_set_bit_after(prev).unwrap();
    }

    loop {
        unchecked.clear_bit(cur);
        let next = graph
            .neighbors_of(cur)
            .iter_set_bits()
            .find(|&w| w != prev && w != f[cur as usize])
            .unwrap();
        if circuit[next as usize] == cur {
            second.add_arc(cur, next);
            second.remove_arc(next, cur);
        } else if circuit[cur as usize] != next && circuit[next as usize] != cur {
            first.add_arc(cur, next);
            second.add_arc(cur, next);
        }
        prev = cur;
        cur = next;
        if cur == start {
            break;
        }
    }
}
