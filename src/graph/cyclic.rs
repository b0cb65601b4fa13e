use smallvec::SmallVec;
use word_bitset::prelude::*;

use super::{CubicGraph, Node, NO_NODE};

/// Does at most one connected component of `graph` contain a cycle?
///
/// Used to probe cycle-separating edge cuts: after removing a candidate cut
/// from a cubic graph, the cut was cycle-separating iff two components with
/// cycles remain.
pub fn is_cyclically_connected<W: BitWord>(graph: &CubicGraph<W>) -> bool {
    let n = graph.number_of_nodes();
    let mut unchecked = WordSet::<W>::new_all_set(n);
    let mut visited = WordSet::<W>::new();
    let mut components_with_cycle = 0;
    let mut stack: SmallVec<[(Node, Node); 128]> = SmallVec::new();

    while let Some(root) = unchecked.lowest_set_bit() {
        let mut cycle_found = false;
        stack.push((root, NO_NODE));
        while let Some((v, parent)) = stack.pop() {
            // meeting a visited vertex again means the walk closed a cycle
            if visited.get_bit(v) {
                cycle_found = true;
                continue;
            }
            visited.set_bit(v);
            unchecked.clear_bit(v);
            for w in graph.neighbors_of(v).iter_set_bits() {
                if w != parent {
                    stack.push((w, v));
                }
            }
        }
        if cycle_found {
            components_with_cycle += 1;
            if components_with_cycle >= 2 {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;

    #[test]
    fn intact_cubic_graph_has_one_cyclic_component() {
        assert!(is_cyclically_connected(&petersen()));
        assert!(is_cyclically_connected(&prism()));
    }

    #[test]
    fn cutting_the_prism_spokes_separates_two_triangles() {
        let mut graph = prism();
        graph.remove_edge(0, 3);
        graph.remove_edge(1, 4);
        assert!(is_cyclically_connected(&graph));
        graph.remove_edge(2, 5);
        assert!(!is_cyclically_connected(&graph));
    }

    #[test]
    fn tree_components_do_not_count() {
        // all three spokes plus one triangle edge: the top component becomes
        // a path, only the bottom triangle still carries a cycle
        let mut graph = prism();
        graph.remove_edge(0, 3);
        graph.remove_edge(1, 4);
        graph.remove_edge(2, 5);
        graph.remove_edge(0, 1);
        assert!(is_cyclically_connected(&graph));
    }
}
