use word_bitset::prelude::*;

use crate::graph::{CubicGraph, Node};

/// Recursively enumerates all perfect matchings of `graph`, always matching
/// the lowest unmatched vertex next. The callback decides per matching
/// whether to stop; the return value is `true` iff it ever did.
pub(super) fn for_each_perfect_matching<W: BitWord>(
    graph: &CubicGraph<W>,
    matching: &mut [Node],
    found: &mut impl FnMut(&[Node]) -> bool,
) -> bool {
    let remaining = WordSet::new_all_set(graph.number_of_nodes());
    extend(graph, remaining, matching, found)
}

fn extend<W: BitWord>(
    graph: &CubicGraph<W>,
    remaining: WordSet<W>,
    matching: &mut [Node],
    found: &mut impl FnMut(&[Node]) -> bool,
) -> bool {
    let Some(u) = remaining.lowest_set_bit() else {
        return found(matching);
    };
    for w in (graph.neighbors_of(u) & remaining).iter_set_bits() {
        matching[u as usize] = w;
        matching[w as usize] = u;
        let rest = remaining - WordSet::singleton(u) - WordSet::singleton(w);
        if extend(graph, rest, matching, found) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::NO_NODE;
    use crate::testing::*;

    fn count_matchings(graph: &CubicGraph<u64>) -> usize {
        let mut f = vec![NO_NODE; graph.number_of_nodes() as usize];
        let mut count = 0;
        for_each_perfect_matching(graph, &mut f, &mut |matching| {
            assert!(matching
                .iter()
                .enumerate()
                .all(|(u, &v)| matching[v as usize] == u as Node));
            count += 1;
            false
        });
        count
    }

    #[test]
    fn perfect_matching_counts() {
        assert_eq!(count_matchings(&k4()), 3);
        assert_eq!(count_matchings(&k33()), 6);
        assert_eq!(count_matchings(&petersen()), 6);
    }

    #[test]
    fn enumeration_stops_on_first_accept() {
        let graph = k4();
        let mut f = vec![NO_NODE; 4];
        let mut seen = 0;
        let stopped = for_each_perfect_matching(&graph, &mut f, &mut |_| {
            seen += 1;
            true
        });
        assert!(stopped);
        assert_eq!(seen, 1);
    }
}
