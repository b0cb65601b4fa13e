use word_bitset::prelude::*;

use crate::graph::{CubicGraph, Node, NO_NODE};

/// One odd cycle of the 2-factor `G - F`, as a membership set plus the
/// traversal order of its vertices.
pub(super) struct OddCycle<W: BitWord> {
    pub elements: WordSet<W>,
    pub order: Vec<Node>,
}

impl<W: BitWord> OddCycle<W> {
    fn new() -> Self {
        Self {
            elements: WordSet::new(),
            order: Vec::new(),
        }
    }

    pub fn position_of(&self, u: Node) -> usize {
        self.order.iter().position(|&v| v == u).unwrap()
    }

    /// Successor and predecessor of the vertex at `index` along the cycle.
    pub fn cycle_neighbors(&self, index: usize) -> (Node, Node) {
        let len = self.order.len();
        (
            self.order[(index + 1) % len],
            self.order[(index + len - 1) % len],
        )
    }

    /// Pairs the cycle vertices along consecutive edges, skipping the vertex
    /// at `skip`: a maximum matching of the cycle minus that vertex.
    fn overlay_matching(&self, m: &mut [Node], skip: usize) {
        let len = self.order.len();
        let mut index = skip;
        let mut pair_up = false;
        loop {
            let next = (index + 1) % len;
            if pair_up {
                m[self.order[next] as usize] = self.order[index];
                m[self.order[index] as usize] = self.order[next];
            }
            pair_up = !pair_up;
            index = next;
            if index == skip {
                break;
            }
        }
    }
}

/// The cycles of `G - F` with their parities. The configuration test only
/// proceeds when exactly two of them are odd.
pub(super) struct TwoFactor<W: BitWord> {
    pub odd: [OddCycle<W>; 2],
}

impl<W: BitWord> TwoFactor<W> {
    /// Walks every cycle of `G - F`. Along the way `m` picks up a matching
    /// of the 2-factor that is perfect on the even cycles; odd-cycle entries
    /// are provisional until [`TwoFactor::overlay_odd_cycle_matchings`].
    pub fn collect(graph: &CubicGraph<W>, f: &[Node], m: &mut [Node]) -> Option<Self> {
        m.fill(NO_NODE);
        let mut unchecked = WordSet::<W>::new_all_set(graph.number_of_nodes());
        let mut odd = [OddCycle::new(), OddCycle::new()];
        let mut odd_count = 0;

        while let Some(start) = unchecked.lowest_set_bit() {
            let mut prev = NO_NODE;
            let mut cur = start;
            let mut elements = WordSet::new();
            let mut order = Vec::new();
            let mut is_odd = false;
            loop {
                unchecked.clear_bit(cur);
                elements.set_bit(cur);
                if odd_count < 2 {
                    order.push(cur);
                }
                // the unique neighbor continuing the cycle: neither the
                // vertex we came from nor the matched partner
                let next = graph
                    .neighbors_of(cur)
                    .iter_set_bits()
                    .find(|&w| w != prev && w != f[cur as usize])
                    .unwrap();
                if m[cur as usize] == NO_NODE {
                    m[cur as usize] = next;
                    m[next as usize] = cur;
                }
                prev = cur;
                cur = next;
                is_odd = !is_odd;
                if cur == start {
                    break;
                }
            }
            if is_odd {
                if odd_count < 2 {
                    odd[odd_count] = OddCycle { elements, order };
                }
                odd_count += 1;
                if odd_count > 2 {
                    return None;
                }
            }
        }

        (odd_count == 2).then_some(Self { odd })
    }

    /// Completes `m` to a maximum matching of `G - F - {x1, x2}` by pairing
    /// both odd cycles around their excluded vertices.
    pub fn overlay_odd_cycle_matchings(&self, m: &mut [Node], skip1: usize, skip2: usize) {
        self.odd[0].overlay_matching(m, skip1);
        self.odd[1].overlay_matching(m, skip2);
    }
}

/// Tests whether the cycles of `F ∪ M` through `u` and through `v` can be
/// oriented so that the suppressed configuration edges receive consistent
/// flow directions, orienting them on the fly. `circuit` stores the chosen
/// successor of every vertex on an oriented cycle, `NO_NODE` elsewhere.
pub(super) fn orientation_is_consistent(
    f: &[Node],
    m: &[Node],
    circuit: &mut [Node],
    u: Node,
    v: Node,
) -> bool {
    if circuit[u as usize] == NO_NODE {
        let start_with_matching = circuit[v as usize] == f[v as usize];
        orient_circuit_through(f, m, circuit, u, start_with_matching);
    }
    if circuit[v as usize] == NO_NODE {
        let start_with_matching = circuit[u as usize] == f[u as usize];
        orient_circuit_through(f, m, circuit, v, start_with_matching);
    }
    (circuit[u as usize] == f[u as usize]) == (circuit[v as usize] == m[v as usize])
}

/// Walks the alternating `M`/`F` cycle through `start` and records the walk
/// direction in `circuit`.
pub(super) fn orient_circuit_through(
    f: &[Node],
    m: &[Node],
    circuit: &mut [Node],
    start: Node,
    start_with_matching: bool,
) {
    let mut take_matching = start_with_matching;
    let mut cur = start;
    loop {
        let next = if take_matching {
            m[cur as usize]
        } else {
            f[cur as usize]
        };
        circuit[cur as usize] = next;
        cur = next;
        take_matching = !take_matching;
        if cur == start {
            break;
        }
    }
}

/// Re-pairs the even cycle through `y1` and `y2` so that `m` matches them
/// with each other and stays maximal on the rest of the cycle.
pub(super) fn rematch<W: BitWord>(
    graph: &CubicGraph<W>,
    f: &[Node],
    m: &mut [Node],
    y1: Node,
    y2: Node,
) {
    let mut prev = y2;
    let mut cur = y1;
    let mut pair_up = false;
    loop {
        let next = (graph.neighbors_of(cur)
            - WordSet::singleton(f[cur as usize])
            - WordSet::singleton(prev))
        .lowest_set_bit()
        .unwrap();
        if pair_up {
            m[cur as usize] = next;
            m[next as usize] = cur;
        }
        prev = cur;
        cur = next;
        pair_up = !pair_up;
        if cur == y2 {
            break;
        }
    }
    m[y1 as usize] = y2;
    m[y2 as usize] = y1;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::*;

    /// Spoke matching of the pentagonal prism.
    fn spokes_f() -> Vec<Node> {
        vec![5, 6, 7, 8, 9, 0, 1, 2, 3, 4]
    }

    #[test]
    fn spoke_matching_leaves_two_odd_pentagons() {
        let graph = pentagonal_prism();
        let f = spokes_f();
        let mut m = vec![NO_NODE; 10];
        let two_factor = TwoFactor::collect(&graph, &f, &mut m).unwrap();

        assert_eq!(two_factor.odd[0].order, vec![0, 1, 2, 3, 4]);
        assert_eq!(two_factor.odd[1].order, vec![5, 6, 7, 8, 9]);
        assert_eq!(two_factor.odd[0].elements.cardinality(), 5);
    }

    #[test]
    fn even_two_factor_is_rejected() {
        // matching the K4 pair (0,1), (2,3) leaves the 4-cycle 0-2-1-3
        let graph = k4();
        let f = vec![1, 0, 3, 2];
        let mut m = vec![NO_NODE; 4];
        assert!(TwoFactor::collect(&graph, &f, &mut m).is_none());
        // the even cycle got a perfect matching
        assert!(m.iter().all(|&v| v != NO_NODE));
    }

    #[test]
    fn odd_cycle_matching_skips_the_excluded_vertex() {
        let graph = pentagonal_prism();
        let f = spokes_f();
        let mut m = vec![NO_NODE; 10];
        let two_factor = TwoFactor::collect(&graph, &f, &mut m).unwrap();
        two_factor.overlay_odd_cycle_matchings(&mut m, 0, 0);

        // pairs (1,2), (3,4) and (6,7), (8,9); vertices 0 and 5 unmatched
        assert_eq!(m[1], 2);
        assert_eq!(m[2], 1);
        assert_eq!(m[3], 4);
        assert_eq!(m[6], 7);
        assert_eq!(m[8], 9);
    }

    #[test]
    fn consistent_orientation_on_the_pentagonal_prism() {
        let graph = pentagonal_prism();
        let f = spokes_f();
        let mut m = vec![NO_NODE; 10];
        let two_factor = TwoFactor::collect(&graph, &f, &mut m).unwrap();
        two_factor.overlay_odd_cycle_matchings(&mut m, 0, 0);

        let mut circuit = vec![NO_NODE; 10];
        assert!(orientation_is_consistent(&f, &m, &mut circuit, 1, 4));
        assert!(orientation_is_consistent(&f, &m, &mut circuit, 6, 9));
        // the first walk fixed the cycle 1 -> 6 -> 7 -> 2 -> 1
        assert_eq!(circuit[1], 6);
        assert_eq!(circuit[6], 7);
        assert_eq!(circuit[7], 2);
        assert_eq!(circuit[2], 1);
    }
}
