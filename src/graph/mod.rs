pub use self::colouring::Colouring;
pub use self::route::{Element, RouteCode, RouteConflictGraph};

use crate::config::Limits;
use crate::error::GraphError;
use crate::util::PackedBitSet;

mod colouring;
mod route;

/// Undirected graph of "must not share a colour" constraints between nodes
/// `0..n`.
///
/// Each node keeps its neighbours in a [`PackedBitSet`], so the colouring
/// loop can test a node against a whole colour class one word at a time.
#[derive(Debug, Clone)]
pub struct ConflictGraph {
    edges: Vec<PackedBitSet>,
}

impl ConflictGraph {
    pub fn new(nodes: u32) -> Result<Self, GraphError> {
        Self::with_limits(nodes, &Limits::default())
    }

    pub fn with_limits(nodes: u32, limits: &Limits) -> Result<Self, GraphError> {
        limits.check(nodes)?;
        let n = nodes as usize;
        Ok(Self {
            edges: vec![PackedBitSet::empty(n); n],
        })
    }

    pub fn node_count(&self) -> u32 {
        self.edges.len() as u32
    }

    /// Records that `a` and `b` must receive different colours.
    ///
    /// Self-constraints and out-of-range nodes are silently ignored.
    pub fn add_constraint(&mut self, a: u32, b: u32) {
        let (a, b) = (a as usize, b as usize);
        let n = self.edges.len();
        if a < n && b < n && a != b {
            self.edges[a].insert(b);
            self.edges[b].insert(a);
        }
    }

    /// Returns `false` for out-of-range nodes.
    pub fn contains_constraint(&self, a: u32, b: u32) -> bool {
        match self.edges.get(a as usize) {
            Some(edges) => (b as usize) < edges.capacity() && edges.contains(b as usize),
            None => false,
        }
    }

    pub fn neighbours(&self, node: u32) -> Option<&PackedBitSet> {
        self.edges.get(node as usize)
    }

    pub fn degree(&self, node: u32) -> usize {
        self.neighbours(node).map_or(0, PackedBitSet::count)
    }

    /// Assigns a colour to every node such that no two constrained nodes
    /// share one. The graph itself is left untouched.
    pub fn colour(&self) -> Colouring {
        colouring::colour(&self.edges)
    }

    /// Writes the colour of node `i` into `out[i]`.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than the node count.
    pub fn colour_into(&self, out: &mut [u32]) {
        let n = self.edges.len();
        assert!(
            out.len() >= n,
            "colouring buffer holds {} entries but the graph has {n} nodes",
            out.len()
        );
        let colouring = self.colour();
        out[..n].copy_from_slice(colouring.as_slice());
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn graph_from(nodes: u32, constraints: &[(u32, u32)]) -> ConflictGraph {
        let mut graph = ConflictGraph::new(nodes).unwrap();
        for &(a, b) in constraints {
            graph.add_constraint(a, b);
        }
        graph
    }

    fn assert_valid(graph: &ConflictGraph, colouring: &Colouring) {
        for a in 0..graph.node_count() {
            for b in graph.neighbours(a).unwrap() {
                assert_ne!(
                    colouring[a], colouring[b as u32],
                    "nodes {a} and {b} share a colour"
                );
            }
        }
    }

    #[test]
    fn add_constraint() {
        let edges = [(0, 1), (1, 3)];
        let not_edges = [(0, 2), (0, 3), (1, 2), (2, 3)];

        let graph = graph_from(4, &edges);
        for (a, b) in edges {
            assert!(graph.contains_constraint(a, b));
            assert!(graph.contains_constraint(b, a));
        }
        for (a, b) in not_edges {
            assert!(!graph.contains_constraint(a, b));
            assert!(!graph.contains_constraint(b, a));
        }

        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 2);
        assert_eq!(graph.degree(2), 0);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut graph = ConflictGraph::new(4).unwrap();
        for i in 0..4 {
            for j in i + 1..4 {
                graph.add_constraint(i, j);
            }
        }
        assert!(graph.contains_constraint(0, 1));

        assert!(!graph.contains_constraint(0, 4));
        assert!(!graph.contains_constraint(4, 0));
        assert!(!graph.contains_constraint(u32::MAX, u32::MAX));

        graph.add_constraint(0, 4);
        graph.add_constraint(7, 1);
        assert_eq!(graph.degree(0), 3);
        assert_eq!(graph.degree(1), 3);
        assert_eq!(graph.degree(4), 0);
    }

    #[test]
    fn out_of_range_inside_last_word() {
        // 10 nodes fit in one word, index 12 is still rejected
        let mut graph = ConflictGraph::new(10).unwrap();
        graph.add_constraint(2, 12);
        assert!(!graph.contains_constraint(2, 12));
        assert_eq!(graph.degree(2), 0);
    }

    #[test]
    fn self_constraint_is_ignored() {
        let mut graph = ConflictGraph::new(3).unwrap();
        graph.add_constraint(1, 1);
        assert!(!graph.contains_constraint(1, 1));
        assert_eq!(graph.degree(1), 0);
    }

    #[test]
    fn too_many_nodes() {
        let limits = Limits { max_nodes: 16 };
        assert!(ConflictGraph::with_limits(16, &limits).is_ok());
        assert_eq!(
            ConflictGraph::with_limits(17, &limits).unwrap_err(),
            GraphError::TooManyNodes { nodes: 17, max: 16 }
        );
    }

    #[test]
    fn colour_simple_graph() {
        //   (4)        (2)
        //    |         / \
        //   (0) --- (1)---(3)
        //    \      /
        //      (5)
        let constraints = [
            (0, 1),
            (0, 1),
            (0, 4),
            (0, 5),
            (1, 2),
            (1, 3),
            (1, 5),
            (2, 3),
        ];
        let graph = graph_from(6, &constraints);
        let colouring = graph.colour();
        println!("{colouring:?}");

        assert_valid(&graph, &colouring);
        for (a, b) in constraints {
            assert_ne!(colouring[a], colouring[b]);
        }
        assert_eq!(colouring.colour_count(), 3);
    }

    #[test]
    fn colour_graph_with_cliques() {
        //   (4)        (2)
        //    |         / \
        //   (0) --- (1)---(3)    (8)
        //    \      /            /
        //      (5)     (6)---(7)
        let constraints = [
            (0, 1),
            (0, 4),
            (0, 5),
            (1, 2),
            (1, 3),
            (1, 5),
            (2, 3),
            (6, 7),
            (7, 8),
        ];
        let graph = graph_from(9, &constraints);
        let colouring = graph.colour();
        assert_valid(&graph, &colouring);
        for (a, b) in constraints {
            assert_ne!(colouring[a], colouring[b]);
        }
    }

    #[test]
    fn colour_into_buffer() {
        let graph = graph_from(3, &[(0, 1), (1, 2)]);
        let mut out = [u32::MAX; 5];
        graph.colour_into(&mut out);
        assert_eq!(&out[..3], graph.colour().as_slice());
        assert_eq!(&out[3..], [u32::MAX, u32::MAX]);
    }

    #[test]
    #[should_panic(expected = "colouring buffer")]
    fn colour_into_short_buffer() {
        let graph = graph_from(3, &[(0, 1)]);
        let mut out = [0; 2];
        graph.colour_into(&mut out);
    }

    fn arb_graph() -> impl Strategy<Value = (u32, Vec<(u32, u32)>)> {
        (1u32..96).prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec((0..n + 4, 0..n + 4), 0..(n as usize * 4)),
            )
        })
    }

    proptest! {
        #[test]
        fn constraints_are_symmetric((n, constraints) in arb_graph()) {
            let graph = graph_from(n, &constraints);
            for a in 0..n {
                prop_assert!(!graph.contains_constraint(a, a));
                for b in 0..n {
                    prop_assert_eq!(
                        graph.contains_constraint(a, b),
                        graph.contains_constraint(b, a)
                    );
                }
            }
            for (a, b) in constraints {
                if a != b && a < n && b < n {
                    prop_assert!(graph.contains_constraint(a, b));
                }
            }
        }

        #[test]
        fn colouring_is_valid((n, constraints) in arb_graph()) {
            let graph = graph_from(n, &constraints);
            let colouring = graph.colour();
            prop_assert_eq!(colouring.len(), n as usize);
            for (a, b) in constraints {
                if a != b && a < n && b < n {
                    prop_assert_ne!(colouring[a], colouring[b]);
                }
            }

            // Colours are contiguous from zero
            let max = colouring.iter().copied().max().unwrap_or(0);
            prop_assert_eq!(colouring.colour_count(), max as usize + 1);
            for colour in 0..=max {
                prop_assert!(colouring.iter().any(|&c| c == colour));
            }
        }

        #[test]
        fn colouring_is_deterministic((n, constraints) in arb_graph()) {
            let graph = graph_from(n, &constraints);
            prop_assert_eq!(graph.colour(), graph.colour());
        }
    }
}
