use std::collections::VecDeque;

use crate::util::PackedBitSet;

/// Colour index of every node of a conflict graph.
///
/// Colours are numbered from zero in the order they were first handed out,
/// with no gaps.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Colouring {
    colours: Vec<u32>,
    count: usize,
}

impl Colouring {
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Number of distinct colours used.
    pub fn colour_count(&self) -> usize {
        self.count
    }

    pub fn get(&self, node: u32) -> Option<u32> {
        self.colours.get(node as usize).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u32> {
        self.colours.iter()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.colours
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.colours
    }
}

impl std::ops::Index<u32> for Colouring {
    type Output = u32;

    #[inline]
    fn index(&self, node: u32) -> &u32 {
        &self.colours[node as usize]
    }
}

/// Greedy first-fit colouring.
///
/// Seeds are picked by highest degree among unvisited nodes (lowest id on
/// ties). From each seed the graph is walked breadth first, and every node
/// joins the oldest colour class none of its neighbours belong to, or opens
/// a new class.
pub(super) fn colour(edges: &[PackedBitSet]) -> Colouring {
    let n = edges.len();
    tracing::debug!(nodes = n, "colouring conflict graph");

    let mut seeds = seed_order(edges).into_iter();
    let mut visited = PackedBitSet::empty(n);
    let mut classes = Vec::<PackedBitSet>::new();
    let mut queue = VecDeque::new();

    loop {
        let Some(seed) = seeds.find(|&node| !visited.contains(node)) else {
            break;
        };
        tracing::trace!(seed, "new traversal");

        queue.push_back(seed);
        while let Some(node) = queue.pop_front() {
            // Nodes with several visited neighbours are queued more than once
            if visited.contains(node) {
                continue;
            }
            visited.insert(node);

            let neighbours = &edges[node];
            match classes.iter_mut().find(|class| class.is_disjoint(neighbours)) {
                Some(class) => class.insert(node),
                None => {
                    let mut class = PackedBitSet::empty(n);
                    class.insert(node);
                    classes.push(class);
                }
            }

            queue.extend(neighbours.difference(&visited));
        }
    }

    let mut colours = vec![0; n];
    for (colour, class) in classes.iter().enumerate() {
        for node in class {
            colours[node] = colour as u32;
        }
    }

    tracing::debug!(nodes = n, colours = classes.len(), "conflict graph coloured");
    Colouring {
        colours,
        count: classes.len(),
    }
}

/// All nodes by descending degree, lowest id first among equal degrees.
///
/// Degrees do not change while colouring, so the first unvisited node of
/// this order is always the highest-degree unvisited node.
fn seed_order(edges: &[PackedBitSet]) -> Vec<usize> {
    let degrees = edges.iter().map(PackedBitSet::count).collect::<Vec<_>>();
    let mut order = (0..edges.len()).collect::<Vec<_>>();
    // Stable sort keeps ascending ids within a degree
    order.sort_by_key(|&node| std::cmp::Reverse(degrees[node]));
    order
}
