use crate::graph::RouteCode;

/// Outgoing direction of a router: one of its six links or a local core.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Route {
    East,
    NorthEast,
    North,
    West,
    SouthWest,
    South,
    /// Core `0..=17`, where core 0 is the monitor.
    Core(u8),
}

impl Route {
    pub const MAX_CORE: u8 = 17;

    /// Bit position of the route in a [`RouteCode`], `None` for cores past
    /// [`Route::MAX_CORE`].
    pub const fn index(self) -> Option<u32> {
        match self {
            Self::East => Some(0),
            Self::NorthEast => Some(1),
            Self::North => Some(2),
            Self::West => Some(3),
            Self::SouthWest => Some(4),
            Self::South => Some(5),
            Self::Core(core) if core <= Self::MAX_CORE => Some(6 + core as u32),
            Self::Core(_) => None,
        }
    }

    /// Cores past [`Route::MAX_CORE`] have no bit and yield an empty code.
    pub const fn bit(self) -> RouteCode {
        match self.index() {
            Some(index) => RouteCode::new(1 << index),
            None => RouteCode::new(0),
        }
    }
}

impl FromIterator<Route> for RouteCode {
    fn from_iter<T: IntoIterator<Item = Route>>(iter: T) -> Self {
        iter.into_iter()
            .fold(RouteCode::default(), |code, route| code | route.bit())
    }
}

/// Multicast routing tree rooted at one router.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RoutingTree {
    pub chip: (u32, u32),
    pub children: Vec<(Route, RoutingTreeChild)>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RoutingTreeChild {
    /// Next router along the route.
    Tree(RoutingTree),
    /// Final destination, such as a core.
    Sink,
}

impl RoutingTree {
    pub fn new(chip: (u32, u32), children: Vec<(Route, RoutingTreeChild)>) -> Self {
        Self { chip, children }
    }

    /// Routes leaving this router.
    pub fn route_code(&self) -> RouteCode {
        self.children.iter().map(|(route, _)| *route).collect()
    }

    /// First route in the tree, in walk order, that has no bit in a
    /// [`RouteCode`].
    pub fn invalid_route(&self) -> Option<Route> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            for (route, child) in &node.children {
                if route.index().is_none() {
                    return Some(*route);
                }
                if let RoutingTreeChild::Tree(tree) = child {
                    stack.push(tree);
                }
            }
        }
        None
    }

    /// Depth-first walk over every router of the tree, yielding its
    /// coordinate and the routes leaving it.
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse { stack: vec![self] }
    }
}

pub struct Traverse<'a> {
    stack: Vec<&'a RoutingTree>,
}

impl Iterator for Traverse<'_> {
    type Item = ((u32, u32), RouteCode);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;

        // Reversed so that the first child is visited first
        for (_, child) in node.children.iter().rev() {
            if let RoutingTreeChild::Tree(tree) = child {
                self.stack.push(tree);
            }
        }

        Some((node.chip, node.route_code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_bits() {
        assert_eq!(Route::East.bit(), RouteCode::new(1 << 0));
        assert_eq!(Route::South.bit(), RouteCode::new(1 << 5));
        assert_eq!(Route::Core(0).bit(), RouteCode::new(1 << 6));
        assert_eq!(Route::Core(17).bit(), RouteCode::new(1 << 23));
        assert_eq!(Route::Core(18).index(), None);
        assert!(Route::Core(200).bit().is_empty());

        let code = [Route::North, Route::Core(1), Route::North]
            .into_iter()
            .collect::<RouteCode>();
        assert_eq!(code, RouteCode::new((1 << 2) | (1 << 7)));
    }

    #[test]
    fn invalid_route() {
        let valid = RoutingTree::new(
            (0, 0),
            vec![(Route::Core(Route::MAX_CORE), RoutingTreeChild::Sink)],
        );
        assert_eq!(valid.invalid_route(), None);

        // Buried two routers deep
        let tree = RoutingTree::new(
            (0, 0),
            vec![
                (Route::Core(1), RoutingTreeChild::Sink),
                (
                    Route::East,
                    RoutingTreeChild::Tree(RoutingTree::new(
                        (1, 0),
                        vec![(
                            Route::North,
                            RoutingTreeChild::Tree(RoutingTree::new(
                                (1, 1),
                                vec![(Route::Core(18), RoutingTreeChild::Sink)],
                            )),
                        )],
                    )),
                ),
            ],
        );
        assert_eq!(tree.invalid_route(), Some(Route::Core(18)));
    }

    #[test]
    fn traverse() {
        let tree = RoutingTree::new(
            (0, 0),
            vec![
                (
                    Route::East,
                    RoutingTreeChild::Tree(RoutingTree::new(
                        (1, 0),
                        vec![
                            (Route::Core(1), RoutingTreeChild::Sink),
                            (
                                Route::North,
                                RoutingTreeChild::Tree(RoutingTree::new(
                                    (1, 1),
                                    vec![(Route::Core(2), RoutingTreeChild::Sink)],
                                )),
                            ),
                        ],
                    )),
                ),
                (
                    Route::North,
                    RoutingTreeChild::Tree(RoutingTree::new((0, 1), Vec::new())),
                ),
            ],
        );

        let visited = tree.traverse().collect::<Vec<_>>();
        println!("{visited:#?}");
        assert_eq!(
            visited,
            [
                ((0, 0), Route::East.bit() | Route::North.bit()),
                ((1, 0), Route::Core(1).bit() | Route::North.bit()),
                ((1, 1), Route::Core(2).bit()),
                ((0, 1), RouteCode::default()),
            ]
        );
    }
}
