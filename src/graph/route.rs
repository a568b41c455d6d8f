use super::{Colouring, ConflictGraph};
use crate::config::Limits;
use crate::error::GraphError;
use crate::util::FastHashMap;

/// Conflict graph over multicast nets which derives constraints from the
/// routes each net takes.
///
/// Two nets leaving the same router in different directions cannot share
/// a routing key, so registering such a pair adds a constraint between
/// them. Registrations are never removed.
#[derive(Debug, Clone)]
pub struct RouteConflictGraph {
    graph: ConflictGraph,
    routes: FastHashMap<u64, FastHashMap<RouteCode, Vec<u32>>>,
}

impl RouteConflictGraph {
    pub fn new(nets: u32) -> Result<Self, GraphError> {
        Self::with_limits(nets, &Limits::default())
    }

    pub fn with_limits(nets: u32, limits: &Limits) -> Result<Self, GraphError> {
        Ok(Self {
            graph: ConflictGraph::with_limits(nets, limits)?,
            routes: FastHashMap::default(),
        })
    }

    pub fn graph(&self) -> &ConflictGraph {
        &self.graph
    }

    pub fn into_graph(self) -> ConflictGraph {
        self.graph
    }

    pub fn node_count(&self) -> u32 {
        self.graph.node_count()
    }

    pub fn add_constraint(&mut self, a: u32, b: u32) {
        self.graph.add_constraint(a, b);
    }

    pub fn contains_constraint(&self, a: u32, b: u32) -> bool {
        self.graph.contains_constraint(a, b)
    }

    /// Records that `net` leaves `element` through `route`, and constrains
    /// it against every net already seen leaving `element` another way.
    pub fn add_route(&mut self, net: u32, element: Element, route: RouteCode) {
        let routes = self.routes.entry(element.key()).or_default();
        routes.entry(route).or_default().push(net);

        for (&other_route, other_nets) in routes.iter() {
            if other_route == route {
                continue;
            }
            for &other_net in other_nets {
                self.graph.add_constraint(net, other_net);
            }
        }

        tracing::trace!(net, ?element, ?route, "route registered");
    }

    /// Nets registered at `element` under `route`, in registration order.
    pub fn nets_at(&self, element: Element, route: RouteCode) -> &[u32] {
        self.routes
            .get(&element.key())
            .and_then(|routes| routes.get(&route))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn colour(&self) -> Colouring {
        self.graph.colour()
    }

    pub fn colour_into(&self, out: &mut [u32]) {
        self.graph.colour_into(out);
    }
}

/// Router coordinate.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct Element {
    pub x: u32,
    pub y: u32,
}

impl Element {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Packs both coordinates into a single key without collisions.
    pub const fn key(self) -> u64 {
        ((self.x as u64) << 32) | self.y as u64
    }
}

impl From<(u32, u32)> for Element {
    #[inline]
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

/// Set of outgoing directions, one bit per link or core.
#[derive(Default, Clone, Copy, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct RouteCode(u32);

impl RouteCode {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn inner(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Debug for RouteCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:#026b}", self.0))
    }
}

impl From<u32> for RouteCode {
    #[inline]
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::ops::BitOr for RouteCode {
    type Output = Self;

    #[inline]
    fn bitor(mut self, rhs: Self) -> Self::Output {
        self |= rhs;
        self
    }
}

impl std::ops::BitOrAssign for RouteCode {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
