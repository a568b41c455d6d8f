use std::num::NonZeroU32;

use crate::config::Limits;
use crate::error::HandleError;
use crate::graph::{Element, RouteCode, RouteConflictGraph};
use crate::util::FastHashMap;

/// Copyable reference to a graph owned by a [`GraphArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct GraphHandle(NonZeroU32);

impl GraphHandle {
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Rebuilds a handle from its raw value, `None` for zero.
    pub const fn from_raw(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl std::fmt::Display for GraphHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns conflict graphs on behalf of callers which only hold integer
/// handles.
///
/// Every graph follows the same lifecycle: [`create`], any number of
/// [`add_constraint`] and [`add_route`] calls, [`colour`], and finally
/// [`destroy`]. Handles are never reused, so a stale handle is reported as
/// unknown instead of reaching another graph.
///
/// [`create`]: Self::create
/// [`add_constraint`]: Self::add_constraint
/// [`add_route`]: Self::add_route
/// [`colour`]: Self::colour
/// [`destroy`]: Self::destroy
#[derive(Debug, Default)]
pub struct GraphArena {
    graphs: FastHashMap<GraphHandle, RouteConflictGraph>,
    last_handle: u32,
    limits: Limits,
}

impl GraphArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            ..Default::default()
        }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    pub fn create(&mut self, nodes: u32) -> Result<GraphHandle, HandleError> {
        let graph = RouteConflictGraph::with_limits(nodes, &self.limits)?;

        let next = self
            .last_handle
            .checked_add(1)
            .ok_or(HandleError::Exhausted)?;
        let handle = GraphHandle::from_raw(next).ok_or(HandleError::Exhausted)?;
        self.last_handle = next;

        self.graphs.insert(handle, graph);
        tracing::debug!(%handle, nodes, "graph created");
        Ok(handle)
    }

    /// Releases the graph and hands it back to the caller.
    pub fn destroy(&mut self, handle: GraphHandle) -> Result<RouteConflictGraph, HandleError> {
        let graph = self
            .graphs
            .remove(&handle)
            .ok_or(HandleError::UnknownHandle(handle))?;
        tracing::debug!(%handle, "graph destroyed");
        Ok(graph)
    }

    pub fn get(&self, handle: GraphHandle) -> Result<&RouteConflictGraph, HandleError> {
        self.graphs
            .get(&handle)
            .ok_or(HandleError::UnknownHandle(handle))
    }

    pub fn add_constraint(
        &mut self,
        handle: GraphHandle,
        a: u32,
        b: u32,
    ) -> Result<(), HandleError> {
        self.get_mut(handle)?.add_constraint(a, b);
        Ok(())
    }

    pub fn add_route(
        &mut self,
        handle: GraphHandle,
        net: u32,
        x: u32,
        y: u32,
        route: u32,
    ) -> Result<(), HandleError> {
        let graph = self.get_mut(handle)?;
        graph.add_route(net, Element::new(x, y), RouteCode::new(route));
        Ok(())
    }

    /// Writes one colour per node into `colouring`.
    ///
    /// # Panics
    ///
    /// Panics if `colouring` is shorter than the node count of the graph.
    pub fn colour(&self, handle: GraphHandle, colouring: &mut [u32]) -> Result<(), HandleError> {
        self.get(handle)?.colour_into(colouring);
        Ok(())
    }

    fn get_mut(&mut self, handle: GraphHandle) -> Result<&mut RouteConflictGraph, HandleError> {
        self.graphs
            .get_mut(&handle)
            .ok_or(HandleError::UnknownHandle(handle))
    }
}
