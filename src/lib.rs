//! Conflict-graph colouring for multicast routing key allocation.
//!
//! Nets which take different routes out of the same router must be given
//! different routing keys. [`RouteConflictGraph`] collects those conflicts
//! (plus any extra ones the caller knows about) and colours the graph
//! greedily, so that each colour can later be turned into one key.
//!
//! ```
//! use keyalloc::{Element, RouteCode, RouteConflictGraph};
//!
//! let mut graph = RouteConflictGraph::new(3).unwrap();
//! graph.add_route(0, Element::new(0, 0), RouteCode::new(0b001));
//! graph.add_route(1, Element::new(0, 0), RouteCode::new(0b100));
//! graph.add_route(2, Element::new(0, 0), RouteCode::new(0b001));
//!
//! let colouring = graph.colour();
//! assert_ne!(colouring[0], colouring[1]);
//! assert_eq!(colouring.colour_count(), 2);
//! ```

pub use self::allocation::{
    assign_multicast_net_ids, assign_multicast_net_ids_with_limits, Route, RoutingTree,
    RoutingTreeChild,
};
pub use self::config::Limits;
pub use self::error::{AllocationError, GraphError, HandleError};
pub use self::graph::{Colouring, ConflictGraph, Element, RouteCode, RouteConflictGraph};
pub use self::handle::{GraphArena, GraphHandle};
pub use self::util::PackedBitSet;

pub mod allocation;
pub mod config;
pub mod error;
pub mod graph;
pub mod handle;
pub mod util;
