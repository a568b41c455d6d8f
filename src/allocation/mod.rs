use std::hash::Hash;

pub use self::tree::{Route, RoutingTree, RoutingTreeChild, Traverse};

use crate::config::Limits;
use crate::error::AllocationError;
use crate::graph::{Element, RouteConflictGraph};
use crate::util::FastHashMap;

mod tree;

/// Assigns a routing identifier to every multicast net such that nets which
/// must be told apart by some router get different identifiers.
///
/// Nets are numbered in the order they are given. Each `(net, others)` pair
/// of `additional_constraints` forbids `net` from sharing an identifier with
/// any of `others`; listing the pair once in either direction is enough.
/// A net with an empty `others` list is never looked up, so it need not be
/// one of `nets`. Identifiers are dense, starting from zero.
///
/// Trees routing to a core past [`Route::MAX_CORE`] are rejected.
pub fn assign_multicast_net_ids<N, I, C, O>(
    nets: I,
    additional_constraints: C,
) -> Result<FastHashMap<N, u32>, AllocationError>
where
    N: Eq + Hash + Clone + std::fmt::Debug,
    I: IntoIterator<Item = (N, Vec<RoutingTree>)>,
    C: IntoIterator<Item = (N, O)>,
    O: IntoIterator<Item = N>,
{
    assign_multicast_net_ids_with_limits(nets, additional_constraints, &Limits::default())
}

pub fn assign_multicast_net_ids_with_limits<N, I, C, O>(
    nets: I,
    additional_constraints: C,
    limits: &Limits,
) -> Result<FastHashMap<N, u32>, AllocationError>
where
    N: Eq + Hash + Clone + std::fmt::Debug,
    I: IntoIterator<Item = (N, Vec<RoutingTree>)>,
    C: IntoIterator<Item = (N, O)>,
    O: IntoIterator<Item = N>,
{
    let nets = nets.into_iter().collect::<Vec<_>>();
    for (_, trees) in &nets {
        if let Some(route) = trees.iter().find_map(RoutingTree::invalid_route) {
            return Err(AllocationError::InvalidRoute { route });
        }
    }

    let count = u32::try_from(nets.len())
        .map_err(|_| AllocationError::TooManyNets { count: nets.len() })?;
    tracing::debug!(nets = count, "building multicast net constraint graph");

    let mut net_ids = FastHashMap::with_capacity_and_hasher(nets.len(), Default::default());
    for (id, (net, _)) in (0..count).zip(&nets) {
        net_ids.insert(net.clone(), id);
    }

    let mut graph = RouteConflictGraph::with_limits(count, limits)?;

    let lookup = |net: &N| {
        net_ids
            .get(net)
            .copied()
            .ok_or_else(|| AllocationError::UnknownNet {
                net: format!("{net:?}"),
            })
    };

    for (net, others) in additional_constraints {
        for other in others {
            graph.add_constraint(lookup(&net)?, lookup(&other)?);
        }
    }

    for (id, (_, trees)) in (0..count).zip(&nets) {
        for tree in trees {
            for (chip, route) in tree.traverse() {
                graph.add_route(id, Element::from(chip), route);
            }
        }
    }

    tracing::debug!(nets = count, "assigning identifiers to multicast nets");
    let colouring = graph.colour();

    Ok(nets
        .into_iter()
        .zip(colouring.into_inner())
        .map(|((net, _), colour)| (net, colour))
        .collect())
}
