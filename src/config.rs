use crate::error::GraphError;

/// Construction limits for conflict graphs.
///
/// Every node owns an adjacency set with one bit per node, so memory grows
/// with the square of the node count.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Limits {
    /// Maximum number of nodes a graph may be created with.
    pub max_nodes: u32,
}

impl Limits {
    /// 65536 nodes, about 512 MiB of adjacency.
    pub const DEFAULT_MAX_NODES: u32 = 1 << 16;

    pub const fn unbounded() -> Self {
        Self {
            max_nodes: u32::MAX,
        }
    }

    pub fn check(&self, nodes: u32) -> Result<(), GraphError> {
        if nodes > self.max_nodes {
            return Err(GraphError::TooManyNodes {
                nodes,
                max: self.max_nodes,
            });
        }
        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nodes: Self::DEFAULT_MAX_NODES,
        }
    }
}
