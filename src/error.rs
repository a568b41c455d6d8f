use crate::allocation::Route;
use crate::handle::GraphHandle;

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum GraphError {
    #[error("node count {nodes} exceeds the limit of {max}")]
    TooManyNodes { nodes: u32, max: u32 },
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum HandleError {
    #[error("unknown graph handle {0}")]
    UnknownHandle(GraphHandle),
    #[error("no graph handles left")]
    Exhausted,
    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum AllocationError {
    #[error("constraint refers to unknown net: {net}")]
    UnknownNet { net: String },
    #[error("routing tree uses {route:?}, which is not a router output")]
    InvalidRoute { route: Route },
    #[error("too many nets ({count}) for a conflict graph")]
    TooManyNets { count: usize },
    #[error("failed to build the conflict graph: {source}")]
    Graph {
        #[from]
        source: GraphError,
    },
}
