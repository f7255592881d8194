use thiserror::Error;

use crate::graph::{EdgeId, VertexId};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("vertex {0} has no outgoing edge")]
    DeadEnd(VertexId),
    #[error("edge endpoint {endpoint} does not exist in a graph with {vertex_count} vertices")]
    DanglingEdge { endpoint: usize, vertex_count: usize },
    #[error("there is no edge from {from} to {to}")]
    NoSuchEdge { from: VertexId, to: VertexId },
    #[error("edge {0} has no weight")]
    MissingWeight(EdgeId),
    #[error("edge {0} already has a weight")]
    DuplicateWeight(EdgeId),
    #[error("component {component} of the weight of edge {edge} is negative")]
    NegativeWeight { edge: EdgeId, component: usize },
    #[error("the cycle through {0} has a total denominator weight of zero")]
    ZeroDenominatorCycle(VertexId),
    #[error("precision {0} is not a positive finite number")]
    InvalidPrecision(f64),
}
