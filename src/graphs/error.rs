use super::{VertexId, Weight};

/// Errors raised while assembling a graph from edges and positions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("edge {tail} -> {head} references a vertex outside of 0..{number_of_vertices}")]
    VertexOutOfRange {
        tail: VertexId,
        head: VertexId,
        number_of_vertices: u32,
    },

    #[error("edge {tail} -> {head} has negative weight {weight}")]
    NegativeWeight {
        tail: VertexId,
        head: VertexId,
        weight: Weight,
    },

    #[error("edge {tail} -> {head} has non-finite weight {weight}")]
    NonFiniteWeight {
        tail: VertexId,
        head: VertexId,
        weight: Weight,
    },

    #[error("got {got} vertex positions for a graph with {expected} vertices")]
    PositionCountMismatch { expected: u32, got: usize },
}
