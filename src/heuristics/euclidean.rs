use super::DistanceHeuristic;
use crate::graphs::{
    error::GraphError,
    reversible_graph::{Position, ReversibleGraph},
    VertexId, Weight,
};

/// Straight line distance between vertex positions times `scale`.
///
/// Admissible and consistent as long as no arc is shorter than `scale`
/// times the distance between its ends.
pub struct EuclideanHeuristic<'a> {
    positions: &'a [Position],
    scale: f64,
}

impl<'a> EuclideanHeuristic<'a> {
    pub fn new(graph: &'a ReversibleGraph) -> Result<Self, GraphError> {
        let positions = graph
            .positions()
            .ok_or(GraphError::PositionCountMismatch {
                expected: graph.number_of_vertices(),
                got: 0,
            })?;
        Ok(EuclideanHeuristic {
            positions,
            scale: 1.0,
        })
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

impl<'a> DistanceHeuristic for EuclideanHeuristic<'a> {
    fn lower_bound(&self, source: VertexId, target: VertexId) -> Weight {
        self.scale * self.positions[source as usize].distance(&self.positions[target as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::edge::DirectedWeightedEdge;

    #[test]
    fn needs_positions() {
        let graph = ReversibleGraph::new(2);
        assert!(EuclideanHeuristic::new(&graph).is_err());
    }

    #[test]
    fn scaled_straight_line() {
        let graph = ReversibleGraph::from_edges(2, &[DirectedWeightedEdge::new(0, 1, 10.0)])
            .unwrap()
            .with_positions(vec![Position::new(0.0, 0.0), Position::new(3.0, 4.0)])
            .unwrap();
        let heuristic = EuclideanHeuristic::new(&graph).unwrap().with_scale(0.5);
        assert_eq!(heuristic.lower_bound(0, 1), 2.5);
        assert_eq!(heuristic.lower_bound(1, 1), 0.0);
    }
}
