use serde::{Deserialize, Serialize};

use super::{reversible_graph::ReversibleGraph, VertexId, Weight};
use crate::{
    heuristics::{DistanceHeuristic, GuidedGraph},
    search::{AStarAlgorithm, NeverCancelled, Path},
};

/// Represents a request for finding a shortest path in a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPathRequest {
    source: VertexId,
    target: VertexId,
}

impl ShortestPathRequest {
    pub fn new(source: VertexId, target: VertexId) -> ShortestPathRequest {
        ShortestPathRequest { source, target }
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn target(&self) -> VertexId {
        self.target
    }
}

/// Represents a request for validating a shortest path in a graph.
///
/// This struct is used to encapsulate a shortest path request along with the
/// weight of a shortest path, if there exists one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShortestPathTestCase {
    pub request: ShortestPathRequest,
    pub weight: Option<Weight>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShortestPathTestTimingResult {
    pub test_case: ShortestPathTestCase,
    pub unidirectional_seconds: f64,
    pub bidirectional_seconds: f64,
}

pub trait PathFinding: Send + Sync {
    fn shortest_path(&self, path_request: &ShortestPathRequest) -> Option<Path<VertexId, Weight>>;

    fn shortest_path_weight(&self, path_request: &ShortestPathRequest) -> Option<Weight> {
        self.shortest_path(path_request).map(|path| path.distance)
    }

    fn number_of_vertices(&self) -> u32;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchDirection {
    Unidirectional,
    Bidirectional,
}

/// Uncancellable A* over a `ReversibleGraph` steered by `heuristic`.
pub struct AStarPathFinder<'a, H: DistanceHeuristic> {
    graph: GuidedGraph<'a, H>,
    algorithm: AStarAlgorithm,
    direction: SearchDirection,
}

impl<'a, H: DistanceHeuristic> AStarPathFinder<'a, H> {
    pub fn new(graph: &'a ReversibleGraph, heuristic: H, direction: SearchDirection) -> Self {
        AStarPathFinder {
            graph: GuidedGraph::new(graph, heuristic),
            algorithm: AStarAlgorithm::default(),
            direction,
        }
    }

    pub fn with_algorithm(mut self, algorithm: AStarAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

impl<'a, H: DistanceHeuristic> PathFinding for AStarPathFinder<'a, H> {
    fn shortest_path(&self, path_request: &ShortestPathRequest) -> Option<Path<VertexId, Weight>> {
        let source = path_request.source();
        let target = path_request.target();
        let outcome = match self.direction {
            SearchDirection::Unidirectional => {
                self.algorithm
                    .find_path(&self.graph, &source, &target, &NeverCancelled, |_, _| {})
            }
            SearchDirection::Bidirectional => self.algorithm.find_path_bidirectional(
                &self.graph,
                &source,
                &target,
                &NeverCancelled,
                |_, _| {},
            ),
        };
        outcome.into_path()
    }

    fn number_of_vertices(&self) -> u32 {
        self.graph.graph().number_of_vertices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graphs::{edge::DirectedWeightedEdge, graph_functions::add_edge_bidirectional},
        heuristics::none_heuristic::NoneHeuristic,
    };

    #[test]
    fn both_directions_agree() {
        let mut graph = ReversibleGraph::new(4);
        add_edge_bidirectional(&mut graph, &DirectedWeightedEdge::new(0, 1, 2.0)).unwrap();
        add_edge_bidirectional(&mut graph, &DirectedWeightedEdge::new(1, 2, 2.0)).unwrap();
        add_edge_bidirectional(&mut graph, &DirectedWeightedEdge::new(0, 2, 5.0)).unwrap();

        let request = ShortestPathRequest::new(0, 2);
        for direction in [SearchDirection::Unidirectional, SearchDirection::Bidirectional] {
            let pathfinder = AStarPathFinder::new(&graph, NoneHeuristic {}, direction);
            assert_eq!(pathfinder.number_of_vertices(), 4);
            assert_eq!(pathfinder.shortest_path_weight(&request), Some(4.0));
            assert_eq!(
                pathfinder.shortest_path_weight(&ShortestPathRequest::new(0, 3)),
                None
            );
        }
    }
}
