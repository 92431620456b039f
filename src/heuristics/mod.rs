use crate::graphs::{
    reversible_graph::ReversibleGraph, AStarWeight, VertexId, Weight, WeightedGraph,
};

pub mod euclidean;
pub mod landmarks;
pub mod none_heuristic;

/// Lower bound of the distance between two vertices of a `ReversibleGraph`.
///
/// To be usable by the searches the bound must be admissible and consistent,
/// i.e. `lower_bound(v, t) <= weight(v, w) + lower_bound(w, t)` for every
/// arc `(v, w)`.
pub trait DistanceHeuristic: Send + Sync {
    fn lower_bound(&self, source: VertexId, target: VertexId) -> Weight;
}

impl<H: DistanceHeuristic + ?Sized> DistanceHeuristic for &H {
    fn lower_bound(&self, source: VertexId, target: VertexId) -> Weight {
        (**self).lower_bound(source, target)
    }
}

impl<H: DistanceHeuristic + ?Sized> DistanceHeuristic for Box<H> {
    fn lower_bound(&self, source: VertexId, target: VertexId) -> Weight {
        (**self).lower_bound(source, target)
    }
}

/// A graph together with the heuristic that steers searches on it.
pub struct GuidedGraph<'a, H: DistanceHeuristic> {
    graph: &'a ReversibleGraph,
    heuristic: H,
}

impl<'a, H: DistanceHeuristic> GuidedGraph<'a, H> {
    pub fn new(graph: &'a ReversibleGraph, heuristic: H) -> Self {
        GuidedGraph { graph, heuristic }
    }

    pub fn graph(&self) -> &'a ReversibleGraph {
        self.graph
    }
}

impl<'a, H: DistanceHeuristic> WeightedGraph for GuidedGraph<'a, H> {
    type Vertex = VertexId;
    type Weight = Weight;
    type Edge = <ReversibleGraph as WeightedGraph>::Edge;

    fn outgoing_edges(&self, vertex: &VertexId, edges: &mut Vec<Self::Edge>) {
        self.graph.outgoing_edges(vertex, edges)
    }

    fn incoming_edges(&self, vertex: &VertexId, edges: &mut Vec<Self::Edge>) {
        self.graph.incoming_edges(vertex, edges)
    }

    fn heuristic_cost_estimate(&self, from: &VertexId, to: &VertexId) -> Weight {
        if from == to {
            return Weight::ZERO;
        }
        self.heuristic.lower_bound(*from, *to)
    }
}
