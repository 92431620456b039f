use std::{
    cmp::Ordering,
    fmt::Debug,
    hash::Hash,
    ops::{Add, Sub},
};

pub mod edge;
pub mod error;
pub mod graph_functions;
pub mod path;
pub mod reversible_graph;

pub type VertexId = u32;
pub type Weight = f64;

/// Numeric weight used by the search algorithms.
///
/// Besides the usual arithmetic the searches need a zero value, an infinite
/// sentinel and a tolerance for comparisons of accumulated floating point
/// sums.
pub trait AStarWeight:
    Copy + PartialOrd + Debug + Add<Output = Self> + Sub<Output = Self> + Send + Sync + 'static
{
    const ZERO: Self;
    const MAX: Self;
    const EPSILON: Self;

    fn half(self) -> Self;

    /// Total order, used by the priority queues.
    fn total_cmp(&self, other: &Self) -> Ordering;
}

impl AStarWeight for f64 {
    const ZERO: Self = 0.0;
    const MAX: Self = f64::MAX;
    const EPSILON: Self = 1e-6;

    fn half(self) -> Self {
        0.5 * self
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        f64::total_cmp(self, other)
    }
}

impl AStarWeight for f32 {
    const ZERO: Self = 0.0;
    const MAX: Self = f32::MAX;
    const EPSILON: Self = 1e-4;

    fn half(self) -> Self {
        0.5 * self
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        f32::total_cmp(self, other)
    }
}

/// A directed arc as seen from the vertex it was requested for.
pub trait GraphEdge {
    type Vertex;
    type Weight;

    fn target(&self) -> &Self::Vertex;

    fn weight(&self) -> Self::Weight;
}

/// Read-only view on a weighted directed graph.
///
/// For edges returned by `incoming_edges(v)` the target is the tail of the
/// arc, i.e. the vertex the backward search moves to.
pub trait WeightedGraph: Send + Sync {
    type Vertex: Clone + Eq + Ord + Hash + Debug;
    type Weight: AStarWeight;
    type Edge: GraphEdge<Vertex = Self::Vertex, Weight = Self::Weight> + Clone;

    fn outgoing_edges(&self, vertex: &Self::Vertex, edges: &mut Vec<Self::Edge>);

    fn incoming_edges(&self, vertex: &Self::Vertex, edges: &mut Vec<Self::Edge>);

    /// Admissible lower bound of the distance from `from` to `to`.
    fn heuristic_cost_estimate(&self, from: &Self::Vertex, to: &Self::Vertex) -> Self::Weight;
}

/// The graph with every arc turned around.
pub struct Reversed<'a, G: WeightedGraph> {
    graph: &'a G,
}

impl<'a, G: WeightedGraph> Reversed<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        Reversed { graph }
    }
}

impl<'a, G: WeightedGraph> WeightedGraph for Reversed<'a, G> {
    type Vertex = G::Vertex;
    type Weight = G::Weight;
    type Edge = G::Edge;

    fn outgoing_edges(&self, vertex: &Self::Vertex, edges: &mut Vec<Self::Edge>) {
        self.graph.incoming_edges(vertex, edges)
    }

    fn incoming_edges(&self, vertex: &Self::Vertex, edges: &mut Vec<Self::Edge>) {
        self.graph.outgoing_edges(vertex, edges)
    }

    fn heuristic_cost_estimate(&self, from: &Self::Vertex, to: &Self::Vertex) -> Self::Weight {
        self.graph.heuristic_cost_estimate(to, from)
    }
}
