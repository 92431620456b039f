use super::{
    edge::{DirectedTaillessWeightedEdge, DirectedWeightedEdge},
    error::GraphError,
    AStarWeight, VertexId, WeightedGraph, Weight,
};

/// Planar coordinates of a vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Position {
        Position { x, y }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Adjacency list graph that stores every arc twice, once in the list of its
/// tail and once in the list of its head, so that both directions can be
/// expanded.
#[derive(Clone, Debug, Default)]
pub struct ReversibleGraph {
    out_edges: Vec<Vec<DirectedTaillessWeightedEdge>>,
    in_edges: Vec<Vec<DirectedTaillessWeightedEdge>>,
    positions: Option<Vec<Position>>,
}

impl ReversibleGraph {
    pub fn new(number_of_vertices: u32) -> ReversibleGraph {
        ReversibleGraph {
            out_edges: vec![Vec::new(); number_of_vertices as usize],
            in_edges: vec![Vec::new(); number_of_vertices as usize],
            positions: None,
        }
    }

    pub fn from_edges(
        number_of_vertices: u32,
        edges: &[DirectedWeightedEdge],
    ) -> Result<ReversibleGraph, GraphError> {
        let mut graph = ReversibleGraph::new(number_of_vertices);
        for edge in edges {
            graph.set_edge(edge)?;
        }
        Ok(graph)
    }

    /// Attaches one position per vertex.
    pub fn with_positions(mut self, positions: Vec<Position>) -> Result<Self, GraphError> {
        if positions.len() != self.out_edges.len() {
            return Err(GraphError::PositionCountMismatch {
                expected: self.number_of_vertices(),
                got: positions.len(),
            });
        }
        self.positions = Some(positions);
        Ok(self)
    }

    pub fn positions(&self) -> Option<&[Position]> {
        self.positions.as_deref()
    }

    /// Adds an arc. Parallel arcs are kept, self loops are accepted.
    pub fn set_edge(&mut self, edge: &DirectedWeightedEdge) -> Result<(), GraphError> {
        let number_of_vertices = self.number_of_vertices();
        if edge.tail() >= number_of_vertices || edge.head() >= number_of_vertices {
            return Err(GraphError::VertexOutOfRange {
                tail: edge.tail(),
                head: edge.head(),
                number_of_vertices,
            });
        }
        if !edge.weight().is_finite() {
            return Err(GraphError::NonFiniteWeight {
                tail: edge.tail(),
                head: edge.head(),
                weight: edge.weight(),
            });
        }
        if edge.weight() < Weight::ZERO {
            return Err(GraphError::NegativeWeight {
                tail: edge.tail(),
                head: edge.head(),
                weight: edge.weight(),
            });
        }

        self.out_edges[edge.tail() as usize].push(edge.tailless());
        self.in_edges[edge.head() as usize].push(edge.headless());
        Ok(())
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.out_edges.len() as u32
    }

    pub fn number_of_edges(&self) -> u32 {
        self.out_edges.iter().map(Vec::len).sum::<usize>() as u32
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        0..self.number_of_vertices()
    }

    pub fn out_edges(
        &self,
        source: VertexId,
    ) -> impl ExactSizeIterator<Item = DirectedWeightedEdge> + '_ {
        self.out_edges
            .get(source as usize)
            .map_or(&[][..], Vec::as_slice)
            .iter()
            .map(move |edge| edge.set_tail(source))
    }

    pub fn in_edges(
        &self,
        target: VertexId,
    ) -> impl ExactSizeIterator<Item = DirectedWeightedEdge> + '_ {
        self.in_edges
            .get(target as usize)
            .map_or(&[][..], Vec::as_slice)
            .iter()
            .map(move |edge| edge.set_tail(target).reversed())
    }

    fn adjacency(
        lists: &[Vec<DirectedTaillessWeightedEdge>],
        vertex: VertexId,
        edges: &mut Vec<DirectedTaillessWeightedEdge>,
    ) {
        edges.clear();
        if let Some(list) = lists.get(vertex as usize) {
            edges.extend_from_slice(list);
        }
    }
}

/// Without a heuristic the searches behave like plain Dijkstra.
impl WeightedGraph for ReversibleGraph {
    type Vertex = VertexId;
    type Weight = Weight;
    type Edge = DirectedTaillessWeightedEdge;

    fn outgoing_edges(&self, vertex: &VertexId, edges: &mut Vec<Self::Edge>) {
        Self::adjacency(&self.out_edges, *vertex, edges)
    }

    fn incoming_edges(&self, vertex: &VertexId, edges: &mut Vec<Self::Edge>) {
        Self::adjacency(&self.in_edges, *vertex, edges)
    }

    fn heuristic_cost_estimate(&self, _from: &VertexId, _to: &VertexId) -> Weight {
        Weight::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::GraphEdge;

    fn triangle() -> ReversibleGraph {
        ReversibleGraph::from_edges(
            3,
            &[
                DirectedWeightedEdge::new(0, 1, 1.0),
                DirectedWeightedEdge::new(1, 2, 2.0),
                DirectedWeightedEdge::new(0, 2, 4.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn stores_both_directions() {
        let graph = triangle();
        assert_eq!(graph.number_of_vertices(), 3);
        assert_eq!(graph.number_of_edges(), 3);

        let mut edges = Vec::new();
        graph.outgoing_edges(&0, &mut edges);
        let heads: Vec<_> = edges.iter().map(|edge| *edge.target()).collect();
        assert_eq!(heads, vec![1, 2]);

        graph.incoming_edges(&2, &mut edges);
        let tails: Vec<_> = edges.iter().map(|edge| *edge.target()).collect();
        assert_eq!(tails, vec![1, 0]);

        let in_edges: Vec<_> = graph.in_edges(2).collect();
        assert_eq!(in_edges[0], DirectedWeightedEdge::new(1, 2, 2.0));
    }

    #[test]
    fn rejects_invalid_edges() {
        let mut graph = ReversibleGraph::new(2);
        assert_eq!(
            graph.set_edge(&DirectedWeightedEdge::new(0, 2, 1.0)),
            Err(GraphError::VertexOutOfRange {
                tail: 0,
                head: 2,
                number_of_vertices: 2
            })
        );
        assert!(matches!(
            graph.set_edge(&DirectedWeightedEdge::new(0, 1, -1.0)),
            Err(GraphError::NegativeWeight { .. })
        ));
        assert!(matches!(
            graph.set_edge(&DirectedWeightedEdge::new(0, 1, f64::NAN)),
            Err(GraphError::NonFiniteWeight { .. })
        ));
        assert_eq!(graph.number_of_edges(), 0);
    }

    #[test]
    fn positions_must_match_vertices() {
        let result = triangle().with_positions(vec![Position::new(0.0, 0.0)]);
        assert_eq!(
            result.unwrap_err(),
            GraphError::PositionCountMismatch {
                expected: 3,
                got: 1
            }
        );
    }
}
