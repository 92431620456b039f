use itertools::Itertools;
use rand::Rng;

use super::{
    edge::DirectedWeightedEdge,
    error::GraphError,
    reversible_graph::{Position, ReversibleGraph},
    AStarWeight, GraphEdge, WeightedGraph,
};
use crate::search::Path;

/// Cheapest arc from `tail` to `head`, if any.
pub fn cheapest_edge<G: WeightedGraph>(
    graph: &G,
    tail: &G::Vertex,
    head: &G::Vertex,
    edges: &mut Vec<G::Edge>,
) -> Option<G::Edge> {
    graph.outgoing_edges(tail, edges);
    edges
        .iter()
        .filter(|edge| edge.target() == head)
        .min_by(|a, b| a.weight().total_cmp(&b.weight()))
        .cloned()
}

/// Turns a vertex sequence into the sequence of arcs between consecutive
/// vertices, picking the cheapest arc where there are parallel ones.
/// Returns `None` if two consecutive vertices are not connected.
pub fn route_edges<G: WeightedGraph>(graph: &G, vertices: &[G::Vertex]) -> Option<Vec<G::Edge>> {
    let mut edges = Vec::new();
    vertices
        .iter()
        .tuple_windows()
        .map(|(tail, head)| cheapest_edge(graph, tail, head, &mut edges))
        .collect()
}

/// Sum of the cheapest arcs along `vertices`.
pub fn path_weight<G: WeightedGraph>(graph: &G, vertices: &[G::Vertex]) -> Option<G::Weight> {
    let edges = route_edges(graph, vertices)?;
    Some(
        edges
            .iter()
            .fold(G::Weight::ZERO, |sum, edge| sum + edge.weight()),
    )
}

/// Whether two distances are equal up to the search tolerance of `W`.
pub fn weights_agree<W: AStarWeight>(a: W, b: W) -> bool {
    let difference = if a > b { a - b } else { b - a };
    difference <= W::EPSILON
}

/// Check if a path is a valid path from `source` to `target` whose length
/// matches the reported distance.
pub fn validate_path<G: WeightedGraph>(
    graph: &G,
    source: &G::Vertex,
    target: &G::Vertex,
    path: &Path<G::Vertex, G::Weight>,
) -> Result<(), String> {
    // Ensure first and last vertex of path are source and target of request.
    match path.vertices.first() {
        Some(first_vertex) if first_vertex == source => {}
        Some(_) => return Err("first vertex of path is not source of request".to_string()),
        None => return Err("path is empty".to_string()),
    }
    if path.vertices.last() != Some(target) {
        return Err("last vertex of path is not target of request".to_string());
    }

    let true_cost = path_weight(graph, &path.vertices)
        .ok_or_else(|| "path uses a non-existing edge".to_string())?;

    if !weights_agree(true_cost, path.distance) {
        return Err(format!(
            "wrong path weight: reported {:?}, edges sum up to {:?}",
            path.distance, true_cost
        ));
    }

    Ok(())
}

pub fn add_edge_bidirectional(
    graph: &mut ReversibleGraph,
    edge: &DirectedWeightedEdge,
) -> Result<(), GraphError> {
    graph.set_edge(edge)?;
    graph.set_edge(&edge.reversed())
}

/// Random strongly connected graph with vertices scattered over a
/// `side` x `side` square.
///
/// A bidirectional ring through all vertices keeps the graph strongly
/// connected, `chords_per_vertex` random arcs leave every vertex. Every arc
/// is between one and two times as long as the straight line between its
/// ends, so the Euclidean heuristic is admissible and consistent.
pub fn random_geometric_graph<R: Rng>(
    rng: &mut R,
    number_of_vertices: u32,
    chords_per_vertex: u32,
    side: f64,
) -> Result<ReversibleGraph, GraphError> {
    let positions: Vec<Position> = (0..number_of_vertices)
        .map(|_| Position::new(rng.gen_range(0.0..side), rng.gen_range(0.0..side)))
        .collect();

    let mut graph = ReversibleGraph::new(number_of_vertices);
    let random_weight = |rng: &mut R, tail: u32, head: u32| {
        let length = positions[tail as usize].distance(&positions[head as usize]);
        length * rng.gen_range(1.0..2.0)
    };

    if number_of_vertices > 1 {
        for tail in 0..number_of_vertices {
            let head = (tail + 1) % number_of_vertices;
            let weight = random_weight(rng, tail, head);
            add_edge_bidirectional(&mut graph, &DirectedWeightedEdge::new(tail, head, weight))?;
        }
    }

    for tail in 0..number_of_vertices {
        for _ in 0..chords_per_vertex {
            let head = rng.gen_range(0..number_of_vertices);
            let weight = random_weight(rng, tail, head);
            graph.set_edge(&DirectedWeightedEdge::new(tail, head, weight))?;
        }
    }

    graph.with_positions(positions)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn square() -> ReversibleGraph {
        let mut graph = ReversibleGraph::new(4);
        add_edge_bidirectional(&mut graph, &DirectedWeightedEdge::new(0, 1, 1.0)).unwrap();
        add_edge_bidirectional(&mut graph, &DirectedWeightedEdge::new(1, 2, 1.0)).unwrap();
        add_edge_bidirectional(&mut graph, &DirectedWeightedEdge::new(2, 3, 1.0)).unwrap();
        graph.set_edge(&DirectedWeightedEdge::new(0, 1, 0.5)).unwrap();
        graph
    }

    #[test]
    fn route_edges_picks_cheapest_parallel_arc() {
        let graph = square();
        let edges = route_edges(&graph, &[0, 1, 2]).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].weight(), 0.5);
        assert_eq!(path_weight(&graph, &[0, 1, 2, 3]), Some(2.5));
        assert!(route_edges(&graph, &[0, 2]).is_none());
    }

    #[test]
    fn validate_path_reports_problems() {
        let graph = square();
        let good = Path {
            vertices: vec![0, 1, 2],
            distance: 1.5,
        };
        assert_eq!(validate_path(&graph, &0, &2, &good), Ok(()));

        let wrong_weight = Path {
            vertices: vec![0, 1, 2],
            distance: 2.0,
        };
        assert!(validate_path(&graph, &0, &2, &wrong_weight)
            .unwrap_err()
            .starts_with("wrong path weight"));

        let jump = Path {
            vertices: vec![0, 2],
            distance: 1.5,
        };
        assert_eq!(
            validate_path(&graph, &0, &2, &jump),
            Err("path uses a non-existing edge".to_string())
        );

        assert_eq!(
            validate_path(&graph, &1, &2, &good),
            Err("first vertex of path is not source of request".to_string())
        );
        assert_eq!(
            validate_path(&graph, &0, &2, &Path::default()),
            Err("path is empty".to_string())
        );
    }

    #[test]
    fn weights_agree_uses_search_tolerance() {
        // Float noise of accumulated sums is far above the machine epsilon
        // but well inside the search tolerance.
        let sum = 0.1 + 0.2;
        assert_ne!(sum, 0.3);
        assert!(weights_agree(sum, 0.3));
        assert!(weights_agree(1_000.0, 1_000.0 + 5e-7));
        assert!(!weights_agree(1_000.0, 1_000.0 + 1e-3));
        assert!(weights_agree(2.0f32, 2.0f32 + 5e-5));
        assert!(!weights_agree(2.0f32, 2.1f32));
    }

    #[test]
    fn random_geometric_graph_is_consistent_with_positions() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = random_geometric_graph(&mut rng, 50, 2, 100.0).unwrap();
        assert_eq!(graph.number_of_vertices(), 50);
        assert_eq!(graph.number_of_edges(), 2 * 50 + 2 * 50);

        let positions = graph.positions().unwrap();
        for vertex in graph.vertices() {
            for edge in graph.out_edges(vertex) {
                let length =
                    positions[edge.tail() as usize].distance(&positions[edge.head() as usize]);
                assert!(edge.weight() >= length);
            }
        }
    }
}
