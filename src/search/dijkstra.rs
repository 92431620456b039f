use super::{AStarAlgorithm, Context};
use crate::graphs::WeightedGraph;

/// Distances and parents of every vertex reachable from `source`.
pub fn one_to_all<G: WeightedGraph>(graph: &G, source: &G::Vertex) -> Context<G::Vertex, G::Weight> {
    let mut context = Context::new();
    AStarAlgorithm::new().propagate_wave_plain(graph, source, |_, _| true, &mut context);
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::{edge::DirectedWeightedEdge, reversible_graph::ReversibleGraph, Reversed};

    #[test]
    fn one_to_all_in_both_directions() {
        let graph = ReversibleGraph::from_edges(
            4,
            &[
                DirectedWeightedEdge::new(0, 1, 2.0),
                DirectedWeightedEdge::new(1, 2, 2.0),
                DirectedWeightedEdge::new(0, 2, 5.0),
            ],
        )
        .unwrap();

        let forward = one_to_all(&graph, &0);
        assert_eq!(forward.get_distance(&2), 4.0);
        assert_eq!(forward.reconstruct_path(&2), vec![0, 1, 2]);
        assert!(!forward.has_distance(&3));

        let backward = one_to_all(&Reversed::new(&graph), &2);
        assert_eq!(backward.get_distance(&0), 4.0);
        assert_eq!(backward.get_distance(&1), 2.0);
        assert_eq!(backward.reconstruct_path(&0), vec![2, 1, 0]);
    }
}
