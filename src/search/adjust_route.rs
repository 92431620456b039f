use ahash::{HashMap, HashMapExt};
use tracing::debug;

use super::{cancellable::Cancellable, context::Context, AStarAlgorithm, Path, SearchOutcome};
use crate::graphs::{AStarWeight, GraphEdge, WeightedGraph};

impl AStarAlgorithm {
    /// Repairs `previous_route` after the traveller left it and is now at
    /// `start`.
    ///
    /// Runs a plain Dijkstra wave from `start` that is cut off at
    /// `adjust_limit` (same unit as the edge weights) and returns the
    /// cheapest way back onto the previous route followed by the rest of
    /// that route. `on_visited_vertex` is called with `start` and every
    /// settled vertex.
    ///
    /// # Panics
    ///
    /// If `previous_route` is empty.
    pub fn adjust_route<G, Observer>(
        &self,
        graph: &G,
        start: &G::Vertex,
        previous_route: &[G::Edge],
        adjust_limit: G::Weight,
        cancellable: &dyn Cancellable,
        mut on_visited_vertex: Observer,
    ) -> SearchOutcome<G::Vertex, G::Weight>
    where
        G: WeightedGraph,
        Observer: FnMut(&G::Vertex, &G::Vertex),
    {
        assert!(
            !previous_route.is_empty(),
            "the route to adjust must contain at least one edge"
        );

        // Distance from every route vertex to the end of the route. Walking
        // backwards, a vertex the route passes twice keeps its first
        // occurrence.
        let mut remaining_distances = HashMap::new();
        let mut remaining_distance = G::Weight::ZERO;
        for edge in previous_route.iter().rev() {
            remaining_distances.insert(edge.target().clone(), remaining_distance);
            remaining_distance = remaining_distance + edge.weight();
        }

        let mut context = Context::new();
        let mut poll = self.poll(cancellable);
        let mut was_cancelled = false;
        let mut best: Option<(G::Vertex, G::Weight)> = None;

        let visit_vertex = |vertex: &G::Vertex, distance: G::Weight| {
            if poll.is_cancelled() {
                was_cancelled = true;
                return false;
            }

            if distance > adjust_limit {
                return false;
            }

            on_visited_vertex(start, vertex);

            if let Some(&remaining) = remaining_distances.get(vertex) {
                let full_distance = distance + remaining;
                let improves = best
                    .as_ref()
                    .map_or(true, |(_, best_distance)| full_distance < *best_distance);
                if improves {
                    best = Some((vertex.clone(), full_distance));
                }
            }

            true
        };

        self.propagate_wave_plain(graph, start, visit_vertex, &mut context);

        if was_cancelled {
            debug!("route adjustment cancelled");
            return SearchOutcome::Cancelled;
        }

        let Some((return_vertex, _)) = best else {
            debug!(
                reached = context.number_of_reached_vertices(),
                "no way back onto the route within the adjust limit"
            );
            return SearchOutcome::NoPath;
        };

        let mut vertices = context.reconstruct_path(&return_vertex);
        let position = previous_route
            .iter()
            .position(|edge| *edge.target() == return_vertex)
            .unwrap_or_else(|| {
                panic!(
                    "can't find {:?} on the previous route of {} edges, adjusted part has {} vertices",
                    return_vertex,
                    previous_route.len(),
                    vertices.len()
                )
            });
        vertices.extend(
            previous_route[position + 1..]
                .iter()
                .map(|edge| edge.target().clone()),
        );

        let distance = context.get_distance(&return_vertex) + remaining_distances[&return_vertex];
        debug!(
            ?return_vertex,
            reached = context.number_of_reached_vertices(),
            "route adjusted"
        );
        SearchOutcome::Found(Path { vertices, distance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graphs::{
            edge::{DirectedTaillessWeightedEdge, DirectedWeightedEdge},
            graph_functions::route_edges,
            reversible_graph::ReversibleGraph,
        },
        search::{CancellationFlag, NeverCancelled, ResultCode},
    };

    // 0 -> 1 -> 2 -> 3 -> 4 is the route, 5 is a detour vertex next to it.
    fn road() -> ReversibleGraph {
        ReversibleGraph::from_edges(
            6,
            &[
                DirectedWeightedEdge::new(0, 1, 1.0),
                DirectedWeightedEdge::new(1, 2, 1.0),
                DirectedWeightedEdge::new(2, 3, 1.0),
                DirectedWeightedEdge::new(3, 4, 1.0),
                DirectedWeightedEdge::new(0, 5, 1.0),
                DirectedWeightedEdge::new(5, 0, 1.0),
                DirectedWeightedEdge::new(5, 3, 5.0),
            ],
        )
        .unwrap()
    }

    fn previous_route(graph: &ReversibleGraph) -> Vec<DirectedTaillessWeightedEdge> {
        route_edges(graph, &[0, 1, 2, 3, 4]).unwrap()
    }

    #[test]
    fn rejoins_at_the_cheapest_vertex() {
        let graph = road();
        let route = previous_route(&graph);
        let outcome = AStarAlgorithm::new().adjust_route(
            &graph,
            &5,
            &route,
            10.0,
            &NeverCancelled,
            |_, _| {},
        );

        let path = outcome.into_path().unwrap();
        assert_eq!(path.vertices, vec![5, 0, 1, 2, 3, 4]);
        assert_eq!(path.distance, 5.0);
    }

    #[test]
    fn limit_cuts_the_wave() {
        let graph = road();
        let route = previous_route(&graph);
        let outcome =
            AStarAlgorithm::new().adjust_route(&graph, &5, &route, 1.5, &NeverCancelled, |_, _| {});
        assert_eq!(outcome.code(), ResultCode::NoPath);
    }

    #[test]
    fn observer_gets_start_first() {
        let graph = road();
        let route = previous_route(&graph);
        let mut observed = Vec::new();
        AStarAlgorithm::new().adjust_route(&graph, &2, &route, 10.0, &NeverCancelled, |s, v| {
            observed.push((*s, *v))
        });
        assert_eq!(observed, vec![(2, 2), (2, 3), (2, 4)]);
    }

    #[test]
    fn cancelled_before_start() {
        let graph = road();
        let route = previous_route(&graph);
        let flag = CancellationFlag::new();
        flag.cancel();
        let outcome = AStarAlgorithm::new().adjust_route(&graph, &5, &route, 10.0, &flag, |_, _| {});
        assert_eq!(outcome, SearchOutcome::Cancelled);
    }

    #[test]
    #[should_panic(expected = "at least one edge")]
    fn empty_route_is_rejected() {
        let graph = road();
        AStarAlgorithm::new().adjust_route(&graph, &5, &[], 10.0, &NeverCancelled, |_, _| {});
    }
}
