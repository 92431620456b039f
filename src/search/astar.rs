//! Wave propagation and goal directed A*.
//!
//! A* is run as Dijkstra's algorithm on a reweighted graph. An edge `(v, w)`
//! of length `l(v, w)` gets the reduced cost `l(v, w) + pi(w) - pi(v)` where
//! `pi` is the heuristic estimate of the distance to the goal. As long as the
//! heuristic is consistent all reduced costs are non-negative and the first
//! time the goal is popped from the queue its distance is final.

use std::collections::BinaryHeap;

use tracing::debug;

use super::{
    cancellable::{Cancellable, PeriodicPoll},
    context::Context,
    queue::State,
    Path, SearchOutcome,
};
use crate::graphs::{AStarWeight, GraphEdge, WeightedGraph};

/// Entry point of all searches.
///
/// Holds no per-search state, one instance can serve any number of searches
/// on any number of threads.
#[derive(Clone, Debug)]
pub struct AStarAlgorithm {
    /// Number of steps after which the bidirectional search switches the
    /// direction it expands.
    pub queue_switch_period: u32,
    /// The cancellable is asked once per this many settled vertices.
    pub cancellation_poll_period: u32,
}

impl Default for AStarAlgorithm {
    fn default() -> Self {
        AStarAlgorithm {
            queue_switch_period: 128,
            cancellation_poll_period: 128,
        }
    }
}

impl AStarAlgorithm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queue_switch_period(mut self, period: u32) -> Self {
        self.queue_switch_period = period.max(1);
        self
    }

    pub fn with_cancellation_poll_period(mut self, period: u32) -> Self {
        self.cancellation_poll_period = period.max(1);
        self
    }

    pub(crate) fn poll<'a>(&self, cancellable: &'a dyn Cancellable) -> PeriodicPoll<'a> {
        PeriodicPoll::new(cancellable, self.cancellation_poll_period)
    }

    /// Dijkstra style wave from `start`.
    ///
    /// `visit_vertex` is called once per settled vertex with its final
    /// distance; the wave stops as soon as it returns `false`.
    /// `adjust_edge_weight` maps an edge leaving a vertex to the weight used
    /// for relaxation. `context` is cleared first and afterwards holds the
    /// distances and parents of all reached vertices.
    pub fn propagate_wave<G, Visit, Adjust>(
        &self,
        graph: &G,
        start: &G::Vertex,
        mut visit_vertex: Visit,
        mut adjust_edge_weight: Adjust,
        context: &mut Context<G::Vertex, G::Weight>,
    ) where
        G: WeightedGraph,
        Visit: FnMut(&G::Vertex, G::Weight) -> bool,
        Adjust: FnMut(&G::Vertex, &G::Edge) -> G::Weight,
    {
        context.clear();

        let mut queue = BinaryHeap::new();
        context.set_distance(start.clone(), G::Weight::ZERO);
        queue.push(State::new(start.clone(), G::Weight::ZERO));

        let mut edges = Vec::new();

        while let Some(State { vertex, distance }) = queue.pop() {
            if distance > context.get_distance(&vertex) {
                continue;
            }

            if !visit_vertex(&vertex, distance) {
                return;
            }

            graph.outgoing_edges(&vertex, &mut edges);
            for edge in edges.iter() {
                let head = edge.target();
                if *head == vertex {
                    continue;
                }

                let new_distance = distance + adjust_edge_weight(&vertex, edge);
                if new_distance >= context.get_distance(head) - G::Weight::EPSILON {
                    continue;
                }

                context.set_distance(head.clone(), new_distance);
                context.set_parent(head.clone(), vertex.clone());
                queue.push(State::new(head.clone(), new_distance));
            }
        }
    }

    /// Wave with the plain edge weights.
    pub fn propagate_wave_plain<G, Visit>(
        &self,
        graph: &G,
        start: &G::Vertex,
        visit_vertex: Visit,
        context: &mut Context<G::Vertex, G::Weight>,
    ) where
        G: WeightedGraph,
        Visit: FnMut(&G::Vertex, G::Weight) -> bool,
    {
        self.propagate_wave(
            graph,
            start,
            visit_vertex,
            |_vertex: &G::Vertex, edge: &G::Edge| edge.weight(),
            context,
        )
    }

    /// Shortest path from `start` to `finish` with A*.
    ///
    /// `on_visited_vertex` is called with every settled vertex and `finish`.
    pub fn find_path<G, Observer>(
        &self,
        graph: &G,
        start: &G::Vertex,
        finish: &G::Vertex,
        cancellable: &dyn Cancellable,
        mut on_visited_vertex: Observer,
    ) -> SearchOutcome<G::Vertex, G::Weight>
    where
        G: WeightedGraph,
        Observer: FnMut(&G::Vertex, &G::Vertex),
    {
        let mut context = Context::new();
        let mut poll = self.poll(cancellable);
        let mut outcome = SearchOutcome::NoPath;
        let mut settled = 0usize;

        let visit_vertex = |vertex: &G::Vertex, _distance: G::Weight| {
            if poll.is_cancelled() {
                outcome = SearchOutcome::Cancelled;
                return false;
            }

            settled += 1;
            on_visited_vertex(vertex, finish);

            if vertex == finish {
                outcome = SearchOutcome::Found(Path::default());
                return false;
            }

            true
        };

        let adjust_edge_weight = |vertex: &G::Vertex, edge: &G::Edge| {
            let pi_v = graph.heuristic_cost_estimate(vertex, finish);
            let pi_w = graph.heuristic_cost_estimate(edge.target(), finish);
            reduced_weight(edge.weight(), pi_v, pi_w)
        };

        self.propagate_wave(graph, start, visit_vertex, adjust_edge_weight, &mut context);

        if let SearchOutcome::Found(path) = &mut outcome {
            path.vertices = context.reconstruct_path(finish);
            // Reduced lengths along a path telescope to the real length minus
            // the estimate at the start.
            path.distance =
                context.get_distance(finish) + graph.heuristic_cost_estimate(start, finish);
        }

        debug!(
            result = %outcome.code(),
            settled,
            reached = context.number_of_reached_vertices(),
            "unidirectional search finished"
        );
        outcome
    }
}

/// `length + pi_w - pi_v` clamped at zero.
///
/// # Panics
///
/// If the reduced weight is below `-EPSILON`, which means the heuristic is
/// not consistent.
pub(crate) fn reduced_weight<W: AStarWeight>(length: W, pi_v: W, pi_w: W) -> W {
    let reduced = length + pi_w - pi_v;
    assert!(
        reduced >= W::ZERO - W::EPSILON,
        "invariant violated: reduced edge weight {:?} < {:?}",
        reduced,
        W::ZERO - W::EPSILON
    );
    if reduced > W::ZERO {
        reduced
    } else {
        W::ZERO
    }
}
