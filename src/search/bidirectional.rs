//! Bidirectional A*.
//!
//! Both directions use potentials derived from the same heuristic so that
//! `p_f(v) + p_r(v)` is the same for every vertex:
//!
//! ```text
//! p_f(v) = 0.5 * (pi_f(v) - pi_r(v)) + 0.5 * pi_r(t)
//! p_r(v) = 0.5 * (pi_r(v) - pi_f(v)) + 0.5 * pi_f(s)
//! ```
//!
//! `pi_f(v)` estimates the distance from `v` to `t` and `pi_r(v)` the
//! distance from `s` to `v`, which for a symmetric heuristic is the estimate
//! from `v` to `s`.
//!
//! With this, a shortest path in reduced weights is a shortest path in real
//! weights and the search may stop as soon as the two queue tops together
//! are no shorter than the best meeting found so far.

use std::collections::BinaryHeap;

use ahash::{HashMap, HashMapExt};
use tracing::{debug, trace};

use super::{
    astar::reduced_weight, cancellable::Cancellable, context::reconstruct_path, queue::State,
    AStarAlgorithm, Path, SearchOutcome,
};
use crate::graphs::{AStarWeight, GraphEdge, WeightedGraph};

/// Search state of one direction.
struct BidirectionalStepContext<'a, G: WeightedGraph> {
    forward: bool,
    start: &'a G::Vertex,
    finish: &'a G::Vertex,
    graph: &'a G,
    pi_rt: G::Weight,
    pi_fs: G::Weight,

    queue: BinaryHeap<State<G::Vertex, G::Weight>>,
    best_distance: HashMap<G::Vertex, G::Weight>,
    parent: HashMap<G::Vertex, G::Vertex>,
    /// Vertex of this side of the best meeting found so far.
    best_vertex: G::Vertex,
    /// Potential of the vertex this direction started from.
    p_s: G::Weight,
}

impl<'a, G: WeightedGraph> BidirectionalStepContext<'a, G> {
    fn new(forward: bool, start: &'a G::Vertex, finish: &'a G::Vertex, graph: &'a G) -> Self {
        let origin = if forward { start } else { finish };
        let mut context = BidirectionalStepContext {
            forward,
            start,
            finish,
            graph,
            pi_rt: graph.heuristic_cost_estimate(start, finish),
            pi_fs: graph.heuristic_cost_estimate(start, finish),
            queue: BinaryHeap::new(),
            best_distance: HashMap::new(),
            parent: HashMap::new(),
            best_vertex: origin.clone(),
            p_s: G::Weight::ZERO,
        };
        context.p_s = context.consistent_heuristic(origin);
        context
            .best_distance
            .insert(origin.clone(), G::Weight::ZERO);
        context
            .queue
            .push(State::new(origin.clone(), G::Weight::ZERO));
        context
    }

    /// Best distance of the vertex on top of the queue. Stale entries may sit
    /// on top, their vertex has a distance at most as large.
    fn top_distance(&self) -> G::Weight {
        let top = self
            .queue
            .peek()
            .expect("top_distance is only asked for non-empty queues");
        self.best_distance[&top.vertex]
    }

    fn consistent_heuristic(&self, vertex: &G::Vertex) -> G::Weight {
        let pi_f = self.graph.heuristic_cost_estimate(vertex, self.finish);
        let pi_r = self.graph.heuristic_cost_estimate(self.start, vertex);
        if self.forward {
            (pi_f - pi_r + self.pi_rt).half()
        } else {
            (pi_r - pi_f + self.pi_fs).half()
        }
    }

    fn adjacency(&self, vertex: &G::Vertex, edges: &mut Vec<G::Edge>) {
        if self.forward {
            self.graph.outgoing_edges(vertex, edges)
        } else {
            self.graph.incoming_edges(vertex, edges)
        }
    }

    /// The vertex passed to the observer next to every settled vertex.
    fn reference_vertex(&self) -> &'a G::Vertex {
        if self.forward {
            self.finish
        } else {
            self.start
        }
    }
}

/// Best path through the meeting area found so far.
struct Meeting<W> {
    reduced_length: W,
    real_length: W,
}

impl AStarAlgorithm {
    /// Shortest path from `start` to `finish` searching from both ends.
    ///
    /// The heuristic has to be usable in both directions, see the module
    /// documentation. `on_visited_vertex` is called with every settled vertex
    /// and the end the current direction is heading to.
    pub fn find_path_bidirectional<G, Observer>(
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
        let mut poll = self.poll(cancellable);
        if start == finish {
            if poll.is_cancelled() {
                return SearchOutcome::Cancelled;
            }
            on_visited_vertex(start, finish);
            return SearchOutcome::Found(Path {
                vertices: vec![start.clone()],
                distance: G::Weight::ZERO,
            });
        }

        let mut forward = BidirectionalStepContext::new(true, start, finish, graph);
        let mut backward = BidirectionalStepContext::new(false, start, finish, graph);
        let mut forward_is_current = true;

        let mut best_meeting: Option<Meeting<G::Weight>> = None;
        let mut edges = Vec::new();
        let mut steps = 0u32;

        // Once one queue runs dry every vertex of its side is settled, any
        // meeting found by then is optimal and no new one can show up.
        while !forward.queue.is_empty() && !backward.queue.is_empty() {
            steps = steps.wrapping_add(1);

            if poll.is_cancelled() {
                debug!(steps, "bidirectional search cancelled");
                return SearchOutcome::Cancelled;
            }

            if steps % self.queue_switch_period == 0 {
                forward_is_current = !forward_is_current;
                trace!(steps, forward_is_current, "switching search direction");
            }

            let (cur, nxt) = if forward_is_current {
                (&mut forward, &mut backward)
            } else {
                (&mut backward, &mut forward)
            };

            // Every path found later consists of a part of each frontier, in
            // reduced lengths it can not be shorter than the two tops.
            // Reduced lengths are compared rather than real ones because
            // states with equal reduced length may have different real
            // lengths.
            if let Some(meeting) = &best_meeting {
                if cur.top_distance() + nxt.top_distance()
                    >= meeting.reduced_length - G::Weight::EPSILON
                {
                    break;
                }
            }

            let Some(State { vertex, distance }) = cur.queue.pop() else {
                break;
            };

            if distance > cur.best_distance[&vertex] {
                continue;
            }

            on_visited_vertex(&vertex, cur.reference_vertex());

            let p_v = cur.consistent_heuristic(&vertex);
            cur.adjacency(&vertex, &mut edges);
            for edge in edges.iter() {
                let head = edge.target();
                if *head == vertex {
                    continue;
                }

                let length = edge.weight();
                let p_w = cur.consistent_heuristic(head);
                let new_reduced_distance = distance + reduced_weight(length, p_v, p_w);

                if let Some(&current) = cur.best_distance.get(head) {
                    if new_reduced_distance >= current - G::Weight::EPSILON {
                        continue;
                    }
                }

                if let Some(&distance_w) = nxt.best_distance.get(head) {
                    // Reduced length of the path through this edge: its two
                    // parts measured in the reduced forward and backward
                    // graphs.
                    let reduced_length = new_reduced_distance + distance_w;
                    // No epsilon here, overshooting slightly is fine.
                    let improves = best_meeting
                        .as_ref()
                        .map_or(true, |meeting| meeting.reduced_length > reduced_length);
                    if improves {
                        let real_length = distance + length + distance_w + (cur.p_s - p_v)
                            + (nxt.p_s - nxt.consistent_heuristic(head));
                        best_meeting = Some(Meeting {
                            reduced_length,
                            real_length,
                        });
                        cur.best_vertex = vertex.clone();
                        nxt.best_vertex = head.clone();
                    }
                }

                cur.best_distance.insert(head.clone(), new_reduced_distance);
                cur.parent.insert(head.clone(), vertex.clone());
                cur.queue.push(State::new(head.clone(), new_reduced_distance));
            }
        }

        let outcome = match best_meeting {
            Some(meeting) => {
                let mut vertices = reconstruct_path(&forward.best_vertex, &forward.parent);
                let backward_part = reconstruct_path(&backward.best_vertex, &backward.parent);
                vertices.extend(backward_part.into_iter().rev());
                SearchOutcome::Found(Path {
                    vertices,
                    distance: meeting.real_length,
                })
            }
            None => SearchOutcome::NoPath,
        };

        debug!(
            result = %outcome.code(),
            steps,
            forward_reached = forward.best_distance.len(),
            backward_reached = backward.best_distance.len(),
            "bidirectional search finished"
        );
        outcome
    }
}
