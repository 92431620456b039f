use indicatif::ParallelProgressIterator;
use itertools::Itertools;
use rand::{seq::IteratorRandom, Rng};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::info;

use super::DistanceHeuristic;
use crate::{
    graphs::{reversible_graph::ReversibleGraph, AStarWeight, Reversed, VertexId, Weight},
    search::dijkstra::one_to_all,
    utility::get_progressbar,
};

/// ALT lower bounds from precomputed distances to and from a few landmarks.
///
/// The bounds are consistent on strongly connected graphs. Distances that
/// are unknown because a vertex can not reach or be reached by a landmark
/// contribute nothing.
pub struct Landmarks {
    pub landmarks: Vec<Landmark>,
}

impl Landmarks {
    pub fn new(graph: &ReversibleGraph, vertices: &[VertexId]) -> Landmarks {
        info!(
            number_of_landmarks = vertices.len(),
            number_of_vertices = graph.number_of_vertices(),
            "generating landmarks"
        );
        let landmarks = vertices
            .par_iter()
            .progress_with(get_progressbar(
                "Generating landmarks",
                vertices.len() as u64,
            ))
            .map(|&vertex| Landmark::new(graph, vertex))
            .collect();

        Landmarks { landmarks }
    }

    pub fn random<R: Rng>(
        graph: &ReversibleGraph,
        number_of_landmarks: u32,
        rng: &mut R,
    ) -> Landmarks {
        let vertices = graph
            .vertices()
            .choose_multiple(rng, number_of_landmarks as usize);
        Landmarks::new(graph, &vertices)
    }
}

impl DistanceHeuristic for Landmarks {
    fn lower_bound(&self, source: VertexId, target: VertexId) -> Weight {
        self.landmarks
            .iter()
            .map(|landmark| landmark.lower_bound(source, target))
            .fold(Weight::ZERO, Weight::max)
    }
}

pub struct Landmark {
    pub vertex: VertexId,
    /// Distance from the landmark to every vertex.
    pub distance_to: Vec<Weight>,
    /// Distance from every vertex to the landmark.
    pub distance_from: Vec<Weight>,
}

impl Landmark {
    pub fn new(graph: &ReversibleGraph, vertex: VertexId) -> Self {
        let out_graph_data = one_to_all(graph, &vertex);
        let distance_to = graph
            .vertices()
            .map(|vertex| out_graph_data.get_distance(&vertex))
            .collect_vec();

        let in_graph_data = one_to_all(&Reversed::new(graph), &vertex);
        let distance_from = graph
            .vertices()
            .map(|vertex| in_graph_data.get_distance(&vertex))
            .collect_vec();

        Landmark {
            vertex,
            distance_to,
            distance_from,
        }
    }
}

fn known(distance: Weight) -> Option<Weight> {
    (distance < Weight::MAX).then_some(distance)
}

impl DistanceHeuristic for Landmark {
    fn lower_bound(&self, source: VertexId, target: VertexId) -> Weight {
        let potential_forward = known(self.distance_to[target as usize])
            .zip(known(self.distance_to[source as usize]))
            .map_or(Weight::ZERO, |(to_target, to_source)| to_target - to_source);

        let potential_backward = known(self.distance_from[source as usize])
            .zip(known(self.distance_from[target as usize]))
            .map_or(Weight::ZERO, |(from_source, from_target)| {
                from_source - from_target
            });

        potential_forward.max(potential_backward).max(Weight::ZERO)
    }
}
