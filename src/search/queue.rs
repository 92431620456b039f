use std::cmp::Ordering;

use crate::graphs::AStarWeight;

/// Entry of the search priority queues. Several entries may exist for the
/// same vertex; only the one matching the best known distance is expanded.
#[derive(Clone, Debug)]
pub struct State<V, W> {
    pub vertex: V,
    pub distance: W,
}

impl<V, W> State<V, W> {
    pub fn new(vertex: V, distance: W) -> Self {
        State { vertex, distance }
    }
}

// `BinaryHeap` is a max-heap, flip the ordering on distances to pop the
// closest vertex first. Ties are broken on the vertex so that `Ord` agrees
// with `PartialEq`.
impl<V: Ord, W: AStarWeight> Ord for State<V, W> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

impl<V: Ord, W: AStarWeight> PartialOrd for State<V, W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Ord, W: AStarWeight> PartialEq for State<V, W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<V: Ord, W: AStarWeight> Eq for State<V, W> {}
