use std::hash::Hash;

use ahash::{HashMap, HashMapExt};

use crate::graphs::AStarWeight;

/// Distances and parents of a single wave propagation.
pub struct Context<V, W> {
    distances: HashMap<V, W>,
    parents: HashMap<V, V>,
}

impl<V, W> Default for Context<V, W> {
    fn default() -> Self {
        Context {
            distances: HashMap::new(),
            parents: HashMap::new(),
        }
    }
}

impl<V, W> Context<V, W>
where
    V: Clone + Eq + Hash,
    W: AStarWeight,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.distances.clear();
        self.parents.clear();
    }

    pub fn has_distance(&self, vertex: &V) -> bool {
        self.distances.contains_key(vertex)
    }

    /// Returns `W::MAX` for vertices that have not been reached.
    pub fn get_distance(&self, vertex: &V) -> W {
        self.distances.get(vertex).copied().unwrap_or(W::MAX)
    }

    pub fn set_distance(&mut self, vertex: V, distance: W) {
        self.distances.insert(vertex, distance);
    }

    pub fn set_parent(&mut self, vertex: V, parent: V) {
        self.parents.insert(vertex, parent);
    }

    pub fn number_of_reached_vertices(&self) -> usize {
        self.distances.len()
    }

    /// Vertices from the wave origin to `target`, both inclusive.
    pub fn reconstruct_path(&self, target: &V) -> Vec<V> {
        reconstruct_path(target, &self.parents)
    }
}

/// Follows `parents` from `target` until a vertex without parent is reached
/// and returns the chain in root to `target` order.
pub(crate) fn reconstruct_path<V: Clone + Eq + Hash>(target: &V, parents: &HashMap<V, V>) -> Vec<V> {
    let mut vertices = vec![target.clone()];
    let mut current = target;
    while let Some(parent) = parents.get(current) {
        vertices.push(parent.clone());
        current = parent;
    }
    vertices.reverse();
    vertices
}
