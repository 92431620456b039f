use serde::{Deserialize, Serialize};

use super::{GraphEdge, VertexId, Weight};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct DirectedWeightedEdge {
    tail: VertexId,
    head: VertexId,
    weight: Weight,
}

impl DirectedWeightedEdge {
    pub fn new(tail: VertexId, head: VertexId, weight: Weight) -> DirectedWeightedEdge {
        DirectedWeightedEdge { tail, head, weight }
    }

    pub fn tail(&self) -> VertexId {
        self.tail
    }

    pub fn head(&self) -> VertexId {
        self.head
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn reversed(&self) -> DirectedWeightedEdge {
        DirectedWeightedEdge {
            head: self.tail,
            tail: self.head,
            weight: self.weight,
        }
    }

    pub fn tailless(&self) -> DirectedTaillessWeightedEdge {
        DirectedTaillessWeightedEdge {
            head: self.head,
            weight: self.weight,
        }
    }

    pub fn headless(&self) -> DirectedTaillessWeightedEdge {
        DirectedTaillessWeightedEdge {
            head: self.tail,
            weight: self.weight,
        }
    }
}

/// Adjacency list entry. Stored in the out list it points at the head of
/// the arc, stored in the in list it points at the tail.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DirectedTaillessWeightedEdge {
    head: VertexId,
    weight: Weight,
}

impl DirectedTaillessWeightedEdge {
    pub fn new(head: VertexId, weight: Weight) -> DirectedTaillessWeightedEdge {
        DirectedTaillessWeightedEdge { head, weight }
    }

    pub fn head(&self) -> VertexId {
        self.head
    }

    pub fn set_tail(&self, tail: VertexId) -> DirectedWeightedEdge {
        DirectedWeightedEdge::new(tail, self.head, self.weight)
    }
}

impl GraphEdge for DirectedTaillessWeightedEdge {
    type Vertex = VertexId;
    type Weight = Weight;

    fn target(&self) -> &VertexId {
        &self.head
    }

    fn weight(&self) -> Weight {
        self.weight
    }
}
