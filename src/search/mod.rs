use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graphs::AStarWeight;

pub mod adjust_route;
pub mod astar;
pub mod bidirectional;
pub mod cancellable;
pub mod context;
pub mod dijkstra;
pub mod queue;

pub use astar::AStarAlgorithm;
pub use cancellable::{Cancellable, CancellationFlag, Deadline, NeverCancelled};
pub use context::Context;

/// Vertices from start to goal, both inclusive, and the real length of the
/// path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path<V, W> {
    pub vertices: Vec<V>,
    pub distance: W,
}

impl<V, W: AStarWeight> Default for Path<V, W> {
    fn default() -> Self {
        Path {
            vertices: Vec::new(),
            distance: W::ZERO,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultCode {
    Ok,
    NoPath,
    Cancelled,
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultCode::Ok => write!(f, "OK"),
            ResultCode::NoPath => write!(f, "NoPath"),
            ResultCode::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Outcome of a search. Running out of graph and being cancelled are
/// regular outcomes, not errors.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome<V, W> {
    Found(Path<V, W>),
    NoPath,
    Cancelled,
}

impl<V, W: AStarWeight> SearchOutcome<V, W> {
    pub fn code(&self) -> ResultCode {
        match self {
            SearchOutcome::Found(_) => ResultCode::Ok,
            SearchOutcome::NoPath => ResultCode::NoPath,
            SearchOutcome::Cancelled => ResultCode::Cancelled,
        }
    }

    pub fn path(&self) -> Option<&Path<V, W>> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path<V, W>> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    /// The found path, or an empty path of zero length.
    pub fn into_path_or_default(self) -> Path<V, W> {
        self.into_path().unwrap_or_default()
    }

    pub fn distance(&self) -> Option<W> {
        self.path().map(|path| path.distance)
    }
}
