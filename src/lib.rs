//! Shortest paths on weighted directed graphs: a Dijkstra style wave engine,
//! unidirectional and bidirectional A* on top of it, and the repair of a
//! previously computed route after the traveller left it.

pub mod graphs;
pub mod heuristics;
pub mod search;
pub mod utility;
