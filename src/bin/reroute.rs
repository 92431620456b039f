use std::time::{Duration, Instant};

use anyhow::{bail, Context as _};
use astar_routing::{
    graphs::{
        graph_functions::{random_geometric_graph, route_edges, validate_path},
        VertexId,
    },
    heuristics::{euclidean::EuclideanHeuristic, GuidedGraph},
    search::{AStarAlgorithm, Deadline, SearchOutcome},
    utility::{get_progressspinner, init_tracing, spinner_observer},
};
use clap::Parser;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::info;

/// Computes a route, lets the traveller leave it and repairs the route
/// locally.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of vertices of the generated graph.
    #[arg(short = 'n', long, default_value_t = 100_000)]
    number_of_vertices: u32,
    /// Random arcs leaving every vertex in addition to the ring.
    #[arg(short, long, default_value_t = 2)]
    chords_per_vertex: u32,
    /// Seed for graph, route and deviation.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    /// Radius of the repair search, in edge weight units.
    #[arg(short, long, default_value_t = 100.0)]
    adjust_limit: f64,
    /// Give up on any single search after this many milliseconds.
    #[arg(short, long, default_value_t = 10_000)]
    timeout_ms: u64,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    let graph = random_geometric_graph(
        &mut rng,
        args.number_of_vertices,
        args.chords_per_vertex,
        1_000.0,
    )?;
    let guided_graph = GuidedGraph::new(&graph, EuclideanHeuristic::new(&graph)?);
    let algorithm = AStarAlgorithm::new();
    let timeout = Duration::from_millis(args.timeout_ms);

    let source: VertexId = rng.gen_range(0..args.number_of_vertices);
    let target: VertexId = rng.gen_range(0..args.number_of_vertices);

    let spinner = get_progressspinner("Searching route");
    let route = match algorithm.find_path_bidirectional(
        &guided_graph,
        &source,
        &target,
        &Deadline::after(timeout),
        spinner_observer(&spinner),
    ) {
        SearchOutcome::Found(route) => route,
        outcome => bail!("no route from {} to {}: {}", source, target, outcome.code()),
    };
    spinner.finish_and_clear();
    info!(
        source,
        target,
        distance = route.distance,
        vertices = route.vertices.len(),
        "initial route"
    );
    if route.vertices.len() < 2 {
        bail!("route from {} to {} has no edges", source, target);
    }

    // The traveller takes a wrong turn somewhere on the first half of the
    // route and ends up at a neighbour that is not the next route vertex.
    let deviation_index = rng.gen_range(0..route.vertices.len().div_ceil(2));
    let deviation_tail = route.vertices[deviation_index];
    let next_on_route = route.vertices.get(deviation_index + 1).copied();
    let detours: Vec<VertexId> = graph
        .out_edges(deviation_tail)
        .map(|edge| edge.head())
        .filter(|&head| Some(head) != next_on_route && head != deviation_tail)
        .collect();
    let deviation = *detours
        .choose(&mut rng)
        .with_context(|| format!("vertex {} has no way off the route", deviation_tail))?;

    let previous_route =
        route_edges(&graph, &route.vertices).context("route uses a non-existing edge")?;

    let start = Instant::now();
    let adjusted = algorithm.adjust_route(
        &graph,
        &deviation,
        &previous_route,
        args.adjust_limit,
        &Deadline::after(timeout),
        |_, _| {},
    );
    let adjust_time = start.elapsed();

    let start = Instant::now();
    let recomputed = algorithm.find_path_bidirectional(
        &guided_graph,
        &deviation,
        &target,
        &Deadline::after(timeout),
        |_, _| {},
    );
    let recompute_time = start.elapsed();

    if let SearchOutcome::Found(path) = &adjusted {
        validate_path(&graph, &deviation, &target, path).map_err(anyhow::Error::msg)?;
    }

    info!(
        deviation_tail,
        deviation,
        adjusted = %adjusted.code(),
        adjusted_distance = ?adjusted.distance(),
        ?adjust_time,
        recomputed = %recomputed.code(),
        recomputed_distance = ?recomputed.distance(),
        ?recompute_time,
        "rerouted"
    );

    Ok(())
}
