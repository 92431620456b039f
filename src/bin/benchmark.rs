use std::{fs::File, io::BufWriter, path::PathBuf, time::Instant};

use anyhow::Context as _;
use astar_routing::{
    graphs::{
        graph_functions::{random_geometric_graph, validate_path, weights_agree},
        path::{ShortestPathRequest, ShortestPathTestCase, ShortestPathTestTimingResult},
        reversible_graph::ReversibleGraph,
    },
    heuristics::{
        euclidean::EuclideanHeuristic, landmarks::Landmarks, none_heuristic::NoneHeuristic,
        DistanceHeuristic, GuidedGraph,
    },
    search::{AStarAlgorithm, NeverCancelled},
    utility::{get_progressbar, init_tracing},
};
use clap::{Parser, ValueEnum};
use indicatif::ParallelProgressIterator;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{info, warn};

/// Runs random queries with unidirectional and bidirectional A* on a random
/// geometric graph and checks that both agree.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of vertices of the generated graph.
    #[arg(short = 'n', long, default_value_t = 10_000)]
    number_of_vertices: u32,
    /// Random arcs leaving every vertex in addition to the ring.
    #[arg(short, long, default_value_t = 2)]
    chords_per_vertex: u32,
    /// Number of queries to run.
    #[arg(short, long, default_value_t = 1_000)]
    queries: u32,
    /// Seed for graph and queries.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    /// Heuristic steering the searches.
    #[arg(long, value_enum, default_value = "euclidean")]
    heuristic: HeuristicKind,
    /// Number of landmarks for the landmark heuristic.
    #[arg(long, default_value_t = 16)]
    landmarks: u32,
    /// Steps after which the bidirectional search switches direction.
    #[arg(long, default_value_t = 128)]
    queue_switch_period: u32,
    /// Where to write the timings as json.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, ValueEnum, Clone, Copy)]
enum HeuristicKind {
    None,
    Euclidean,
    Landmarks,
}

fn build_heuristic<'a>(
    graph: &'a ReversibleGraph,
    args: &Args,
    rng: &mut StdRng,
) -> anyhow::Result<Box<dyn DistanceHeuristic + 'a>> {
    Ok(match args.heuristic {
        HeuristicKind::None => Box::new(NoneHeuristic {}),
        HeuristicKind::Euclidean => Box::new(EuclideanHeuristic::new(graph)?),
        HeuristicKind::Landmarks => Box::new(Landmarks::random(graph, args.landmarks, rng)),
    })
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
    info!(
        vertices = graph.number_of_vertices(),
        edges = graph.number_of_edges(),
        "generated graph"
    );

    let heuristic = build_heuristic(&graph, &args, &mut rng)?;
    let guided_graph = GuidedGraph::new(&graph, heuristic);
    let algorithm = AStarAlgorithm::new().with_queue_switch_period(args.queue_switch_period);

    let requests: Vec<ShortestPathRequest> = (0..args.queries)
        .map(|_| {
            ShortestPathRequest::new(
                rng.gen_range(0..args.number_of_vertices),
                rng.gen_range(0..args.number_of_vertices),
            )
        })
        .collect();

    let results: Vec<(ShortestPathTestTimingResult, Vec<String>)> = requests
        .par_iter()
        .progress_with(get_progressbar("Running queries", requests.len() as u64))
        .map(|request| {
            let (source, target) = (request.source(), request.target());
            let mut problems = Vec::new();

            let start = Instant::now();
            let unidirectional =
                algorithm.find_path(&guided_graph, &source, &target, &NeverCancelled, |_, _| {});
            let unidirectional_seconds = start.elapsed().as_secs_f64();

            let start = Instant::now();
            let bidirectional = algorithm.find_path_bidirectional(
                &guided_graph,
                &source,
                &target,
                &NeverCancelled,
                |_, _| {},
            );
            let bidirectional_seconds = start.elapsed().as_secs_f64();

            let outcomes = [
                ("unidirectional", &unidirectional),
                ("bidirectional", &bidirectional),
            ];
            for (name, outcome) in outcomes {
                if let Some(path) = outcome.path() {
                    if let Err(problem) = validate_path(&graph, &source, &target, path) {
                        problems.push(format!("{}: {}", name, problem));
                    }
                }
            }

            let weight = unidirectional.distance();
            match (weight, bidirectional.distance()) {
                (Some(a), Some(b)) if !weights_agree(a, b) => {
                    problems.push(format!("distances differ: {} vs {}", a, b))
                }
                (Some(_), None) | (None, Some(_)) => problems.push(format!(
                    "results differ: {} vs {}",
                    unidirectional.code(),
                    bidirectional.code()
                )),
                _ => {}
            }

            let timing = ShortestPathTestTimingResult {
                test_case: ShortestPathTestCase {
                    request: *request,
                    weight,
                },
                unidirectional_seconds,
                bidirectional_seconds,
            };
            (timing, problems)
        })
        .collect();

    let mut number_of_problems = 0;
    for (timing, problems) in results.iter() {
        for problem in problems {
            number_of_problems += 1;
            warn!(request = ?timing.test_case.request, "{}", problem);
        }
    }

    let timings: Vec<ShortestPathTestTimingResult> =
        results.into_iter().map(|(timing, _)| timing).collect();
    let average = |seconds: fn(&ShortestPathTestTimingResult) -> f64| {
        timings.iter().map(seconds).sum::<f64>() / timings.len().max(1) as f64
    };
    info!(
        unidirectional_ms = average(|timing| timing.unidirectional_seconds) * 1_000.0,
        bidirectional_ms = average(|timing| timing.bidirectional_seconds) * 1_000.0,
        number_of_problems,
        "average query times"
    );

    if let Some(output) = &args.output {
        let writer = BufWriter::new(
            File::create(output).with_context(|| format!("creating {}", output.display()))?,
        );
        serde_json::to_writer_pretty(writer, &timings)?;
        info!(path = %output.display(), "wrote timings");
    }

    Ok(())
}
