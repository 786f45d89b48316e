//! algoscope binary
//!
//! Runs one visualization in the terminal.
//!
//! Usage:
//!   algoscope list
//!   algoscope <algorithm> [size] [text]
//!
//! Live algorithms (sorts, linear search, DFS, linked lists) print frames as
//! they are produced. Dijkstra, Huffman coding and Prim's MST are recorded
//! first and then played back on a timer.

mod config;
mod driver;
mod error;
mod render;

use algoscope_engine::{Generated, LiveController};
use algoscope_live::{
    catalog, default_target, depth_first_search, linear_search, lookup, resolve, ListView,
    LiveAlgorithm,
};
use algoscope_model::{
    chain_graph, random_connected_graph, random_items, random_linked_list, ArrayConfig, Graph,
    GraphConfig, Item, NodeId,
};
use algoscope_steplog::{generate_dijkstra, generate_huffman, generate_prim, StepAlgorithm};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, Command, Invocation};
use crate::driver::{drive_live, drive_playback, Printer};
use crate::error::Result;

const DEFAULT_ARRAY_SIZE: usize = 20;
const DEFAULT_GRAPH_SIZE: usize = 8;
const DEFAULT_LIST_SIZE: usize = 7;
const DEFAULT_TEXT: &str = "BEEP BOOP";

fn print_usage() {
    eprintln!("algoscope - step through classic algorithms in the terminal");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  algoscope list                         List algorithms");
    eprintln!("  algoscope <algorithm> [size] [text]    Run one algorithm");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  algoscope quick-sort 16");
    eprintln!("  algoscope linear-search 20 57");
    eprintln!("  algoscope huffman \"BEEP BOOP\"");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ALGOSCOPE_DELAY_MS  Pause after each live frame (default: 30)");
    eprintln!("  ALGOSCOPE_SPEED_MS  Playback tick interval (default: 1000)");
    eprintln!("  ALGOSCOPE_SIZE      Input size");
    eprintln!("  ALGOSCOPE_SEED      Seed for generated inputs (default: 42)");
    eprintln!("  ALGOSCOPE_FORMAT    text or json (default: text)");
}

fn print_catalog() {
    for info in catalog() {
        let status = if info.implementation.is_some() { "" } else { "  (unavailable)" };
        println!(
            "{:<22} {:<22} {:<11} {}{}",
            info.name,
            info.slug,
            info.category.to_string(),
            info.complexity.average,
            status
        );
    }
    for algorithm in StepAlgorithm::ALL {
        println!("{:<22} {:<22} {:<11} step log", algorithm.name(), algorithm.slug(), "Graph");
    }
}

fn array(config: &AppConfig, size: Option<usize>) -> Vec<Item> {
    let array = ArrayConfig::default()
        .with_size(size.unwrap_or(DEFAULT_ARRAY_SIZE))
        .with_seed(config.seed);
    random_items(&array)
}

fn graph_config(config: &AppConfig, size: Option<usize>, weighted: bool) -> GraphConfig {
    let base = if weighted { GraphConfig::weighted() } else { GraphConfig::default() };
    base.with_nodes(size.unwrap_or(DEFAULT_GRAPH_SIZE)).with_seed(config.seed)
}

async fn run_live(config: &AppConfig, invocation: &Invocation, printer: &Printer) -> Result<()> {
    let mut controller = LiveController::new();
    let Some(algorithm) = resolve(&invocation.algorithm) else {
        controller.mark_unavailable().await?;
        match lookup(&invocation.algorithm) {
            Some(info) => println!("{} has no visualization yet ({})", info.name, controller.state()),
            None => println!("Unknown algorithm {:?} ({})", invocation.algorithm, controller.state()),
        }
        return Ok(());
    };

    let size = invocation.size.or(config.size);
    let live = config.live();
    info!(algorithm = ?algorithm, delay_ms = live.delay.as_millis() as u64, "starting live run");

    let completed = match algorithm {
        LiveAlgorithm::Sort(sort) => {
            let items = array(config, size);
            drive_live::<Vec<Item>, _, _>(&mut controller, live, printer, move |mut inst| async move {
                let mut items = items;
                sort.run(&mut items, &mut inst).await
            })
            .await?
        }
        LiveAlgorithm::LinearSearch => {
            let items = array(config, size);
            let target = invocation
                .text
                .as_deref()
                .and_then(|t| t.trim().parse().ok())
                .or_else(|| default_target(&items))
                .unwrap_or_default();
            drive_live::<Vec<Item>, _, _>(&mut controller, live, printer, move |mut inst| async move {
                let mut items = items;
                linear_search(&mut items, target, &mut inst).await
            })
            .await?
        }
        LiveAlgorithm::DepthFirstSearch => {
            let graph = random_connected_graph(&graph_config(config, size, false))?;
            drive_live::<Graph, _, _>(&mut controller, live, printer, move |mut inst| async move {
                let mut graph = graph;
                depth_first_search(&mut graph, NodeId(0), &mut inst).await
            })
            .await?
        }
        LiveAlgorithm::List(list) => {
            let view = ListView::new(random_linked_list(size.unwrap_or(DEFAULT_LIST_SIZE), config.seed));
            drive_live::<ListView, _, _>(&mut controller, live, printer, move |mut inst| async move {
                let mut view = view;
                list.run(&mut view, &mut inst).await
            })
            .await?
        }
    };

    info!(completed, state = %controller.state(), "live run finished");
    Ok(())
}

async fn run_step_log(
    config: &AppConfig,
    algorithm: StepAlgorithm,
    invocation: &Invocation,
    printer: &Printer,
) -> Result<()> {
    let size = invocation.size.or(config.size);
    let playback = config.playback();

    let status = match algorithm {
        StepAlgorithm::Dijkstra => {
            let graph = chain_graph(&graph_config(config, size, true))?;
            let Generated { steps, aux } = generate_dijkstra(&graph, NodeId(0));
            info!(steps = steps.len(), "dijkstra log recorded");
            let status = drive_playback(steps, playback, printer).await?;
            let lines: Vec<String> = graph
                .nodes()
                .iter()
                .map(|node| match aux.path_to(node.id) {
                    Some(path) => {
                        let labels: Vec<String> = path.iter().map(|id| graph.label(*id)).collect();
                        format!("{}: {} via {}", node.label, aux.distance_to(node.id).unwrap_or_default(), labels.join(" -> "))
                    }
                    None => format!("{}: unreachable", node.label),
                })
                .collect();
            printer.summary(&lines.join("\n"), &aux)?;
            status
        }
        StepAlgorithm::Huffman => {
            let text = invocation.text.clone().unwrap_or_else(|| DEFAULT_TEXT.to_string());
            let Generated { steps, aux } = generate_huffman(&text);
            info!(steps = steps.len(), "huffman log recorded");
            let status = drive_playback(steps, playback, printer).await?;
            let mut lines: Vec<String> = aux
                .codes
                .iter()
                .map(|(symbol, code)| format!("{symbol:?}: {code}"))
                .collect();
            lines.push(format!("{} bits vs {} bits uncompressed", aux.encoded_bits(), text.chars().count() * 8));
            printer.summary(&lines.join("\n"), &aux)?;
            status
        }
        StepAlgorithm::Prim => {
            let graph = random_connected_graph(&graph_config(config, size, true))?;
            let Generated { steps, aux } = generate_prim(&graph);
            info!(steps = steps.len(), "prim log recorded");
            let status = drive_playback(steps, playback, printer).await?;
            let edges: Vec<String> = aux
                .edges
                .iter()
                .map(|e| format!("{}-{} ({})", graph.label(e.from), graph.label(e.to), e.weight))
                .collect();
            let text = format!("MST: {} | total weight {}", edges.join(", "), aux.total_weight);
            printer.summary(&text, &aux)?;
            status
        }
    };

    info!(state = %status.state, cursor = ?status.cursor, total = status.total_steps, "playback finished");
    Ok(())
}

async fn run(config: &AppConfig, invocation: Invocation) -> Result<()> {
    let printer = Printer::new(config.format);
    match StepAlgorithm::lookup(&invocation.algorithm) {
        Some(algorithm) => run_step_log(config, algorithm, &invocation, &printer).await,
        None => run_live(config, &invocation, &printer).await,
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "algoscope=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };
    let config = AppConfig::from_env()?;

    match command {
        Command::Help => print_usage(),
        Command::List => print_catalog(),
        Command::Run(invocation) => {
            if let Err(e) = run(&config, invocation).await {
                warn!(error = %e, "run failed");
                return Err(e.into());
            }
        }
    }
    Ok(())
}
