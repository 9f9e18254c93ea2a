use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use sparsegraph_core::{
    bounded_bfs_observed, induced_edges, load_path, LoadOptions, NodeId, SparseGraph,
    TracingObserver,
};

mod bench;
mod output;

use output::Printer;

#[derive(Parser)]
#[command(
    name = "sparsegraph",
    about = "Load a directed edge list into CSR form and query it"
)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = Format::Table)]
    format: Format,

    /// Refuse to build graphs whose CSR arrays would exceed this many MB
    #[arg(long, global = true, env = "SPARSEGRAPH_MAX_MEMORY_MB")]
    max_memory_mb: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Node and edge counts, memory and degree summary
    Stats {
        /// Edge-list file ("origin destination" per line)
        file: PathBuf,
    },
    /// Out-degree of a node
    Degree {
        file: PathBuf,
        #[arg(allow_negative_numbers = true)]
        node: i64,
    },
    /// Out-neighbors of a node, in file order
    Neighbors {
        file: PathBuf,
        #[arg(allow_negative_numbers = true)]
        node: i64,
    },
    /// Node with the highest out-degree
    Hub { file: PathBuf },
    /// Nodes ranked by out-degree
    Top {
        file: PathBuf,
        /// How many to show; 0 for all
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },
    /// Nodes reachable from START within DEPTH hops
    Bfs {
        file: PathBuf,
        #[arg(allow_negative_numbers = true)]
        start: i64,
        #[arg(allow_negative_numbers = true)]
        depth: i64,
        /// Also print the edges among the reached nodes
        #[arg(long)]
        edges: bool,
    },
    /// Build synthetic graphs and time construction and BFS
    Bench {
        #[arg(value_enum, default_value_t = bench::Mode::All)]
        mode: bench::Mode,
        #[arg(long, default_value_t = 1_000_000)]
        nodes: u32,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let options = load_options(cli.max_memory_mb);
    let printer = Printer::new(cli.format);

    match cli.command {
        Commands::Stats { file } => {
            let graph = load(&file, &options)?;
            printer.stats(&graph.stats());
        }
        Commands::Degree { file, node } => {
            let graph = load(&file, &options)?;
            let degree = to_node(node).map_or(0, |n| graph.degree(n));
            printer.degree(node, degree);
        }
        Commands::Neighbors { file, node } => {
            let graph = load(&file, &options)?;
            let neighbors = to_node(node).map_or(&[][..], |n| graph.neighbors(n));
            printer.neighbors(node, neighbors);
        }
        Commands::Hub { file } => {
            let graph = load(&file, &options)?;
            let hub = graph.max_degree_node();
            printer.hub(hub, graph.degree(hub));
        }
        Commands::Top { file, count } => {
            let graph = load(&file, &options)?;
            printer.top(&graph.top_degree_nodes(count));
        }
        Commands::Bfs {
            file,
            start,
            depth,
            edges,
        } => {
            let graph = load(&file, &options)?;
            let nodes = bfs_signed(&graph, start, depth);
            let subgraph = edges.then(|| {
                let members: Vec<NodeId> = nodes.iter().filter_map(|&n| to_node(n)).collect();
                induced_edges(&graph, &members)
            });
            printer.bfs(start, depth, &nodes, subgraph.as_deref());
        }
        Commands::Bench { mode, nodes } => bench::run(mode, nodes, &options)?,
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_options(max_memory_mb: Option<usize>) -> LoadOptions {
    let options = LoadOptions::new();
    match max_memory_mb {
        Some(limit) => options.with_max_memory_mb(limit),
        None => options,
    }
}

fn load(file: &Path, options: &LoadOptions) -> Result<SparseGraph> {
    load_path(file, options, &TracingObserver)
        .with_context(|| format!("failed to load graph from {}", file.display()))
}

/// Map a signed id from the command line onto the id space.
/// Negative or oversized ids have no row and answer as empty.
fn to_node(id: i64) -> Option<NodeId> {
    NodeId::try_from(id).ok()
}

/// Bounded BFS from a signed start id.
///
/// A start with no place in the id space cannot expand, so the result is
/// just that id (or nothing for a negative depth).
fn bfs_signed(graph: &SparseGraph, start: i64, depth: i64) -> Vec<i64> {
    match to_node(start) {
        Some(node) => bounded_bfs_observed(graph, node, depth, &TracingObserver)
            .into_iter()
            .map(i64::from)
            .collect(),
        None if depth < 0 => Vec::new(),
        None => vec![start],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bfs_with_negative_depth() {
        let cli = Cli::try_parse_from(["sparsegraph", "bfs", "edges.txt", "0", "-1"]).unwrap();
        match cli.command {
            Commands::Bfs { start, depth, edges, .. } => {
                assert_eq!(start, 0);
                assert_eq!(depth, -1);
                assert!(!edges);
            }
            _ => panic!("expected bfs"),
        }
    }

    #[test]
    fn test_parse_bfs_with_negative_start() {
        let cli = Cli::try_parse_from(["sparsegraph", "bfs", "g.txt", "-1", "2"]).unwrap();
        match cli.command {
            Commands::Bfs { start, depth, .. } => {
                assert_eq!(start, -1);
                assert_eq!(depth, 2);
            }
            _ => panic!("expected bfs"),
        }
    }

    #[test]
    fn test_bfs_signed() {
        let g = SparseGraph::from_edges([(0, 1), (1, 2), (2, 3)]);
        assert_eq!(bfs_signed(&g, 0, 2), vec![0, 1, 2]);
        assert_eq!(bfs_signed(&g, -1, 2), vec![-1]);
        assert_eq!(bfs_signed(&g, -1, -1), Vec::<i64>::new());
        assert_eq!(bfs_signed(&g, 1 << 40, 3), vec![1 << 40]);
        assert_eq!(bfs_signed(&g, 0, -1), Vec::<i64>::new());
    }

    #[test]
    fn test_parse_global_format() {
        let cli = Cli::try_parse_from(["sparsegraph", "stats", "g.txt", "--format", "json"]).unwrap();
        assert_eq!(cli.format, Format::Json);
    }

    #[test]
    fn test_to_node() {
        assert_eq!(to_node(5), Some(5));
        assert_eq!(to_node(-1), None);
        assert_eq!(to_node(i64::from(u32::MAX) + 1), None);
    }

    #[test]
    fn test_load_options() {
        assert_eq!(load_options(None).max_memory_mb, None);
        assert_eq!(load_options(Some(32)).max_memory_mb, Some(32));
    }
}
