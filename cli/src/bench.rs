use std::time::Instant;

use anyhow::Result;
use clap::ValueEnum;
use tracing::info;

use sparsegraph_core::{bounded_bfs, GraphBuilder, LoadOptions, NodeId, SparseGraph};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Every generator in turn
    All,
    /// Fractal branching tree (deep paths)
    Lsystem,
    /// Preferential attachment via edge sampling (hub-and-spoke)
    Scalefree,
    /// Watts-Strogatz ring lattice + shortcuts
    Smallworld,
    /// Erdos-Renyi uniform random edges
    Random,
}

type Generator = fn(&mut GraphBuilder, u32);

pub fn run(mode: Mode, node_count: u32, options: &LoadOptions) -> Result<()> {
    let generators: Vec<(&str, Generator)> = match mode {
        Mode::Lsystem => vec![("L-system tree", gen_lsystem)],
        Mode::Scalefree => vec![("Scale-free (edge sampling)", gen_scale_free)],
        Mode::Smallworld => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        Mode::Random => vec![("Erdos-Renyi random", gen_random)],
        Mode::All => vec![
            ("L-system tree", gen_lsystem as Generator),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
        ],
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count, options)?;
    }
    Ok(())
}

fn run_benchmark(
    name: &str,
    generator: Generator,
    node_count: u32,
    options: &LoadOptions,
) -> Result<()> {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let mut builder = GraphBuilder::with_options(options.clone());
    generator(&mut builder, node_count);
    let graph = builder.build()?;
    let build_time = t.elapsed();
    println!(
        "Built in {:.2}s: {} nodes, {} edges, ~{:.0}MB",
        build_time.as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );
    info!(generator = name, elapsed_ms = build_time.as_secs_f64() * 1000.0, "build finished");

    let hub = graph.max_degree_node();
    println!("Hub: node {} with out-degree {}", hub, graph.degree(hub));

    println!();
    println!("{:>8} {:>12} {:>10}", "depth", "found", "time");
    println!("{:->8} {:->12} {:->10}", "", "", "");

    for depth in depth_schedule() {
        let t = Instant::now();
        let found = bounded_bfs(&graph, 0, depth).len();
        let elapsed = t.elapsed();
        println!(
            "{:>8} {:>12} {:>8.1}ms",
            depth,
            found,
            elapsed.as_secs_f64() * 1000.0
        );
        if reached_everything(&graph, found) {
            println!("{:>8} (entire graph reached)", "");
            break;
        }
    }
    println!();
    Ok(())
}

fn depth_schedule() -> [i64; 7] {
    [1, 2, 3, 5, 10, 20, 50]
}

fn reached_everything(graph: &SparseGraph, found: usize) -> bool {
    found >= graph.node_count()
}

// ---------------------------------------------------------------------------
// Generators: O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Each node spawns three children, breadth first, until `node_count`
/// ids are used. Depth grows with log3(n).
fn gen_lsystem(builder: &mut GraphBuilder, node_count: u32) {
    let branching = 3u32;
    let mut next_id: u32 = 1;
    let mut frontier: Vec<NodeId> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                builder.add_edge(parent, next_id);
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }
}

/// Preferential attachment by sampling an endpoint of a random existing
/// edge, so high-degree nodes are picked more often.
fn gen_scale_free(builder: &mut GraphBuilder, node_count: u32) {
    let edges_per_node = 10u32;
    let seed = 5u32.min(node_count);
    let mut rng = FastRng::new(12345);
    let mut endpoints: Vec<NodeId> = Vec::with_capacity(node_count as usize * 20);

    for i in 0..seed {
        for j in (i + 1)..seed {
            builder.add_edge(i, j);
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        for _ in 0..edges_per_node.min(new_node) {
            if endpoints.is_empty() {
                break;
            }
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != new_node {
                builder.add_edge(new_node, target);
                endpoints.push(new_node);
                endpoints.push(target);
            }
        }
    }
}

/// Ring lattice with `k` forward neighbors per node, each edge rewired to
/// a random target with probability `p`.
fn gen_small_world(builder: &mut GraphBuilder, node_count: u32) {
    if node_count < 2 {
        return;
    }
    let k = 10u32;
    let p = 0.05f64;
    let mut rng = FastRng::new(67890);
    let n = u64::from(node_count);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = ((u64::from(i) + u64::from(j)) % n) as NodeId;
            if rng.next_f64() < p {
                let rewired = rng.next(n) as NodeId;
                builder.add_edge(i, if rewired != i { rewired } else { neighbor });
            } else {
                builder.add_edge(i, neighbor);
            }
        }
    }
}

/// Uniform random edges, about ten per node, no self-loops.
fn gen_random(builder: &mut GraphBuilder, node_count: u32) {
    if node_count < 2 {
        return;
    }
    let n = u64::from(node_count);
    let mut rng = FastRng::new(54321);

    for _ in 0..n * 10 {
        let from = rng.next(n) as NodeId;
        let to = rng.next(n) as NodeId;
        if from != to {
            builder.add_edge(from, to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(generator: Generator, n: u32) -> SparseGraph {
        let mut b = GraphBuilder::new();
        generator(&mut b, n);
        b.build().unwrap()
    }

    #[test]
    fn test_lsystem_is_a_tree() {
        let g = build(gen_lsystem, 40);
        assert_eq!(g.node_count(), 40);
        assert_eq!(g.edge_count(), 39);
        assert_eq!(g.neighbors(0), &[1, 2, 3]);
        assert_eq!(bounded_bfs(&g, 0, 100).len(), 40);
    }

    #[test]
    fn test_scale_free_hub_outweighs_mean() {
        let g = build(gen_scale_free, 2_000);
        assert!(g.validate().is_ok());
        let stats = g.stats();
        assert!(stats.max_degree as f64 >= stats.mean_degree);
    }

    #[test]
    fn test_small_world_degree() {
        let g = build(gen_small_world, 100);
        assert_eq!(g.edge_count(), 1_000);
        assert!((0..100).all(|i| g.degree(i) == 10));
    }

    #[test]
    fn test_random_no_self_loops() {
        let g = build(gen_random, 500);
        assert!((0..500).all(|i| !g.neighbors(i).contains(&i)));
    }

    #[test]
    fn test_generators_handle_tiny_inputs() {
        let generators: [Generator; 4] = [gen_lsystem, gen_scale_free, gen_small_world, gen_random];
        for generator in generators {
            let g = build(generator, 1);
            assert_eq!(g.edge_count(), 0);
        }
    }

    #[test]
    fn test_generators_are_deterministic() {
        let a = build(gen_random, 300);
        let b = build(gen_random, 300);
        assert_eq!(a.col_indices(), b.col_indices());
    }

    #[test]
    fn test_reached_everything() {
        let g = build(gen_lsystem, 10);
        assert!(reached_everything(&g, 10));
        assert!(!reached_everything(&g, 9));
    }
}
