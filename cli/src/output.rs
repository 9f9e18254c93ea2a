use serde::Serialize;
use serde_json::json;

use sparsegraph_core::{GraphStats, NodeId};

use crate::Format;

/// Renders query results on stdout as a table or as JSON.
pub struct Printer {
    format: Format,
}

#[derive(Serialize)]
struct BfsOutput<'a> {
    start: i64,
    depth: i64,
    found: usize,
    nodes: &'a [i64],
    #[serde(skip_serializing_if = "Option::is_none")]
    edges: Option<&'a [(NodeId, NodeId)]>,
}

impl Printer {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn stats(&self, stats: &GraphStats) {
        match self.format {
            Format::Json => print_json(stats),
            Format::Table => print!("{}", stats_table(stats)),
        }
    }

    pub fn degree(&self, node: i64, degree: usize) {
        match self.format {
            Format::Json => print_json(&json!({ "node": node, "degree": degree })),
            Format::Table => println!("node {}: out-degree {}", node, degree),
        }
    }

    pub fn neighbors(&self, node: i64, neighbors: &[NodeId]) {
        match self.format {
            Format::Json => print_json(&json!({ "node": node, "neighbors": neighbors })),
            Format::Table => println!("node {} -> [{}]", node, join(neighbors)),
        }
    }

    pub fn hub(&self, node: NodeId, degree: usize) {
        match self.format {
            Format::Json => print_json(&json!({ "node": node, "degree": degree })),
            Format::Table => {
                println!("Highest out-degree node: {}", node);
                println!("Out-degree: {}", degree);
            }
        }
    }

    pub fn top(&self, ranked: &[(NodeId, usize)]) {
        match self.format {
            Format::Json => {
                let rows: Vec<_> = ranked
                    .iter()
                    .map(|&(node, degree)| json!({ "node": node, "degree": degree }))
                    .collect();
                print_json(&rows);
            }
            Format::Table => print!("{}", top_table(ranked)),
        }
    }

    pub fn bfs(
        &self,
        start: i64,
        depth: i64,
        nodes: &[i64],
        edges: Option<&[(NodeId, NodeId)]>,
    ) {
        match self.format {
            Format::Json => print_json(&BfsOutput {
                start,
                depth,
                found: nodes.len(),
                nodes,
                edges,
            }),
            Format::Table => {
                println!("BFS from {} (depth {}): {} nodes", start, depth, nodes.len());
                println!("[{}]", join(nodes));
                if let Some(edges) = edges {
                    println!("{} edges among reached nodes:", edges.len());
                    for (from, to) in edges {
                        println!("  {} -> {}", from, to);
                    }
                }
            }
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => tracing::error!("failed to serialize output: {}", e),
    }
}

fn join<T: std::fmt::Display>(ids: &[T]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn stats_table(s: &GraphStats) -> String {
    let max_id = s
        .max_node_id
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    format!(
        "{:<18} {:>12}\n\
         {:<18} {:>12}\n\
         {:<18} {:>12}\n\
         {:<18} {:>12}\n\
         {:<18} {:>12}\n\
         {:<18} {:>12.2}\n\
         {:<18} {:>10}MB\n",
        "nodes", s.nodes,
        "edges", s.edges,
        "max node id", max_id,
        "max degree node", s.max_degree_node,
        "max degree", s.max_degree,
        "mean degree", s.mean_degree,
        "memory", s.memory_mb(),
    )
}

fn top_table(ranked: &[(NodeId, usize)]) -> String {
    let mut out = format!("{:>6} {:>12} {:>10}\n", "rank", "node", "degree");
    out.push_str(&format!("{:->6} {:->12} {:->10}\n", "", "", ""));
    for (rank, (node, degree)) in ranked.iter().enumerate() {
        out.push_str(&format!("{:>6} {:>12} {:>10}\n", rank + 1, node, degree));
    }
    out
}
