use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;

use crate::config::LoadOptions;
use crate::edge_list::{open_edge_list, EdgeListReader};
use crate::error::{GraphError, Result};
use crate::graph::{NodeId, SparseGraph};
use crate::observer::{LoadReport, Observer};

const MB: usize = 1024 * 1024;

/// Mutable accumulator that turns an edge stream into a [`SparseGraph`].
///
/// Edges are grouped by origin in a temporary map, keeping per-origin
/// insertion order. `build` consumes the builder, so the map is dropped as
/// soon as the CSR arrays exist.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    adjacency: HashMap<NodeId, Vec<NodeId>>,
    seen: HashSet<NodeId>,
    edge_count: usize,
    max_id: Option<NodeId>,
    options: LoadOptions,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LoadOptions) -> Self {
        let hint = options.edge_capacity_hint;
        Self {
            adjacency: HashMap::with_capacity(hint / 4),
            seen: HashSet::with_capacity(hint / 2),
            edge_count: 0,
            max_id: None,
            options,
        }
    }

    /// Record one directed edge. Duplicates are kept.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.adjacency.entry(from).or_default().push(to);
        self.seen.insert(from);
        self.seen.insert(to);
        self.edge_count += 1;
        let hi = from.max(to);
        self.max_id = Some(self.max_id.map_or(hi, |m| m.max(hi)));
    }

    pub fn ingest<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        for (from, to) in edges {
            self.add_edge(from, to);
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// Bytes the finished CSR arrays will occupy.
    pub fn estimated_memory(&self) -> usize {
        use std::mem::size_of;

        let rows = self.max_id.map_or(0, |m| m as usize) + 2;
        rows * size_of::<usize>() + self.edge_count * (size_of::<NodeId>() + size_of::<u32>())
    }

    /// Freeze into CSR form.
    ///
    /// Fails only when `max_memory_mb` is set and the estimate exceeds it;
    /// the check runs before any CSR array is allocated.
    pub fn build(self) -> Result<SparseGraph> {
        if let Some(limit_mb) = self.options.max_memory_mb {
            let required = self.estimated_memory();
            if required > limit_mb.saturating_mul(MB) {
                return Err(GraphError::MemoryLimit {
                    required_mb: required.div_ceil(MB),
                    limit_mb,
                });
            }
        }
        Ok(self.build_unchecked())
    }

    pub(crate) fn build_unchecked(self) -> SparseGraph {
        let max_id = self.max_id.map_or(0, |m| m as usize);

        let mut row_ptr = vec![0usize; max_id + 2];
        let mut col_indices: Vec<NodeId> = Vec::with_capacity(self.edge_count);
        let mut values: Vec<u32> = Vec::with_capacity(self.edge_count);

        for i in 0..=max_id {
            if let Some(targets) = self.adjacency.get(&(i as NodeId)) {
                col_indices.extend_from_slice(targets);
                values.extend(std::iter::repeat(1).take(targets.len()));
            }
            row_ptr[i + 1] = col_indices.len();
        }

        debug!(
            rows = max_id + 1,
            edges = col_indices.len(),
            "built CSR arrays"
        );

        SparseGraph {
            row_ptr,
            col_indices,
            values,
            num_nodes: self.seen.len(),
            num_edges: self.edge_count,
        }
    }
}

/// Read an edge list from `reader` and build a graph.
///
/// Malformed lines, including ones that are not valid UTF-8, are skipped.
/// An I/O error aborts the load and no graph is returned.
pub fn load_reader<R: BufRead>(
    reader: R,
    options: &LoadOptions,
    observer: &dyn Observer,
) -> Result<SparseGraph> {
    observer.load_started("<stream>");
    load_edges(EdgeListReader::new(reader), Path::new("<stream>"), options, observer)
}

/// Open the edge-list file at `path` and build a graph from it.
pub fn load_path(
    path: &Path,
    options: &LoadOptions,
    observer: &dyn Observer,
) -> Result<SparseGraph> {
    observer.load_started(&path.display().to_string());
    let reader = open_edge_list(path)?;
    load_edges(reader, path, options, observer)
}

fn load_edges<R: BufRead>(
    mut reader: EdgeListReader<R>,
    path: &Path,
    options: &LoadOptions,
    observer: &dyn Observer,
) -> Result<SparseGraph> {
    let start = Instant::now();

    let mut builder = GraphBuilder::with_options(options.clone());
    builder.ingest(reader.by_ref());

    if let Some(source) = reader.take_error() {
        return Err(GraphError::SourceUnreadable {
            path: PathBuf::from(path),
            source,
        });
    }

    let graph = builder.build()?;

    observer.load_finished(&LoadReport {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        malformed_lines: reader.malformed_lines(),
        memory_bytes: graph.memory_usage(),
        elapsed: start.elapsed(),
    });

    Ok(graph)
}
