use serde::Serialize;

/// Node identifier as it appears in the edge list.
pub type NodeId = u32;

/// Immutable directed graph in Compressed Sparse Row form.
///
/// Out-neighbors of node `i` are `col_indices[row_ptr[i]..row_ptr[i + 1]]`,
/// in the order the edges were first ingested. `row_ptr` covers every id
/// from 0 to the largest id seen, whether or not that id appeared.
///
/// Built only through [`GraphBuilder`](crate::GraphBuilder); there are no
/// mutating methods, so a `&SparseGraph` can be shared across threads.
#[derive(Debug, Clone)]
pub struct SparseGraph {
    pub(crate) row_ptr: Vec<usize>,
    pub(crate) col_indices: Vec<NodeId>,
    pub(crate) values: Vec<u32>,
    pub(crate) num_nodes: usize,
    pub(crate) num_edges: usize,
}

/// Whole megabytes in `bytes`, never reported as 0.
pub(crate) fn whole_mb(bytes: usize) -> usize {
    (bytes / (1024 * 1024)).max(1)
}

/// Summary figures for a loaded graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub max_node_id: Option<NodeId>,
    pub max_degree_node: NodeId,
    pub max_degree: usize,
    pub mean_degree: f64,
    pub memory_bytes: usize,
}

impl GraphStats {
    /// CSR memory in whole MB, never reported as 0.
    pub fn memory_mb(&self) -> usize {
        whole_mb(self.memory_bytes)
    }
}

impl SparseGraph {
    /// Build directly from (origin, destination) pairs.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut builder = crate::GraphBuilder::new();
        builder.ingest(edges);
        builder.build_unchecked()
    }

    /// Index of `node` into `row_ptr`, or `None` when it has no row.
    #[inline]
    fn row(&self, node: NodeId) -> Option<usize> {
        let idx = node as usize;
        (idx + 1 < self.row_ptr.len()).then_some(idx)
    }

    /// Out-degree of `node`. 0 for ids past the largest id seen.
    pub fn degree(&self, node: NodeId) -> usize {
        match self.row(node) {
            Some(i) => self.row_ptr[i + 1] - self.row_ptr[i],
            None => 0,
        }
    }

    /// Out-neighbors of `node` in insertion order. Empty when out of range.
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        match self.row(node) {
            Some(i) => &self.col_indices[self.row_ptr[i]..self.row_ptr[i + 1]],
            None => &[],
        }
    }

    /// Number of distinct ids seen as origin or destination.
    ///
    /// This is not `max_node_id + 1`: sparse id spaces leave gaps that
    /// occupy rows but are not counted here.
    pub fn node_count(&self) -> usize {
        self.num_nodes
    }

    /// Number of edge occurrences ingested, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.num_edges
    }

    /// Largest id that owns a row. `None` for a graph built from no edges.
    pub fn max_node_id(&self) -> Option<NodeId> {
        if self.num_nodes == 0 {
            None
        } else {
            Some((self.row_ptr.len() - 2) as NodeId)
        }
    }

    /// Lowest id with the highest out-degree. 0 when the graph has no edges.
    pub fn max_degree_node(&self) -> NodeId {
        let mut best_node = 0;
        let mut best_degree = 0;
        for (i, w) in self.row_ptr.windows(2).enumerate() {
            let d = w[1] - w[0];
            if d > best_degree {
                best_degree = d;
                best_node = i as NodeId;
            }
        }
        best_node
    }

    /// Nodes ranked by out-degree, descending; ties broken by ascending id.
    ///
    /// Zero-degree rows are skipped. `top_n == 0` returns every node with
    /// at least one outgoing edge.
    pub fn top_degree_nodes(&self, top_n: usize) -> Vec<(NodeId, usize)> {
        let mut ranked: Vec<(NodeId, usize)> = self
            .row_ptr
            .windows(2)
            .enumerate()
            .map(|(i, w)| (i as NodeId, w[1] - w[0]))
            .filter(|&(_, d)| d > 0)
            .collect();

        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        if top_n > 0 && top_n < ranked.len() {
            ranked.truncate(top_n);
        }
        ranked
    }

    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    pub fn col_indices(&self) -> &[NodeId] {
        &self.col_indices
    }

    /// Per-edge weights. Always 1; kept parallel to `col_indices`.
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Bytes held by the three CSR arrays.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        self.row_ptr.len() * size_of::<usize>()
            + self.col_indices.len() * size_of::<NodeId>()
            + self.values.len() * size_of::<u32>()
    }

    pub fn stats(&self) -> GraphStats {
        let max_degree_node = self.max_degree_node();
        let mean_degree = if self.num_nodes == 0 {
            0.0
        } else {
            self.num_edges as f64 / self.num_nodes as f64
        };
        GraphStats {
            nodes: self.num_nodes,
            edges: self.num_edges,
            max_node_id: self.max_node_id(),
            max_degree_node,
            max_degree: self.degree(max_degree_node),
            mean_degree,
            memory_bytes: self.memory_usage(),
        }
    }

    /// Check the structural invariants of the CSR arrays.
    pub fn validate(&self) -> Result<(), String> {
        if self.row_ptr.len() < 2 {
            return Err(format!("row_ptr has {} entries, need at least 2", self.row_ptr.len()));
        }
        if self.row_ptr[0] != 0 {
            return Err(format!("row_ptr[0] = {}, expected 0", self.row_ptr[0]));
        }
        if let Some(i) = self.row_ptr.windows(2).position(|w| w[0] > w[1]) {
            return Err(format!("row_ptr decreases at index {}", i));
        }
        let last = self.row_ptr[self.row_ptr.len() - 1];
        if last != self.col_indices.len() || last != self.num_edges {
            return Err(format!(
                "row_ptr ends at {}, but col_indices has {} entries and edge count is {}",
                last,
                self.col_indices.len(),
                self.num_edges
            ));
        }
        if self.values.len() != self.col_indices.len() {
            return Err(format!(
                "values has {} entries, col_indices has {}",
                self.values.len(),
                self.col_indices.len()
            ));
        }
        Ok(())
    }
}
