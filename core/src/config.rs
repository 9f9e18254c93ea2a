/// Load-time settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Cap on the estimated CSR footprint in MB. `None` = unlimited.
    ///
    /// `row_ptr` is sized by the largest node id, so a single stray id in
    /// the billions would otherwise allocate gigabytes of empty rows.
    pub max_memory_mb: Option<usize>,
    /// Expected number of edges, used to pre-size the builder.
    pub edge_capacity_hint: usize,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_memory_mb(mut self, limit: usize) -> Self {
        self.max_memory_mb = Some(limit);
        self
    }

    pub fn with_edge_capacity_hint(mut self, edges: usize) -> Self {
        self.edge_capacity_hint = edges;
        self
    }
}
