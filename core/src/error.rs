use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a graph. Queries on a built graph never fail.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The edge-list source could not be opened or read.
    #[error("cannot read edge list '{}': {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSR arrays would exceed the configured memory cap.
    #[error("graph needs ~{required_mb}MB, exceeds max_memory_mb={limit_mb}MB")]
    MemoryLimit { required_mb: usize, limit_mb: usize },
}

pub type Result<T> = std::result::Result<T, GraphError>;
