//! sparsegraph-core: directed edge lists in Compressed Sparse Row form.
//!
//! A [`GraphBuilder`] accumulates (origin, destination) pairs and freezes
//! them into an immutable [`SparseGraph`], which answers degree and
//! neighbor lookups and bounded-depth BFS straight off the CSR arrays.
//! Diagnostics go through an injected [`Observer`]; the library itself
//! never prints.

mod builder;
mod config;
mod edge_list;
mod error;
mod graph;
mod observer;
mod traversal;

pub use builder::{load_path, load_reader, GraphBuilder};
pub use config::LoadOptions;
pub use edge_list::{open_edge_list, parse_edge_line, EdgeListReader};
pub use error::{GraphError, Result};
pub use graph::{GraphStats, NodeId, SparseGraph};
pub use observer::{BfsReport, LoadReport, NoopObserver, Observer, TracingObserver};
pub use traversal::{bfs_layers, bounded_bfs, bounded_bfs_observed, induced_edges};
