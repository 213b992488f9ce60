//! Compact, cache-friendly runtime graphs compiled from a genome's sparse
//! connection list.
//!
//! `connection` holds the wire format a genome hands to a builder. `cyclic`
//! compiles that into a dense-indexed runtime graph (section 4.1). `depth`
//! analyzes an acyclic instance of that graph for per-node layer depth
//! (section 4.2). `acyclic` re-layers the graph by depth into the form the
//! acyclic activation engine walks in a single pass (section 4.3).
//! `buffer_pool` supplies the pooled activation arrays the evolutionary loop
//! needs when it constructs and disposes millions of engines (section 5).

pub mod connection;
pub mod cyclic;
pub mod depth;
pub mod acyclic;
pub mod buffer_pool;

pub use connection::WeightedConnection;
pub use cyclic::CyclicGraph;
pub use acyclic::{DagGraph, LayerBounds};
pub use depth::DepthInfo;
