use thiserror::Error;

/// Construction-time failures from the graph builders (spec.md section 7).
///
/// Activation and evaluation are infallible by design: every input they see
/// has already been validated by a builder, so there is nothing left to fail
/// on at runtime. A degenerate network simply produces a low fitness instead
/// of an error (see `evaluators`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhenomeError {
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// Raised defensively by the acyclic depth analyzer when it finds a back
    /// edge while walking a graph the caller asserted was acyclic.
    #[error("cycle detected while analyzing depth at node {node}")]
    CycleDetected { node: usize },
}

pub type PhenomeResult<T> = Result<T, PhenomeError>;
