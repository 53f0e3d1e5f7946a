use thiserror::Error;

/// Top-level error type for projection analysis.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the projection graph and its descriptors.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("node not found in projection graph")]
    NodeNotFound,

    /// An arm walk starting at a leaf found `candidates` continuations at
    /// `(x, y)` where exactly one was expected.
    #[error("malformed graph: arm walk at ({x}, {y}) found {candidates} continuations")]
    MalformedArm { x: f64, y: f64, candidates: usize },
}

/// Errors related to rasterization.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("invalid raster parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for results using [`ProjectionError`].
pub type Result<T> = std::result::Result<T, ProjectionError>;
