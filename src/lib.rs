pub mod error;
pub mod graph;
pub mod math;
pub mod projection;
pub mod raster;

pub use error::{ProjectionError, Result};
pub use graph::ProjectionGraph;
pub use projection::Projection2D;
pub use raster::{Raster, RasterParams};
