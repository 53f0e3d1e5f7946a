mod bounds;
mod bresenham;

pub use bounds::BoundingBox;
pub use bresenham::bresenham_line;

use nalgebra::DMatrix;
use tracing::{debug, warn};

use crate::error::{RasterError, Result};
use crate::graph::ProjectionGraph;
use crate::math::vector_2d::rotate_2d;
use crate::math::Point2;
use crate::projection::ElementKind;

/// A square region of the projection plane mapped onto the raster grid.
///
/// Only `left`, `bottom` and the width are used: the grid origin is the
/// lower-left corner and the width is the side length.
pub type BoundingSquare = BoundingBox;

/// Pixel weight of stem edges.
const STEM_WEIGHT: f32 = 1.0;

/// Pixel weight of every other element.
const LOOP_WEIGHT: f32 = 0.3;

/// Parameters controlling rasterization.
#[derive(Debug, Clone, Copy)]
pub struct RasterParams {
    /// Number of pixel steps across the bounding square.
    pub resolution: usize,
    /// Region to rasterize; `None` uses the smallest square around the graph.
    pub bounding_square: Option<BoundingSquare>,
    /// Emit a warning for every pixel that falls outside the grid.
    pub warn_on_clip: bool,
}

impl Default for RasterParams {
    fn default() -> Self {
        Self {
            resolution: 50,
            bounding_square: None,
            warn_on_clip: true,
        }
    }
}

/// A rasterized projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    /// Pixel intensities in `[0, 1]`, `(resolution + 1)` square. Row 0 is
    /// the top of the image, column 0 its left edge.
    pub pixels: DMatrix<f32>,
    /// Number of pixels dropped because they fell outside the grid.
    pub clipped: usize,
}

/// Buckets points into pixel coordinates.
///
/// Every point is rotated by `-rotate_degrees` around the origin, then each
/// coordinate is mapped to `floor((p - origin) / step)`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn rasterized_2d_coordinates(
    points: &[Point2],
    step: f64,
    origin: &Point2,
    rotate_degrees: f64,
) -> Vec<(i64, i64)> {
    points
        .iter()
        .map(|p| {
            let q = rotate_2d(p, -rotate_degrees);
            let cell = (q - origin) / step;
            (cell.x.floor() as i64, cell.y.floor() as i64)
        })
        .collect()
}

/// Draws the edges of a projection graph into a pixel grid.
///
/// Each edge is drawn with [`bresenham_line`]; stems add 1.0 to every pixel
/// they touch, other elements 0.3, and pixels saturate at 1.0.
#[derive(Debug)]
pub struct Rasterize {
    params: RasterParams,
}

impl Rasterize {
    /// Creates a new rasterization operation.
    #[must_use]
    pub fn new(params: RasterParams) -> Self {
        Self { params }
    }

    /// Executes the rasterization.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidParameters`] if the resolution is zero
    /// or the bounding square side is not a positive finite number.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, graph: &ProjectionGraph) -> Result<Raster> {
        let resolution = self.params.resolution;
        if resolution == 0 {
            return Err(RasterError::InvalidParameters("resolution must be positive".into()).into());
        }
        if let Some(square) = &self.params.bounding_square {
            check_side(square.width())?;
        }
        let n = resolution + 1;
        let mut raw = DMatrix::<f32>::zeros(n, n);
        let mut clipped = 0;
        if graph.edge_count() == 0 {
            return Ok(Raster {
                pixels: raw,
                clipped,
            });
        }

        let square = match self.params.bounding_square {
            Some(square) => square,
            None => {
                let points: Vec<Point2> = graph.nodes().map(|(_, p)| p).collect();
                let bb = BoundingBox::around(&points, 0.0).ok_or_else(|| {
                    RasterError::InvalidParameters("graph has edges but no nodes".into())
                })?;
                bb.to_square(0.0)
            }
        };
        let side = square.width();
        check_side(side)?;
        let step = side / resolution as f64;
        let origin = Point2::new(square.left, square.bottom);

        for edge in graph.edges() {
            let weight = if ElementKind::from_key(edge.label) == ElementKind::Stem {
                STEM_WEIGHT
            } else {
                LOOP_WEIGHT
            };
            let ends = rasterized_2d_coordinates(&[edge.start, edge.end], step, &origin, 0.0);
            for (x, y) in bresenham_line(ends[0], ends[1]) {
                match (usize::try_from(x), usize::try_from(y)) {
                    (Ok(col), Ok(row)) if col < n && row < n => {
                        let pixel = &mut raw[(col, row)];
                        *pixel = (*pixel + weight).min(1.0);
                    }
                    _ => {
                        clipped += 1;
                        if self.params.warn_on_clip {
                            warn!(x, y, label = edge.label, "pixel outside raster grid, skipped");
                        }
                    }
                }
            }
        }

        debug!(resolution, step, clipped, "rasterized projection graph");
        // Raw grid is indexed (x, y) with y up; turn it into image rows.
        let pixels = DMatrix::from_fn(n, n, |r, c| raw[(c, n - 1 - r)]);
        Ok(Raster { pixels, clipped })
    }
}

fn check_side(side: f64) -> Result<()> {
    if !side.is_finite() || side <= 0.0 {
        return Err(RasterError::InvalidParameters(format!(
            "bounding square side must be positive and finite, got {side}"
        ))
        .into());
    }
    Ok(())
}
