mod crossing;
mod segment;

pub use crossing::{find_crossings, Crossing, CrossingPoints};
pub use segment::{ElementKind, Segment};

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{GeometryError, GraphError, Result};
use crate::graph::{BuildGraph, Condense, CondensePoints, ProjectionGraph};
use crate::math::basis_3d::orthonormal_basis;
use crate::math::hull_2d::convex_hull_diameter;
use crate::math::vector_2d::{centroid, distance, midpoint};
use crate::math::{Point2, Point3, Vector2, Vector3};
use crate::raster::{BoundingBox, BoundingSquare, Raster, RasterParams, Rasterize};

/// A 2D projection of a coarse-grained 3D structure.
///
/// Every element is projected onto the plane perpendicular to the projection
/// direction and the result is put into a canonical position: the diameter
/// of the point set runs along the y-axis and the centroid sits at the
/// origin. The planar graph of the projection is built on first access and
/// kept until the segments move.
#[derive(Debug, Clone)]
pub struct Projection2D {
    segments: BTreeMap<String, Segment>,
    proj_direction: Vector3,
    longest_axis: f64,
    crossings: Option<CrossingPoints>,
    graph: Option<ProjectionGraph>,
}

impl Projection2D {
    /// Projects `elements` along `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] for a zero direction and
    /// [`GeometryError::Degenerate`] if there are no elements.
    pub fn new<K, I>(elements: I, direction: Vector3) -> Result<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, (Point3, Point3))>,
    {
        Self::with_rotation(elements, direction, 0.0)
    }

    /// Projects `elements` along `direction`, then rotates the canonical
    /// projection by `degrees` counter-clockwise.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] for a zero direction and
    /// [`GeometryError::Degenerate`] if there are no elements.
    pub fn with_rotation<K, I>(elements: I, direction: Vector3, degrees: f64) -> Result<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, (Point3, Point3))>,
    {
        let basis = orthonormal_basis(&direction)?;
        let project = |p: &Point3| Point2::new(basis.u.dot(&p.coords), basis.v.dot(&p.coords));

        let mut segments: BTreeMap<String, Segment> = elements
            .into_iter()
            .map(|(key, (start, end))| (key.into(), Segment::new(project(&start), project(&end))))
            .collect();

        let points: Vec<Point2> = segments.values().flat_map(|s| [s.start, s.end]).collect();
        let (a, b) = convex_hull_diameter(&points)
            .ok_or_else(|| GeometryError::Degenerate("no elements to project".into()))?;
        let longest_axis = distance(&a, &b);

        // Diameter midpoint to the origin, diameter onto the y-axis.
        let offset = -midpoint(&a, &b).coords;
        let axis = b - a;
        let angle = axis.x.atan2(axis.y).to_degrees();
        for segment in segments.values_mut() {
            segment.translate(&offset);
            segment.rotate(angle);
        }
        let center = centroid(segments.values().flat_map(|s| [&s.start, &s.end]))
            .map_or_else(Vector2::zeros, |c| -c.coords);
        for segment in segments.values_mut() {
            segment.translate(&center);
        }

        let mut projection = Self {
            segments,
            proj_direction: direction,
            longest_axis,
            crossings: None,
            graph: None,
        };
        projection.rotate(degrees);
        debug!(
            elements = projection.segments.len(),
            longest_axis, "projected structure"
        );
        Ok(projection)
    }

    /// The direction the structure was projected along, as given.
    #[must_use]
    pub fn proj_direction(&self) -> Vector3 {
        self.proj_direction
    }

    /// Length of the diameter of the projected point set.
    #[must_use]
    pub fn longest_axis(&self) -> f64 {
        self.longest_axis
    }

    /// Projected elements by key.
    #[must_use]
    pub fn segments(&self) -> &BTreeMap<String, Segment> {
        &self.segments
    }

    /// The projected element `key`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ElementNotFound`] for an unknown key.
    pub fn segment(&self, key: &str) -> Result<&Segment> {
        self.segments
            .get(key)
            .ok_or_else(|| GraphError::ElementNotFound(key.to_owned()).into())
    }

    /// All segment endpoints.
    pub fn points(&self) -> impl Iterator<Item = Point2> + '_ {
        self.segments.values().flat_map(|s| [s.start, s.end])
    }

    /// Rotates the projection around the origin by `degrees`
    /// counter-clockwise. Crossing points and the graph are rebuilt on next
    /// access; earlier condensation is lost.
    pub fn rotate(&mut self, degrees: f64) {
        for segment in self.segments.values_mut() {
            segment.rotate(degrees);
        }
        self.crossings = None;
        self.graph = None;
    }

    /// Crossings of every element with the others, keyed by element.
    pub fn crossing_points(&mut self) -> &CrossingPoints {
        self.crossings
            .get_or_insert_with(|| find_crossings(&self.segments))
    }

    /// The planar graph of the projection, built on first access.
    ///
    /// # Errors
    ///
    /// Returns an error if building the graph fails.
    pub fn graph(&mut self) -> Result<&ProjectionGraph> {
        Ok(self.graph_mut()?)
    }

    /// Mutable access to the cached graph, building it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if building the graph fails.
    pub fn graph_mut(&mut self) -> Result<&mut ProjectionGraph> {
        let graph = match self.graph.take() {
            Some(graph) => graph,
            None => {
                let crossings = self
                    .crossings
                    .get_or_insert_with(|| find_crossings(&self.segments));
                BuildGraph::new(&self.segments, crossings).execute()?
            }
        };
        Ok(self.graph.insert(graph))
    }

    /// Merges graph nodes closer than `cutoff`. Returns the number of merges.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph cannot be built or merged.
    pub fn condense_points(&mut self, cutoff: f64) -> Result<usize> {
        CondensePoints::new(cutoff).execute(self.graph_mut()?)
    }

    /// Merges close nodes, then nodes close to edges. Returns the number of
    /// merges.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph cannot be built or merged.
    pub fn condense(&mut self, cutoff: f64) -> Result<usize> {
        Condense::new(cutoff).execute(self.graph_mut()?)
    }

    /// Box around all segment endpoints, grown by `margin`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if there are no segments.
    pub fn bounding_box(&self, margin: f64) -> Result<BoundingBox> {
        let points: Vec<Point2> = self.points().collect();
        BoundingBox::around(&points, margin)
            .ok_or_else(|| GeometryError::Degenerate("projection has no segments".into()).into())
    }

    /// Square around all segment endpoints: side `max(width, height) +
    /// 2 * margin`, centered on the bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if there are no segments.
    pub fn bounding_square(&self, margin: f64) -> Result<BoundingSquare> {
        Ok(self.bounding_box(0.0)?.to_square(margin))
    }

    /// Distance between the midpoints of two projected elements.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ElementNotFound`] if either key is unknown.
    pub fn element_distance(&self, key1: &str, key2: &str) -> Result<f64> {
        let a = self.segment(key1)?.midpoint();
        let b = self.segment(key2)?.midpoint();
        Ok(distance(&a, &b))
    }

    /// Rasterizes the current (possibly condensed) graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the graph cannot be built or `params` are invalid.
    pub fn rasterize(&mut self, params: &RasterParams) -> Result<Raster> {
        Rasterize::new(*params).execute(self.graph_mut()?)
    }
}
