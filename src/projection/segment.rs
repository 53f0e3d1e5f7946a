use crate::math::vector_2d::{midpoint, rotate_2d};
use crate::math::{Point2, Vector2};

/// Structural type of a coarse-grained element, read from the first
/// character of its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `s`: a helix.
    Stem,
    /// `i`: interior loop or bulge.
    InteriorLoop,
    /// `h`: hairpin loop.
    Hairpin,
    /// `m`: multiloop segment.
    Multiloop,
    /// `f`: unpaired 5' end.
    FivePrime,
    /// `t`: unpaired 3' end.
    ThreePrime,
    /// Any other key.
    Other,
}

impl ElementKind {
    /// Classifies an element key.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.chars().next() {
            Some('s') => Self::Stem,
            Some('i') => Self::InteriorLoop,
            Some('h') => Self::Hairpin,
            Some('m') => Self::Multiloop,
            Some('f') => Self::FivePrime,
            Some('t') => Self::ThreePrime,
            _ => Self::Other,
        }
    }
}

/// A projected coarse-grained element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        midpoint(&self.start, &self.end)
    }

    /// Rotates both endpoints around the origin.
    pub fn rotate(&mut self, degrees: f64) {
        self.start = rotate_2d(&self.start, degrees);
        self.end = rotate_2d(&self.end, degrees);
    }

    /// Moves both endpoints by `offset`.
    pub fn translate(&mut self, offset: &Vector2) {
        self.start += offset;
        self.end += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_from_key_prefix() {
        assert_eq!(ElementKind::from_key("s12"), ElementKind::Stem);
        assert_eq!(ElementKind::from_key("i0"), ElementKind::InteriorLoop);
        assert_eq!(ElementKind::from_key("h5"), ElementKind::Hairpin);
        assert_eq!(ElementKind::from_key("m12"), ElementKind::Multiloop);
        assert_eq!(ElementKind::from_key("f0"), ElementKind::FivePrime);
        assert_eq!(ElementKind::from_key("t0"), ElementKind::ThreePrime);
        assert_eq!(ElementKind::from_key("x1"), ElementKind::Other);
        assert_eq!(ElementKind::from_key(""), ElementKind::Other);
    }

    #[test]
    fn rotate_and_translate_keep_length() {
        let mut seg = Segment::new(Point2::new(1.0, 2.0), Point2::new(4.0, 6.0));
        seg.rotate(33.0);
        seg.translate(&Vector2::new(-7.0, 0.5));
        assert!((nalgebra::distance(&seg.start, &seg.end) - 5.0).abs() < 1e-12);
    }
}
