//! Corner point coordinates.

use serde::Serialize;

/// A 2D point in pixel coordinates, `(0, 0)` being the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    /// Creates a new coordinate with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_creation() {
        let coord = Coord::new(10.0, 20.0);
        assert_eq!(coord.x, 10.0);
        assert_eq!(coord.y, 20.0);
        assert_eq!(Coord::from((10.0, 20.0)), coord);
    }

    #[test]
    fn test_coord_is_finite() {
        assert!(Coord::new(10.0, 20.0).is_finite());
        assert!(!Coord::new(f64::NAN, 20.0).is_finite());
        assert!(!Coord::new(10.0, f64::INFINITY).is_finite());
    }
}
