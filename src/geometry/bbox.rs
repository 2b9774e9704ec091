//! Bounding box type in canonical XYXY format.

use serde::Serialize;

use super::coord::Coord;

/// Starting value for the running maximum when reducing corner points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtentFloor {
    /// Start at negative infinity; correct for any input.
    #[default]
    NegInfinity,
    /// Start at -1, so a maximum never drops below -1. Only equivalent to
    /// `NegInfinity` for non-negative pixel coordinates.
    Legacy,
}

impl ExtentFloor {
    #[inline]
    pub fn initial_max(self) -> f64 {
        match self {
            ExtentFloor::NegInfinity => f64::NEG_INFINITY,
            ExtentFloor::Legacy => -1.0,
        }
    }
}

/// An axis-aligned bounding box in XYXY format (xmin, ymin, xmax, ymax).
#[derive(Clone, Copy, PartialEq, Serialize)]
pub struct BBoxXYXY {
    pub min: Coord,
    pub max: Coord,
}

impl BBoxXYXY {
    /// Creates a new bounding box from min and max coordinates.
    #[inline]
    pub fn new(min: Coord, max: Coord) -> Self {
        Self { min, max }
    }

    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self::new(Coord::new(xmin, ymin), Coord::new(xmax, ymax))
    }

    /// Reduces a set of points to its axis-aligned envelope.
    ///
    /// Each axis is reduced independently, so the result is ordered
    /// (`min <= max`) whenever at least one point is given. Any rotation of
    /// the input quadrilateral is lost.
    pub fn enclosing(points: &[Coord], floor: ExtentFloor) -> Self {
        let init = (
            f64::INFINITY,
            f64::INFINITY,
            floor.initial_max(),
            floor.initial_max(),
        );
        let (xmin, ymin, xmax, ymax) =
            points
                .iter()
                .fold(init, |(xmin, ymin, xmax, ymax), point| {
                    (
                        xmin.min(point.x),
                        ymin.min(point.y),
                        xmax.max(point.x),
                        ymax.max(point.y),
                    )
                });
        Self::from_xyxy(xmin, ymin, xmax, ymax)
    }

    /// Returns the minimum x coordinate.
    #[inline]
    pub fn xmin(&self) -> f64 {
        self.min.x
    }

    /// Returns the minimum y coordinate.
    #[inline]
    pub fn ymin(&self) -> f64 {
        self.min.y
    }

    /// Returns the maximum x coordinate.
    #[inline]
    pub fn xmax(&self) -> f64 {
        self.max.x
    }

    /// Returns the maximum y coordinate.
    #[inline]
    pub fn ymax(&self) -> f64 {
        self.max.y
    }

    /// Returns true if all coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns true if the box is properly ordered (min <= max for both axes).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

impl std::fmt::Debug for BBoxXYXY {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("xmin", &self.min.x)
            .field("ymin", &self.min.y)
            .field("xmax", &self.max.x)
            .field("ymax", &self.max.y)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> [Coord; 4] {
        [
            Coord::new(10.0, 20.0),
            Coord::new(50.0, 20.0),
            Coord::new(50.0, 80.0),
            Coord::new(10.0, 80.0),
        ]
    }

    #[test]
    fn test_bbox_from_xyxy() {
        let bbox = BBoxXYXY::from_xyxy(10.0, 20.0, 100.0, 80.0);
        assert_eq!(bbox.xmin(), 10.0);
        assert_eq!(bbox.ymin(), 20.0);
        assert_eq!(bbox.xmax(), 100.0);
        assert_eq!(bbox.ymax(), 80.0);
    }

    #[test]
    fn test_enclosing_axis_aligned_square() {
        let bbox = BBoxXYXY::enclosing(&square(), ExtentFloor::NegInfinity);
        assert_eq!(bbox, BBoxXYXY::from_xyxy(10.0, 20.0, 50.0, 80.0));
        assert!(bbox.is_ordered());
    }

    #[test]
    fn test_enclosing_ignores_winding_order() {
        let mut corners = square();
        corners.reverse();
        corners.swap(0, 2);
        let bbox = BBoxXYXY::enclosing(&corners, ExtentFloor::NegInfinity);
        assert_eq!(bbox, BBoxXYXY::from_xyxy(10.0, 20.0, 50.0, 80.0));
    }

    #[test]
    fn test_enclosing_rotated_quad_drops_rotation() {
        let diamond = [
            Coord::new(30.0, 0.0),
            Coord::new(60.0, 30.0),
            Coord::new(30.0, 60.0),
            Coord::new(0.0, 30.0),
        ];
        let bbox = BBoxXYXY::enclosing(&diamond, ExtentFloor::Legacy);
        assert_eq!(bbox, BBoxXYXY::from_xyxy(0.0, 0.0, 60.0, 60.0));
    }

    #[test]
    fn test_degenerate_point_box() {
        let point = [Coord::new(5.0, 5.0); 4];
        let bbox = BBoxXYXY::enclosing(&point, ExtentFloor::NegInfinity);
        assert_eq!(bbox, BBoxXYXY::from_xyxy(5.0, 5.0, 5.0, 5.0));
    }

    #[test]
    fn test_negative_coordinates_depend_on_floor() {
        let negative = [
            Coord::new(-10.0, -20.0),
            Coord::new(-5.0, -20.0),
            Coord::new(-5.0, -8.0),
            Coord::new(-10.0, -8.0),
        ];

        let exact = BBoxXYXY::enclosing(&negative, ExtentFloor::NegInfinity);
        assert_eq!(exact, BBoxXYXY::from_xyxy(-10.0, -20.0, -5.0, -8.0));

        let legacy = BBoxXYXY::enclosing(&negative, ExtentFloor::Legacy);
        assert_eq!(legacy, BBoxXYXY::from_xyxy(-10.0, -20.0, -1.0, -1.0));
    }

    #[test]
    fn test_bbox_ordering() {
        assert!(BBoxXYXY::from_xyxy(10.0, 20.0, 100.0, 80.0).is_ordered());
        assert!(!BBoxXYXY::from_xyxy(100.0, 80.0, 10.0, 20.0).is_ordered());
    }
}
