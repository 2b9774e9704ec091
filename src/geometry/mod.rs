//! Corner points and axis-aligned boxes in pixel space.
//!
//! Source records describe each hand as a quadrilateral of four corner
//! points. Pascal VOC can only hold axis-aligned boxes, so every
//! quadrilateral is reduced to its enclosing rectangle, discarding rotation.
//!
//! # Example
//!
//! ```
//! use hand2voc::geometry::{BBoxXYXY, Coord, ExtentFloor};
//!
//! let corners = [
//!     Coord::new(10.0, 20.0),
//!     Coord::new(50.0, 20.0),
//!     Coord::new(50.0, 80.0),
//!     Coord::new(10.0, 80.0),
//! ];
//! let bbox = BBoxXYXY::enclosing(&corners, ExtentFloor::NegInfinity);
//! assert_eq!(bbox, BBoxXYXY::from_xyxy(10.0, 20.0, 50.0, 80.0));
//! ```

mod bbox;
mod coord;

pub use bbox::{BBoxXYXY, ExtentFloor};
pub use coord::Coord;
