//! Geometric primitives for diagram documents.
//!
//! This module provides the geometric value types carried by state-machine
//! diagram documents and their in-memory item tree.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`NodeGeometry`] - Position and size of a state or comment
//! - [`EdgeGeometry`] - Port offsets and waypoint polyline of a transition
//!
//! # Coordinate System
//!
//! The coordinate system matches the on-disk document format:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! The model layer copies geometry verbatim between the document and the item
//! tree; it never interprets coordinates. Rendering belongs to the canvas
//! layer of the editor, which is outside this workspace.

use serde::{Deserialize, Serialize};

/// A 2D point representing a position in diagram coordinate space.
///
/// Points use `f32` coordinates with origin at the top-left and Y increasing
/// downward (see [module documentation](self) for details).
///
/// # Examples
///
/// ```
/// # use flywheel_core::geometry::Point;
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x(), 10.0);
/// assert_eq!(p.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// Geometry record for a state or comment: position plus size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeGeometry {
    position: Point,
    size: Size,
}

impl NodeGeometry {
    /// Creates a new node geometry from a position and a size.
    pub fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    /// Returns the position of the node
    pub fn position(self) -> Point {
        self.position
    }

    /// Returns the size of the node
    pub fn size(self) -> Size {
        self.size
    }
}

/// Geometry record for a transition.
///
/// A transition attaches to its endpoints at port offsets and may route
/// through an ordered polyline of waypoints between them. The waypoint list
/// is carried in document order and may be empty for a straight connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeGeometry {
    source_port: Point,
    target_port: Point,
    path: Vec<Point>,
}

impl EdgeGeometry {
    /// Creates a new edge geometry from port offsets and a waypoint polyline.
    pub fn new(source_port: Point, target_port: Point, path: Vec<Point>) -> Self {
        Self {
            source_port,
            target_port,
            path,
        }
    }

    /// Returns the port offset at the source endpoint
    pub fn source_port(&self) -> Point {
        self.source_port
    }

    /// Returns the port offset at the target endpoint
    pub fn target_port(&self) -> Point {
        self.target_port
    }

    /// Returns the ordered waypoint polyline
    pub fn path(&self) -> &[Point] {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_default() {
        let point = Point::default();
        assert!(point.is_zero());
    }

    #[test]
    fn test_point_is_zero() {
        assert!(Point::new(0.0, 0.0).is_zero());
        assert!(!Point::new(1.0, 0.0).is_zero());
        assert!(!Point::new(0.0, 1.0).is_zero());
    }

    #[test]
    fn test_size_new() {
        let size = Size::new(100.0, 200.0);
        assert_eq!(size.width(), 100.0);
        assert_eq!(size.height(), 200.0);
    }

    #[test]
    fn test_size_is_zero() {
        assert!(Size::default().is_zero());
        assert!(!Size::new(1.0, 0.0).is_zero());
        assert!(!Size::new(0.0, 1.0).is_zero());
        assert!(!Size::new(-1.0, -1.0).is_zero());
    }

    #[test]
    fn test_node_geometry_accessors() {
        let g = NodeGeometry::new(Point::new(10.0, 20.0), Size::new(30.0, 40.0));
        assert_eq!(g.position(), Point::new(10.0, 20.0));
        assert_eq!(g.size(), Size::new(30.0, 40.0));
    }

    #[test]
    fn test_edge_geometry_accessors() {
        let g = EdgeGeometry::new(
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            vec![Point::new(5.0, 6.0), Point::new(7.0, 8.0)],
        );
        assert_eq!(g.source_port(), Point::new(1.0, 2.0));
        assert_eq!(g.target_port(), Point::new(3.0, 4.0));
        assert_eq!(g.path().len(), 2);
        assert_eq!(g.path()[1], Point::new(7.0, 8.0));
    }

    #[test]
    fn test_edge_geometry_empty_path() {
        let g = EdgeGeometry::default();
        assert!(g.path().is_empty());
        assert!(g.source_port().is_zero());
        assert!(g.target_port().is_zero());
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn size_strategy() -> impl Strategy<Value = Size> {
        (0.0f32..1000.0, 0.0f32..1000.0).prop_map(|(w, h)| Size::new(w, h))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Accessors should return exactly what the constructor was given.
    fn check_point_constructor_roundtrip(x: f32, y: f32) -> Result<(), TestCaseError> {
        let point = Point::new(x, y);
        prop_assert!(approx_eq!(f32, point.x(), x));
        prop_assert!(approx_eq!(f32, point.y(), y));
        Ok(())
    }

    /// A node geometry preserves its parts unchanged.
    fn check_node_geometry_preserves_parts(
        position: Point,
        size: Size,
    ) -> Result<(), TestCaseError> {
        let g = NodeGeometry::new(position, size);
        prop_assert_eq!(g.position(), position);
        prop_assert_eq!(g.size(), size);
        Ok(())
    }

    /// An edge geometry preserves its waypoint polyline verbatim, in order.
    fn check_edge_geometry_preserves_path(
        source: Point,
        target: Point,
        path: Vec<Point>,
    ) -> Result<(), TestCaseError> {
        let g = EdgeGeometry::new(source, target, path.clone());
        prop_assert_eq!(g.source_port(), source);
        prop_assert_eq!(g.target_port(), target);
        prop_assert_eq!(g.path(), path.as_slice());
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn point_constructor_roundtrip(x in -1000.0f32..1000.0, y in -1000.0f32..1000.0) {
            check_point_constructor_roundtrip(x, y)?;
        }

        #[test]
        fn node_geometry_preserves_parts(p in point_strategy(), s in size_strategy()) {
            check_node_geometry_preserves_parts(p, s)?;
        }

        #[test]
        fn edge_geometry_preserves_path(
            source in point_strategy(),
            target in point_strategy(),
            path in proptest::collection::vec(point_strategy(), 0..8),
        ) {
            check_edge_geometry_preserves_path(source, target, path)?;
        }
    }
}
