//! Geometric primitives for scene layout and containment.
//!
//! This module provides the rectangle math the enforcement engine is built on.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in scene space
//! - [`Size`] - Width and height dimensions
//! - [`Rect`] - An axis-aligned rectangle defined by its top-left corner and size
//! - [`Insets`] - Padding/margin values for four sides
//! - [`snap`] - Rounds a coordinate to a grid
//!
//! # Coordinate System
//!
//! Enclave uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward (positive to the right)
//! - **Y-axis**: Increases downward (positive downward)
//!
//! Rectangles are never normalized: a negative width or height is kept as-is
//! and flows through every operation, so that malformed input is reported
//! rather than silently repaired.

use serde::{Deserialize, Serialize};

/// Rounds `value` to the nearest multiple of `grid`.
///
/// Exact halves round away from zero. A `grid` of `1.0` or less leaves the
/// value untouched.
///
/// # Examples
///
/// ```
/// # use enclave_core::geometry::snap;
/// assert_eq!(snap(23.0, 10.0), 20.0);
/// assert_eq!(snap(25.0, 10.0), 30.0);
/// assert_eq!(snap(-25.0, 10.0), -30.0);
/// assert_eq!(snap(7.3, 1.0), 7.3);
/// ```
pub fn snap(value: f32, grid: f32) -> f32 {
    if grid <= 1.0 {
        return value;
    }
    (value / grid).round() * grid
}

/// A 2D point representing a position in scene coordinate space.
///
/// # Examples
///
/// ```
/// # use enclave_core::geometry::Point;
/// let origin = Point::new(10.0, 20.0);
/// let offset = Point::new(5.0, 5.0);
///
/// let moved = origin.add_point(offset);
/// assert_eq!(moved.x(), 15.0);
/// assert_eq!(moved.y(), 25.0);
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

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Snaps both coordinates to `grid`, measured from `origin`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use enclave_core::geometry::Point;
    /// let p = Point::new(23.0, 47.0);
    ///
    /// let absolute = p.snap(10.0, Point::default());
    /// assert_eq!(absolute, Point::new(20.0, 50.0));
    ///
    /// // Relative to an origin that is itself off-grid
    /// let relative = p.snap(10.0, Point::new(5.0, 5.0));
    /// assert_eq!(relative, Point::new(25.0, 45.0));
    /// ```
    pub fn snap(self, grid: f32, origin: Point) -> Self {
        let local = self.sub_point(origin);
        Point::new(snap(local.x, grid), snap(local.y, grid)).add_point(origin)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    #[serde(alias = "w")]
    width: f32,
    #[serde(alias = "h")]
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

    /// Returns true if either dimension is below zero
    pub fn is_negative(self) -> bool {
        self.width < 0.0 || self.height < 0.0
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// An axis-aligned rectangle in absolute scene coordinates.
///
/// Unlike a min/max bounding box, a `Rect` keeps its origin and extent
/// separately, so a negative size survives construction and is visible to
/// the containment checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    x: f32,
    y: f32,
    #[serde(alias = "w")]
    width: f32,
    #[serde(alias = "h")]
    height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and dimensions
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a new rectangle from a top-left point and a size
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Returns the left edge
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the top edge
    pub fn y(self) -> f32 {
        self.y
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the right edge (`x + width`)
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge (`y + height`)
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    /// Returns the top-left corner as a Point
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Converts the rectangle's extent to a Size
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the center point of the rectangle
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns a copy moved to the given top-left corner, keeping the size
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.x = origin.x;
        self.y = origin.y;
        self
    }

    /// Returns a copy with the given size, keeping the origin
    pub fn with_size(mut self, size: Size) -> Self {
        self.width = size.width;
        self.height = size.height;
        self
    }

    /// Moves the rectangle by the specified offset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use enclave_core::geometry::{Point, Rect};
    /// let rect = Rect::new(10.0, 20.0, 50.0, 30.0);
    ///
    /// let moved = rect.translate(Point::new(100.0, 50.0));
    /// assert_eq!(moved, Rect::new(110.0, 70.0, 50.0, 30.0));
    /// ```
    pub fn translate(self, offset: Point) -> Self {
        self.with_origin(self.origin().add_point(offset))
    }

    /// Grows the rectangle outward by the given insets.
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            x: self.x - insets.left,
            y: self.y - insets.top,
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Returns the smallest rectangle covering both rectangles.
    ///
    /// # Examples
    ///
    /// ```
    /// # use enclave_core::geometry::Rect;
    /// let header = Rect::new(0.0, 0.0, 100.0, 30.0);
    /// let content = Rect::new(10.0, 40.0, 120.0, 80.0);
    ///
    /// let combined = header.union(&content);
    /// assert_eq!(combined, Rect::new(0.0, 0.0, 130.0, 120.0));
    /// ```
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }

    /// Checks whether `child` lies within this rectangle expanded by
    /// `tolerance` on every side.
    ///
    /// Degenerate children (zero or negative extent) are evaluated with the
    /// same edge arithmetic as any other rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// # use enclave_core::geometry::Rect;
    /// let container = Rect::new(0.0, 0.0, 200.0, 100.0);
    ///
    /// assert!(container.contains(&Rect::new(10.0, 10.0, 50.0, 50.0), 0.0));
    /// assert!(!container.contains(&Rect::new(180.0, 10.0, 30.0, 20.0), 0.0));
    /// assert!(container.contains(&Rect::new(180.0, 10.0, 30.0, 20.0), 10.0));
    /// ```
    pub fn contains(&self, child: &Rect, tolerance: f32) -> bool {
        child.x >= self.x - tolerance
            && child.y >= self.y - tolerance
            && child.right() <= self.right() + tolerance
            && child.bottom() <= self.bottom() + tolerance
    }

    /// Checks whether a point lies within this rectangle expanded by `tolerance`.
    pub fn contains_point(&self, point: Point, tolerance: f32) -> bool {
        point.x >= self.x - tolerance
            && point.y >= self.y - tolerance
            && point.x <= self.right() + tolerance
            && point.y <= self.bottom() + tolerance
    }

    /// Positions `self` inside `container`, keeping its size.
    ///
    /// On each axis the origin is clamped to
    /// `[container.min, container.max - extent]`. When `self` is larger than
    /// the container on an axis, it is pinned to the container's origin on
    /// that axis and still overflows on the far side.
    ///
    /// # Examples
    ///
    /// ```
    /// # use enclave_core::geometry::Rect;
    /// let container = Rect::new(0.0, 0.0, 200.0, 100.0);
    ///
    /// let clamped = Rect::new(150.0, 80.0, 100.0, 50.0).clamp_to(&container);
    /// assert_eq!(clamped, Rect::new(100.0, 50.0, 100.0, 50.0));
    ///
    /// // Wider than the container: pinned to its left edge
    /// let wide = Rect::new(40.0, 10.0, 300.0, 20.0).clamp_to(&container);
    /// assert_eq!(wide.x(), 0.0);
    /// ```
    pub fn clamp_to(&self, container: &Rect) -> Rect {
        let x = clamp_axis(self.x, self.width, container.x, container.width);
        let y = clamp_axis(self.y, self.height, container.y, container.height);
        self.with_origin(Point::new(x, y))
    }
}

fn clamp_axis(start: f32, extent: f32, container_start: f32, container_extent: f32) -> f32 {
    if extent > container_extent {
        return container_start;
    }
    start
        .max(container_start)
        .min(container_start + container_extent - extent)
}

/// Represents padding or margin values for the four sides of a rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates a new insets with individual values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates a new insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Creates insets that only pad the top and bottom sides
    pub fn vertical(value: f32) -> Self {
        Self::new(value, 0.0, value, 0.0)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}
