//! Geometry primitives.
//!
//! Scene coordinates have Y increasing upward, so a [`Rect`] origin is its
//! lower-left corner. Points are `glam::DVec2`.

use glam::DVec2;

/// Default tolerance used to classify configured lengths.
pub const EPSILON: f64 = 0.001;

/// Width and height of an item.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Size as a vector (width, height).
    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

impl From<DVec2> for Size {
    fn from(v: DVec2) -> Self {
        Size::new(v.x, v.y)
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Bottom edge
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rect from its lower-left corner and size.
    pub fn from_origin_size(origin: DVec2, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge.
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge.
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a point is inside the rect, edges included.
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.x && point.x <= self.max_x() && point.y >= self.y && point.y <= self.max_y()
    }

    /// Smallest rect enclosing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = self.max_x().max(other.max_x());
        let y2 = self.max_y().max(other.max_y());
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Shrink by a uniform amount on every side.
    pub fn inset(&self, amount: f64) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            self.width - 2.0 * amount,
            self.height - 2.0 * amount,
        )
    }
}

/// Axis-aligned bounds of a `size` rectangle after rotating it by `theta` radians.
pub fn bounds_for_rotation(size: Size, theta: f64) -> Size {
    let (sin, cos) = theta.sin_cos();
    Size::new(
        (size.width * cos).abs() + (size.height * sin).abs(),
        (size.width * sin).abs() + (size.height * cos).abs(),
    )
}

/// Sizing policy of a configured cell length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LengthSpec {
    /// A constant length.
    Fixed(f64),
    /// Size to the content.
    Fit,
    /// Proportional share of the remaining space, with the given weight.
    Fill(f64),
}

impl LengthSpec {
    /// Classify a configured value: positive is fixed, zero is fit, negative is fill.
    pub fn classify(value: f64, epsilon: f64) -> Self {
        if value > epsilon {
            LengthSpec::Fixed(value)
        } else if value < -epsilon {
            LengthSpec::Fill(-value)
        } else {
            LengthSpec::Fit
        }
    }
}

/// Element at `index`, else the last element, else `default`.
pub fn repeat_last<T: Copy>(values: &[T], index: usize, default: T) -> T {
    values
        .get(index)
        .or_else(|| values.last())
        .copied()
        .unwrap_or(default)
}
