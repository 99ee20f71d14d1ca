//! Integer geometry for element placement and hit-testing.
//!
//! Everything is in whole pixels. There is no layout solver: positions come
//! from the caller and are only clamped against the parent's bounds.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A 2D vector with integer components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vec2i {
    /// X component.
    pub x: i32,
    /// Y component.
    pub y: i32,
}

impl Vec2i {
    /// The origin.
    pub const ZERO: Self = Self::new(0, 0);

    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Creates a vector with both components set to `n`.
    #[must_use]
    pub const fn splat(n: i32) -> Self {
        Self::new(n, n)
    }

    /// Clamps each component into `[min, max]`.
    ///
    /// Never panics: when `min > max` on an axis the result is `max`.
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(self.x.max(min.x).min(max.x), self.y.max(min.y).min(max.y))
    }

    /// Converts to floating point components.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f32(self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }
}

impl From<(i32, i32)> for Vec2i {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vec2i {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2i {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2i {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vec2i {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec2i {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// X position (left edge).
    pub x: i32,
    /// Y position (top edge).
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle from position and size.
    #[must_use]
    pub const fn from_pos_size(position: Vec2i, size: Vec2i) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Returns the top-left corner.
    #[must_use]
    pub const fn position(&self) -> Vec2i {
        Vec2i::new(self.x, self.y)
    }

    /// Returns the size.
    #[must_use]
    pub const fn size(&self) -> Vec2i {
        Vec2i::new(self.width, self.height)
    }

    /// Returns the right edge.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns true if the point lies inside the rectangle, edges included.
    ///
    /// A zero-sized rect still contains its own corner.
    #[must_use]
    pub const fn contains(&self, point: Vec2i) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Shrinks the rectangle by the given amount on all sides.
    #[must_use]
    pub const fn shrink(&self, amount: i32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.width - amount * 2,
            self.height - amount * 2,
        )
    }
}
