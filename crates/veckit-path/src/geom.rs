//! Core geometric value types: points, rectangles, and affine transforms.

use serde::{Deserialize, Serialize};

/// A 2D point in path coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: PathPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Midpoint between this point and another.
    pub fn midpoint(&self, other: PathPoint) -> PathPoint {
        PathPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// An axis-aligned rectangle with `x1 <= x2` and `y1 <= y2` once normalized.
///
/// A freshly accumulating rectangle starts from [`PathRect::EMPTY`], whose
/// inverted infinities mean "no point added yet"; callers must check
/// [`PathRect::is_empty`] or normalize before treating it as real geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl PathRect {
    /// Sentinel for an accumulator that has seen no points.
    pub const EMPTY: PathRect = PathRect {
        x1: f64::INFINITY,
        y1: f64::INFINITY,
        x2: f64::NEG_INFINITY,
        y2: f64::NEG_INFINITY,
    };

    /// Creates a rectangle, normalizing the corner order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// True while the rectangle is still the untouched accumulator sentinel.
    pub fn is_empty(&self) -> bool {
        self.x1 > self.x2 || self.y1 > self.y2
    }

    /// Reorders corners so that `x1 <= x2` and `y1 <= y2`.
    pub fn normalize(&mut self) {
        if self.x1 > self.x2 {
            std::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            std::mem::swap(&mut self.y1, &mut self.y2);
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> PathPoint {
        PathPoint::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Grows the rectangle to include a point.
    pub fn add_point(&mut self, p: PathPoint) {
        self.x1 = self.x1.min(p.x);
        self.y1 = self.y1.min(p.y);
        self.x2 = self.x2.max(p.x);
        self.y2 = self.y2.max(p.y);
    }

    /// Grows the rectangle to include another rectangle.
    pub fn union(&mut self, other: &PathRect) {
        if other.is_empty() {
            return;
        }
        self.x1 = self.x1.min(other.x1);
        self.y1 = self.y1.min(other.y1);
        self.x2 = self.x2.max(other.x2);
        self.y2 = self.y2.max(other.y2);
    }

    /// Expands every side outward by `margin` (negative shrinks).
    pub fn expanded(&self, margin: f64) -> PathRect {
        PathRect {
            x1: self.x1 - margin,
            y1: self.y1 - margin,
            x2: self.x2 + margin,
            y2: self.y2 + margin,
        }
    }

    pub fn contains_point(&self, p: PathPoint) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    pub fn contains_rect(&self, other: &PathRect) -> bool {
        other.x1 >= self.x1 && other.x2 <= self.x2 && other.y1 >= self.y1 && other.y2 <= self.y2
    }

    pub fn intersects(&self, other: &PathRect) -> bool {
        self.x1 <= other.x2 && other.x1 <= self.x2 && self.y1 <= other.y2 && other.y1 <= self.y2
    }
}

/// A 2D affine transform in the conventional (a, b, c, d, tx, ty) layout:
///
/// ```text
/// | x' |   | a  c  tx |   | x |
/// | y' | = | b  d  ty | * | y |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for TMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TMatrix {
    pub const IDENTITY: TMatrix = TMatrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn translation(tx: f64, ty: f64) -> Self {
        TMatrix { tx, ty, ..Self::IDENTITY }
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        TMatrix { a: sx, d: sy, ..Self::IDENTITY }
    }

    /// Counter-clockwise rotation about the origin.
    pub fn rotation(angle_deg: f64) -> Self {
        let rad = angle_deg.to_radians();
        let (sin, cos) = rad.sin_cos();
        TMatrix {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Applies the transform to a point.
    pub fn apply(&self, p: PathPoint) -> PathPoint {
        PathPoint::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// Returns the transform that applies `self` first, then `other`.
    pub fn then(&self, other: &TMatrix) -> TMatrix {
        TMatrix {
            a: other.a * self.a + other.c * self.b,
            b: other.b * self.a + other.d * self.b,
            c: other.a * self.c + other.c * self.d,
            d: other.b * self.c + other.d * self.d,
            tx: other.a * self.tx + other.c * self.ty + other.tx,
            ty: other.b * self.tx + other.d * self.ty + other.ty,
        }
    }
}
