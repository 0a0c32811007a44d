//! Read-only style inputs consumed by the bounding-box and hit-test passes.
//!
//! Styles are produced by the host's configuration layer; the kernel never
//! mutates one. Only the geometric fields matter here (stroke width, caps,
//! joins, fill rule); colors are carried through for the rendering backend.

use serde::{Deserialize, Serialize};

use crate::geom::TMatrix;

/// 8-bit RGBA color, passed through to the renderer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Stroke end-cap geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CapStyle {
    #[default]
    Butt,
    Round,
    /// Square cap projecting half the stroke width past the endpoint.
    Projecting,
}

/// Stroke join geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoinStyle {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Fill rule for self-intersecting paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillRule {
    /// Inside where the signed ray-crossing count is nonzero.
    #[default]
    NonZero,
    /// Inside where the raw ray-crossing count is odd.
    EvenOdd,
}

/// Stroke parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub opacity: f64,
    pub cap: CapStyle,
    pub join: JoinStyle,
    pub miter_limit: f64,
    /// On/off dash lengths; `None` draws solid.
    pub dash: Option<Vec<f64>>,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            opacity: 1.0,
            cap: CapStyle::default(),
            join: JoinStyle::default(),
            miter_limit: 4.0,
            dash: None,
        }
    }
}

impl Stroke {
    pub fn with_width(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }
}

/// Fill parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub color: Color,
    pub opacity: f64,
    pub rule: FillRule,
}

impl Default for Fill {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            opacity: 1.0,
            rule: FillRule::default(),
        }
    }
}

impl Fill {
    pub fn with_rule(rule: FillRule) -> Self {
        Self {
            rule,
            ..Self::default()
        }
    }
}

/// The full read-only style for one path item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    pub stroke: Option<Stroke>,
    pub fill: Option<Fill>,
    /// Item transform applied when flattening and hit-testing.
    pub matrix: Option<TMatrix>,
}

impl Style {
    /// Stroke-only style with the given width.
    pub fn stroked(width: f64) -> Self {
        Self {
            stroke: Some(Stroke::with_width(width)),
            ..Self::default()
        }
    }

    /// Fill-only style with the given rule.
    pub fn filled(rule: FillRule) -> Self {
        Self {
            fill: Some(Fill::with_rule(rule)),
            ..Self::default()
        }
    }

    /// The transform to flatten with; identity when the style has none.
    pub fn matrix_or_identity(&self) -> TMatrix {
        self.matrix.unwrap_or(TMatrix::IDENTITY)
    }
}
