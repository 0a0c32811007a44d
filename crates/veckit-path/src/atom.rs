//! The atom model: a path as an ordered list of tagged command variants.
//!
//! Every atom carries only its own coordinate payload; atoms never reference
//! each other. An [`AtomList`] is singly owned and freed as a whole when
//! dropped. The first atom of a non-empty parsed list is always [`Atom::Move`];
//! the synthetic [`Atom::Ellipse`] and [`Atom::Rect`] variants only ever
//! appear as throwaway single-atom lists built for primitive shapes.

use serde::{Deserialize, Serialize};

use crate::geom::PathPoint;

/// One primitive path command with its coordinate payload.
///
/// Arcs keep the endpoint parameterization of the path mini-language; the
/// center parameterization is derived transiently by the arc converter and
/// never stored here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Atom {
    /// Start a new subpath at (x, y).
    Move { x: f64, y: f64 },
    /// Straight segment to (x, y).
    Line { x: f64, y: f64 },
    /// Quadratic Bezier with one control point.
    QuadCurve {
        cx: f64,
        cy: f64,
        x: f64,
        y: f64,
    },
    /// Cubic Bezier with two control points.
    CubicCurve {
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    },
    /// Elliptical arc to (x, y) in SVG endpoint form.
    Arc {
        rx: f64,
        ry: f64,
        /// X-axis rotation in degrees.
        angle: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    /// Close the subpath back to its starting point (x, y).
    Close { x: f64, y: f64 },
    /// Synthetic whole ellipse, used only as a single-atom primitive list.
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    /// Synthetic axis-aligned rectangle, used only as a single-atom primitive list.
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
}

impl Atom {
    /// The point at which the pen rests after this atom.
    pub fn end_point(&self) -> PathPoint {
        match *self {
            Atom::Move { x, y }
            | Atom::Line { x, y }
            | Atom::QuadCurve { x, y, .. }
            | Atom::CubicCurve { x, y, .. }
            | Atom::Arc { x, y, .. }
            | Atom::Close { x, y } => PathPoint::new(x, y),
            Atom::Ellipse { cx, cy, rx, .. } => PathPoint::new(cx + rx, cy),
            Atom::Rect { x, y, .. } => PathPoint::new(x, y),
        }
    }

    /// True for the synthetic single-atom primitive variants.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Atom::Ellipse { .. } | Atom::Rect { .. })
    }
}

/// Visitor seam for rendering backends and other full-path consumers.
///
/// The kernel walks the list in order and hands each atom's payload to the
/// matching callback; how the visitor paints (or otherwise consumes) the
/// commands is entirely its business.
pub trait AtomVisitor {
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
    fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64);
    fn arc_to(&mut self, rx: f64, ry: f64, angle: f64, large_arc: bool, sweep: bool, x: f64, y: f64);
    fn close(&mut self, x: f64, y: f64);
    /// Synthetic primitive ellipse. Default ignores it.
    fn ellipse(&mut self, _cx: f64, _cy: f64, _rx: f64, _ry: f64) {}
    /// Synthetic primitive rectangle. Default ignores it.
    fn rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {}
}

/// An ordered, singly-owned sequence of atoms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtomList {
    atoms: Vec<Atom>,
}

impl AtomList {
    pub fn new() -> Self {
        Self { atoms: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            atoms: Vec::with_capacity(capacity),
        }
    }

    /// Builds a single-atom primitive rectangle list.
    pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            atoms: vec![Atom::Rect { x, y, w, h }],
        }
    }

    /// Builds a single-atom primitive ellipse list.
    pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Self {
            atoms: vec![Atom::Ellipse { cx, cy, rx, ry }],
        }
    }

    /// Builds an open polyline through the given points.
    pub fn polyline(points: &[PathPoint]) -> Self {
        let mut list = Self::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                list.push(Atom::Move { x: p.x, y: p.y });
            } else {
                list.push(Atom::Line { x: p.x, y: p.y });
            }
        }
        list
    }

    /// Builds a closed polygon through the given points.
    pub fn polygon(points: &[PathPoint]) -> Self {
        let mut list = Self::polyline(points);
        if let Some(first) = points.first() {
            list.push(Atom::Close {
                x: first.x,
                y: first.y,
            });
        }
        list
    }

    pub fn push(&mut self, atom: Atom) {
        debug_assert!(
            !self.atoms.is_empty()
                || matches!(atom, Atom::Move { .. })
                || atom.is_synthetic(),
            "a list must open with a Move or be a synthetic primitive"
        );
        self.atoms.push(atom);
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atoms_mut(&mut self) -> &mut [Atom] {
        &mut self.atoms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    /// The point the path starts at, if any.
    pub fn first_point(&self) -> Option<PathPoint> {
        self.atoms.first().map(|a| match *a {
            Atom::Move { x, y } => PathPoint::new(x, y),
            Atom::Ellipse { cx, cy, rx, .. } => PathPoint::new(cx + rx, cy),
            Atom::Rect { x, y, .. } => PathPoint::new(x, y),
            other => other.end_point(),
        })
    }

    /// Iterates over the start index of each subpath.
    ///
    /// A subpath is a maximal run beginning at a `Move` atom (or at a
    /// synthetic primitive) and extending up to, excluding, the next `Move`.
    pub fn subpath_starts(&self) -> impl Iterator<Item = usize> + '_ {
        self.atoms.iter().enumerate().filter_map(|(i, a)| {
            if i == 0 || matches!(a, Atom::Move { .. }) {
                Some(i)
            } else {
                None
            }
        })
    }

    /// Walks every atom in order, dispatching to the visitor.
    pub fn walk<V: AtomVisitor>(&self, visitor: &mut V) {
        for atom in &self.atoms {
            match *atom {
                Atom::Move { x, y } => visitor.move_to(x, y),
                Atom::Line { x, y } => visitor.line_to(x, y),
                Atom::QuadCurve { cx, cy, x, y } => visitor.quad_to(cx, cy, x, y),
                Atom::CubicCurve {
                    c1x,
                    c1y,
                    c2x,
                    c2y,
                    x,
                    y,
                } => visitor.cubic_to(c1x, c1y, c2x, c2y, x, y),
                Atom::Arc {
                    rx,
                    ry,
                    angle,
                    large_arc,
                    sweep,
                    x,
                    y,
                } => visitor.arc_to(rx, ry, angle, large_arc, sweep, x, y),
                Atom::Close { x, y } => visitor.close(x, y),
                Atom::Ellipse { cx, cy, rx, ry } => visitor.ellipse(cx, cy, rx, ry),
                Atom::Rect { x, y, w, h } => visitor.rect(x, y, w, h),
            }
        }
    }
}

impl<'a> IntoIterator for &'a AtomList {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}
