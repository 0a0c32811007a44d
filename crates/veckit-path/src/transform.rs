//! In-place translate and scale over an atom list.
//!
//! Both operations are O(n) single passes mutating every coordinate field.
//! Callers own any cached flattened or bounding-box data derived from the
//! list and must invalidate it after either operation; the kernel caches
//! nothing across calls.

use crate::atom::{Atom, AtomList};

impl AtomList {
    /// Adds `(dx, dy)` to every coordinate of every atom.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for atom in self.atoms_mut() {
            match atom {
                Atom::Move { x, y }
                | Atom::Line { x, y }
                | Atom::Close { x, y }
                | Atom::Arc { x, y, .. }
                | Atom::Rect { x, y, .. } => {
                    *x += dx;
                    *y += dy;
                }
                Atom::QuadCurve { cx, cy, x, y } => {
                    *cx += dx;
                    *cy += dy;
                    *x += dx;
                    *y += dy;
                }
                Atom::CubicCurve {
                    c1x,
                    c1y,
                    c2x,
                    c2y,
                    x,
                    y,
                } => {
                    *c1x += dx;
                    *c1y += dy;
                    *c2x += dx;
                    *c2y += dy;
                    *x += dx;
                    *y += dy;
                }
                Atom::Ellipse { cx, cy, .. } => {
                    *cx += dx;
                    *cy += dy;
                }
            }
        }
    }

    /// Scales every coordinate about `(ox, oy)`: `v' = origin + s * (v - origin)`.
    ///
    /// Arc radii scale independently (`sx` for rx, `sy` for ry) while the
    /// rotation angle is left alone. For a non-uniform scale of a rotated
    /// arc this is a known approximation: the true image of such an ellipse
    /// is generally not expressible as an arc with the same rotation, and
    /// the resulting distortion is accepted rather than re-fitted.
    pub fn scale(&mut self, ox: f64, oy: f64, sx: f64, sy: f64) {
        let fx = |x: &mut f64| *x = ox + sx * (*x - ox);
        let fy = |y: &mut f64| *y = oy + sy * (*y - oy);
        for atom in self.atoms_mut() {
            match atom {
                Atom::Move { x, y } | Atom::Line { x, y } | Atom::Close { x, y } => {
                    fx(x);
                    fy(y);
                }
                Atom::QuadCurve { cx, cy, x, y } => {
                    fx(cx);
                    fy(cy);
                    fx(x);
                    fy(y);
                }
                Atom::CubicCurve {
                    c1x,
                    c1y,
                    c2x,
                    c2y,
                    x,
                    y,
                } => {
                    fx(c1x);
                    fy(c1y);
                    fx(c2x);
                    fy(c2y);
                    fx(x);
                    fy(y);
                }
                Atom::Arc {
                    rx, ry, x, y, ..
                } => {
                    *rx *= sx.abs();
                    *ry *= sy.abs();
                    fx(x);
                    fy(y);
                }
                Atom::Ellipse { cx, cy, rx, ry } => {
                    fx(cx);
                    fy(cy);
                    *rx *= sx.abs();
                    *ry *= sy.abs();
                }
                Atom::Rect { x, y, w, h } => {
                    fx(x);
                    fy(y);
                    *w *= sx;
                    *h *= sy;
                }
            }
        }
    }
}
