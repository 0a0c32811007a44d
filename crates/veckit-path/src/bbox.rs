//! Bare, total, and transformed bounding boxes for an atom list.
//!
//! The bare box scans atoms once. Bezier segments contribute the midpoints
//! between consecutive control/anchor points — a cheap convex-hull style
//! overestimate that always contains the true curve. Arcs get an exact local
//! box from their endpoints plus any axis-crossing angles, conservatively
//! rotated back to user space.

use std::f64::consts::PI;

use crate::arc::{endpoint_to_central, ArcForm, CentralArcPars};
use crate::atom::{Atom, AtomList};
use crate::geom::{PathPoint, PathRect, TMatrix};
use crate::style::Style;

/// Bounding box of the path geometry itself, ignoring stroke width.
pub fn bare_bbox(list: &AtomList) -> PathRect {
    let mut rect = PathRect::EMPTY;
    let mut cur = PathPoint::default();

    for atom in list {
        match *atom {
            Atom::Move { x, y } | Atom::Line { x, y } | Atom::Close { x, y } => {
                cur = PathPoint::new(x, y);
                rect.add_point(cur);
            }
            Atom::QuadCurve { cx, cy, x, y } => {
                let ctrl = PathPoint::new(cx, cy);
                let end = PathPoint::new(x, y);
                rect.add_point(cur.midpoint(ctrl));
                rect.add_point(ctrl.midpoint(end));
                rect.add_point(end);
                cur = end;
            }
            Atom::CubicCurve {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => {
                let c1 = PathPoint::new(c1x, c1y);
                let c2 = PathPoint::new(c2x, c2y);
                let end = PathPoint::new(x, y);
                rect.add_point(cur.midpoint(c1));
                rect.add_point(c1.midpoint(c2));
                rect.add_point(c2.midpoint(end));
                rect.add_point(end);
                cur = end;
            }
            Atom::Arc {
                rx,
                ry,
                angle,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let end = PathPoint::new(x, y);
                match endpoint_to_central(cur.x, cur.y, x, y, rx, ry, angle, large_arc, sweep) {
                    ArcForm::Skip | ArcForm::StraightLine => {}
                    ArcForm::Central(pars) => add_arc_bbox(&mut rect, &pars),
                }
                rect.add_point(end);
                cur = end;
            }
            Atom::Ellipse { cx, cy, rx, ry } => {
                rect.add_point(PathPoint::new(cx - rx, cy - ry));
                rect.add_point(PathPoint::new(cx + rx, cy + ry));
                cur = PathPoint::new(cx + rx, cy);
            }
            Atom::Rect { x, y, w, h } => {
                rect.add_point(PathPoint::new(x, y));
                rect.add_point(PathPoint::new(x + w, y + h));
                cur = PathPoint::new(x, y);
            }
        }
    }
    rect
}

/// Exact bbox of one arc in its local frame, then rotated out by phi.
///
/// Tests the arc endpoints plus every multiple of PI/2 crossed by the swept
/// interval, builds the axis-aligned local box, and unions the four rotated
/// corners into `rect`. Exact for unrotated arcs; a rotated local box is a
/// conservative hull otherwise.
fn add_arc_bbox(rect: &mut PathRect, pars: &CentralArcPars) {
    let t0 = pars.theta1;
    let t1 = pars.theta1 + pars.dtheta;
    let lo = t0.min(t1);
    let hi = t0.max(t1);

    let mut local = PathRect::EMPTY;
    let mut add_local = |theta: f64| {
        local.add_point(PathPoint::new(
            pars.rx * theta.cos(),
            pars.ry * theta.sin(),
        ));
    };
    add_local(t0);
    add_local(t1);
    for quadrant in 0..4 {
        let base = quadrant as f64 * PI / 2.0;
        let mut k = ((lo - base) / (2.0 * PI)).ceil();
        while base + k * 2.0 * PI <= hi {
            add_local(base + k * 2.0 * PI);
            k += 1.0;
        }
    }

    let (sin_phi, cos_phi) = pars.phi.sin_cos();
    for &(lx, ly) in &[
        (local.x1, local.y1),
        (local.x2, local.y1),
        (local.x2, local.y2),
        (local.x1, local.y2),
    ] {
        rect.add_point(PathPoint::new(
            pars.cx + lx * cos_phi - ly * sin_phi,
            pars.cy + lx * sin_phi + ly * cos_phi,
        ));
    }
}

/// Expands the bare box for stroke geometry and rasterizer rounding.
///
/// A present stroke widens every side by `max(width, 1.0)`; a fixed fudge
/// margin (1 unit, 2 with antialiasing) is always added. Miter-join
/// overshoot beyond the stroke width is a documented limitation and is not
/// modeled here.
pub fn total_bbox(bare: &PathRect, style: &Style, antialiased: bool) -> PathRect {
    if bare.is_empty() {
        return PathRect::EMPTY;
    }
    let stroke_margin = match &style.stroke {
        Some(stroke) => stroke.width.max(1.0),
        None => 0.0,
    };
    let fudge = if antialiased { 2.0 } else { 1.0 };
    bare.expanded(stroke_margin + fudge)
}

/// Maps all four corners of `total` through `matrix` and returns their
/// axis-aligned enclosing box — correct but not tight for rotations.
pub fn transformed_bbox(total: &PathRect, matrix: &TMatrix) -> PathRect {
    if total.is_empty() {
        return PathRect::EMPTY;
    }
    let mut rect = PathRect::EMPTY;
    for &(x, y) in &[
        (total.x1, total.y1),
        (total.x2, total.y1),
        (total.x2, total.y2),
        (total.x1, total.y2),
    ] {
        rect.add_point(matrix.apply(PathPoint::new(x, y)));
    }
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::{flatten_subpath, FlatBuffer};
    use crate::parser::parse;

    #[test]
    fn test_polyline_bbox() {
        let list = parse("M 0 0 L 10 0 L 10 10 L 0 10 Z").unwrap().atoms;
        assert_eq!(bare_bbox(&list), PathRect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_empty_list_bbox_is_sentinel() {
        assert!(bare_bbox(&AtomList::new()).is_empty());
    }

    #[test]
    fn test_curve_bbox_contains_flattened_vertices() {
        let list = parse("M 0 0 C 0 20 10 -20 10 0 Q -8 4 0 8").unwrap().atoms;
        let bbox = bare_bbox(&list);
        let mut buf = FlatBuffer::new();
        flatten_subpath(list.atoms(), 0, &TMatrix::IDENTITY, &mut buf);
        for v in buf.iter() {
            assert!(
                bbox.contains_point(*v),
                "vertex {:?} escapes bbox {:?}",
                v,
                bbox
            );
        }
    }

    #[test]
    fn test_arc_bbox_is_exact_for_unrotated_arcs() {
        // Sweep-positive semicircle from (0,0) to (10,0) dips to y = -5.
        let list = parse("M 0 0 A 5 5 0 0 1 10 0").unwrap().atoms;
        let bbox = bare_bbox(&list);
        assert!((bbox.x1 - 0.0).abs() < 1e-9);
        assert!((bbox.x2 - 10.0).abs() < 1e-9);
        assert!((bbox.y1 - (-5.0)).abs() < 1e-9);
        assert!(bbox.y2.abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_arc_bbox_uses_endpoints() {
        let list = parse("M 0 0 A 0 5 0 0 1 10 3").unwrap().atoms;
        assert_eq!(bare_bbox(&list), PathRect::new(0.0, 0.0, 10.0, 3.0));
    }

    #[test]
    fn test_total_bbox_stroke_and_fudge() {
        let bare = PathRect::new(0.0, 0.0, 10.0, 10.0);
        let style = Style::stroked(4.0);
        assert_eq!(
            total_bbox(&bare, &style, false),
            PathRect::new(-5.0, -5.0, 15.0, 15.0)
        );
        // Hairline strokes still get the 1-unit minimum, and antialiasing
        // doubles the fudge margin.
        let style = Style::stroked(0.1);
        assert_eq!(
            total_bbox(&bare, &style, true),
            PathRect::new(-3.0, -3.0, 13.0, 13.0)
        );
    }

    #[test]
    fn test_total_bbox_without_stroke_only_fudges() {
        let bare = PathRect::new(0.0, 0.0, 10.0, 10.0);
        let style = Style::filled(Default::default());
        assert_eq!(
            total_bbox(&bare, &style, false),
            PathRect::new(-1.0, -1.0, 11.0, 11.0)
        );
    }

    #[test]
    fn test_transformed_bbox_rotation_hull() {
        let total = PathRect::new(0.0, 0.0, 10.0, 10.0);
        let got = transformed_bbox(&total, &TMatrix::rotation(45.0));
        let half_diag = 5.0 * std::f64::consts::SQRT_2;
        assert!((got.x1 + half_diag).abs() < 1e-9);
        assert!((got.x2 - half_diag).abs() < 1e-9);
        assert!(got.y1.abs() < 1e-9);
        assert!((got.y2 - 2.0 * half_diag).abs() < 1e-9);
    }
}
