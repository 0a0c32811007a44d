//! Flattens path subpaths into polyline vertex arrays for hit-testing.
//!
//! Curves are sampled at fixed parameter counts (18 steps for cubics, 12 for
//! quadratics, evaluated directly from the Bernstein form); arcs get a
//! vertex count proportional to their angular extent and size. Every output
//! vertex is transformed individually — ellipse parameters are never pushed
//! through the matrix, because an arbitrary affine image of an ellipse is
//! not representable in the same arc parameterization.

use smallvec::SmallVec;

use crate::arc::{endpoint_to_central, ArcForm, CentralArcPars};
use crate::atom::{Atom, AtomList};
use crate::geom::{PathPoint, TMatrix};

/// Fixed sample count for cubic curves.
pub const CUBIC_FLATTEN_STEPS: usize = 18;
/// Fixed sample count for quadratic curves.
pub const QUAD_FLATTEN_STEPS: usize = 12;

/// Inline capacity of the per-call vertex buffer. Small paths flatten
/// without touching the heap; larger ones spill automatically, replacing
/// the fixed shared scratch array of older designs with something each
/// caller (and each thread) owns outright.
pub const FLAT_INLINE_POINTS: usize = 256;

/// Per-call vertex buffer for flattened subpaths.
pub type FlatBuffer = SmallVec<[PathPoint; FLAT_INLINE_POINTS]>;

/// Shape summary of one flattened subpath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubpathShape {
    /// Vertices appended to the buffer by this call.
    pub vertex_count: usize,
    /// Stroke segments: `vertex_count` when closed, one less when open.
    pub segment_count: usize,
    /// True when the subpath ends in a closepath.
    pub closed: bool,
    /// Index of the next subpath's first atom (or the list length).
    pub next: usize,
}

/// Flattens the subpath starting at `start` into `out`, applying `matrix`
/// to every emitted vertex.
///
/// Processing runs from the starting atom up to the next `Move` or the end
/// of the list. Vertices are appended; the caller clears the buffer between
/// queries if it wants one subpath at a time.
pub fn flatten_subpath(
    atoms: &[Atom],
    start: usize,
    matrix: &TMatrix,
    out: &mut FlatBuffer,
) -> SubpathShape {
    let base = out.len();
    let mut cur = PathPoint::default();
    let mut subpath_start = PathPoint::default();
    let mut closed = false;
    let mut seen_curve = false;
    let mut i = start;

    while i < atoms.len() {
        if i > start && matches!(atoms[i], Atom::Move { .. }) {
            break;
        }
        match atoms[i] {
            Atom::Move { x, y } => {
                cur = PathPoint::new(x, y);
                subpath_start = cur;
                out.push(matrix.apply(cur));
            }
            Atom::Line { x, y } => {
                cur = PathPoint::new(x, y);
                out.push(matrix.apply(cur));
                closed = false;
            }
            Atom::QuadCurve { cx, cy, x, y } => {
                let ctrl = PathPoint::new(cx, cy);
                let end = PathPoint::new(x, y);
                if !seen_curve {
                    out.push(matrix.apply(cur));
                    seen_curve = true;
                }
                for k in 1..=QUAD_FLATTEN_STEPS {
                    let t = k as f64 / QUAD_FLATTEN_STEPS as f64;
                    out.push(matrix.apply(quad_point(cur, ctrl, end, t)));
                }
                cur = end;
                closed = false;
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
                if !seen_curve {
                    out.push(matrix.apply(cur));
                    seen_curve = true;
                }
                for k in 1..=CUBIC_FLATTEN_STEPS {
                    let t = k as f64 / CUBIC_FLATTEN_STEPS as f64;
                    out.push(matrix.apply(cubic_point(cur, c1, c2, end, t)));
                }
                cur = end;
                closed = false;
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
                    ArcForm::Skip => {}
                    ArcForm::StraightLine => {
                        out.push(matrix.apply(cur));
                        out.push(matrix.apply(end));
                    }
                    ArcForm::Central(pars) => {
                        let n = arc_vertex_count(&pars);
                        for k in 1..=n {
                            let theta = pars.theta1 + pars.dtheta * (k as f64 / n as f64);
                            out.push(matrix.apply(pars.point_at(theta)));
                        }
                    }
                }
                cur = end;
                closed = false;
            }
            Atom::Close { .. } => {
                cur = subpath_start;
                out.push(matrix.apply(cur));
                closed = true;
            }
            Atom::Ellipse { cx, cy, rx, ry } => {
                let pars = CentralArcPars {
                    cx,
                    cy,
                    rx,
                    ry,
                    theta1: 0.0,
                    dtheta: 2.0 * std::f64::consts::PI,
                    phi: 0.0,
                };
                let n = arc_vertex_count(&pars);
                for k in 0..n {
                    let theta = pars.dtheta * (k as f64 / n as f64);
                    out.push(matrix.apply(pars.point_at(theta)));
                }
                cur = PathPoint::new(cx + rx, cy);
                subpath_start = cur;
                closed = true;
            }
            Atom::Rect { x, y, w, h } => {
                out.push(matrix.apply(PathPoint::new(x, y)));
                out.push(matrix.apply(PathPoint::new(x + w, y)));
                out.push(matrix.apply(PathPoint::new(x + w, y + h)));
                out.push(matrix.apply(PathPoint::new(x, y + h)));
                cur = PathPoint::new(x, y);
                subpath_start = cur;
                closed = true;
            }
        }
        i += 1;
    }

    let vertex_count = out.len() - base;
    SubpathShape {
        vertex_count,
        segment_count: if closed {
            vertex_count
        } else {
            vertex_count.saturating_sub(1)
        },
        closed,
        next: i,
    }
}

/// Walks the whole list once, summing worst-case vertex counts per subpath,
/// so a caller can size one reusable buffer instead of reallocating per
/// query. No coordinates are written.
pub fn max_segments_for_path(list: &AtomList) -> usize {
    let mut total = 0usize;
    let mut cur = PathPoint::default();
    let mut seen_curve = false;

    for atom in list {
        match *atom {
            Atom::Move { x, y } => {
                cur = PathPoint::new(x, y);
                seen_curve = false;
                total += 1;
            }
            Atom::Line { .. } | Atom::Close { .. } => {
                cur = atom.end_point();
                total += 1;
            }
            Atom::QuadCurve { x, y, .. } => {
                if !seen_curve {
                    total += 1;
                    seen_curve = true;
                }
                total += QUAD_FLATTEN_STEPS;
                cur = PathPoint::new(x, y);
            }
            Atom::CubicCurve { x, y, .. } => {
                if !seen_curve {
                    total += 1;
                    seen_curve = true;
                }
                total += CUBIC_FLATTEN_STEPS;
                cur = PathPoint::new(x, y);
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
                match endpoint_to_central(cur.x, cur.y, x, y, rx, ry, angle, large_arc, sweep) {
                    ArcForm::Skip => {}
                    ArcForm::StraightLine => total += 2,
                    ArcForm::Central(pars) => total += arc_vertex_count(&pars),
                }
                cur = PathPoint::new(x, y);
            }
            Atom::Ellipse { cx, cy, rx, ry } => {
                let pars = CentralArcPars {
                    cx,
                    cy,
                    rx,
                    ry,
                    theta1: 0.0,
                    dtheta: 2.0 * std::f64::consts::PI,
                    phi: 0.0,
                };
                total += arc_vertex_count(&pars);
                cur = PathPoint::new(cx + rx, cy);
            }
            Atom::Rect { x, y, .. } => {
                total += 4;
                cur = PathPoint::new(x, y);
            }
        }
    }
    total
}

/// Vertex budget for one central-form arc: at least 4, one vertex per 5
/// degrees of extent, and more for large radii so the chord error stays
/// bounded.
fn arc_vertex_count(pars: &CentralArcPars) -> usize {
    let extent = pars.dtheta.abs();
    let by_angle = (extent.to_degrees() / 5.0).ceil() as usize;
    let by_size = (0.5 * (pars.rx + pars.ry) * extent / 50.0).ceil() as usize;
    by_angle.max(by_size).max(4)
}

fn quad_point(p0: PathPoint, c: PathPoint, p1: PathPoint, t: f64) -> PathPoint {
    let u = 1.0 - t;
    PathPoint::new(
        u * u * p0.x + 2.0 * u * t * c.x + t * t * p1.x,
        u * u * p0.y + 2.0 * u * t * c.y + t * t * p1.y,
    )
}

fn cubic_point(p0: PathPoint, c1: PathPoint, c2: PathPoint, p1: PathPoint, t: f64) -> PathPoint {
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;
    PathPoint::new(
        uu * u * p0.x + 3.0 * uu * t * c1.x + 3.0 * u * tt * c2.x + tt * t * p1.x,
        uu * u * p0.y + 3.0 * uu * t * c1.y + 3.0 * u * tt * c2.y + tt * t * p1.y,
    )
}
