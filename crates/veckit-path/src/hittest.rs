//! Point-distance and area-classification queries over a styled path.
//!
//! Both queries drive the segment flattener per subpath and work purely on
//! the resulting polylines. Fill resolution accumulates even-odd and
//! nonzero-winding ray crossings in the same pass that measures outline
//! distance; stroke geometry is approximated for thin strokes and modeled
//! segment-by-segment (caps and joins included) for thick ones.

use tracing::trace;

use crate::bbox::bare_bbox;
use crate::flatten::{flatten_subpath, FlatBuffer};
use crate::atom::AtomList;
use crate::geom::{PathPoint, PathRect};
use crate::style::{CapStyle, FillRule, JoinStyle, Stroke, Style};

/// Strokes up to this width use the cheap centerline approximation; wider
/// strokes additionally get the exact cap/join model.
pub const THIN_STROKE_MAX_WIDTH: f64 = 4.0;

/// Shapes whose bare bbox radius is at most this short-circuit to a
/// center-distance heuristic.
pub const TINY_SHAPE_RADIUS: f64 = 2.0;

/// Result of classifying a path against a query rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum AreaHit {
    /// The path lies entirely outside the rectangle.
    Outside = -1,
    /// The path crosses the rectangle boundary (or encloses it).
    Overlapping = 0,
    /// The path lies entirely inside the rectangle.
    Inside = 1,
}

impl AreaHit {
    /// Conventional -1 / 0 / 1 encoding.
    pub fn value(self) -> i8 {
        self as i8
    }
}

/// Distance from `point` to the painted region of the path.
///
/// Returns 0.0 when the point is inside the fill (per the style's fill
/// rule) or on/inside the stroke; otherwise the distance to the nearest
/// painted geometry. An empty path is infinitely far away.
pub fn point_query(list: &AtomList, style: &Style, point: PathPoint) -> f64 {
    if list.is_empty() {
        return f64::INFINITY;
    }
    let matrix = style.matrix_or_identity();

    // Tiny shapes are picked by plain proximity to their center.
    let bare = bare_bbox(list);
    let radius = bare.width().max(bare.height()) / 2.0;
    if radius <= TINY_SHAPE_RADIUS {
        let center = matrix.apply(bare.center());
        let d = (point.distance_to(center) - radius).max(0.0);
        trace!(distance = d, "tiny-shape point query");
        return d;
    }

    let atoms = list.atoms();
    let mut best = f64::INFINITY;
    let mut crossings = 0u64;
    let mut winding = 0i64;
    let mut buf = FlatBuffer::new();
    let mut i = 0;

    while i < atoms.len() {
        buf.clear();
        let shape = flatten_subpath(atoms, i, &matrix, &mut buf);
        i = shape.next;
        if shape.vertex_count == 0 {
            continue;
        }
        let verts: &[PathPoint] = &buf;

        let zero_d = polyline_distance(verts, point);
        for s in 0..verts.len() {
            // The virtual closing edge only matters for fill resolution; it
            // is zero-length when the subpath already ends on its start.
            let a = verts[s];
            let b = verts[(s + 1) % verts.len()];
            accumulate_crossings(point, a, b, &mut crossings, &mut winding);
        }

        let subpath_d = match &style.stroke {
            Some(stroke) => {
                let thin = (zero_d - stroke.width / 2.0).max(0.0);
                if stroke.width > THIN_STROKE_MAX_WIDTH {
                    thin.min(thick_stroke_distance(verts, shape.closed, stroke, point))
                } else {
                    thin
                }
            }
            None => zero_d,
        };
        best = best.min(subpath_d);
    }

    if let Some(fill) = &style.fill {
        let inside = match fill.rule {
            FillRule::EvenOdd => crossings % 2 == 1,
            FillRule::NonZero => winding != 0,
        };
        if inside {
            trace!("point query inside fill");
            return 0.0;
        }
    }
    trace!(distance = best, "point query");
    best
}

/// Classifies the painted path against `rect`.
///
/// The answer is seeded from the path's first point and each subpath must
/// agree with the seed; any disagreement means the path straddles the
/// rectangle boundary. A closed subpath that fully encloses the rectangle
/// reports [`AreaHit::Overlapping`] even when only a stroke is present —
/// the closed-polygon containment test is reused regardless of fill, which
/// is the specified (if inconsistent) behavior.
pub fn area_query(list: &AtomList, style: &Style, rect: &PathRect) -> AreaHit {
    let Some(first) = list.first_point() else {
        return AreaHit::Outside;
    };
    let matrix = style.matrix_or_identity();
    let seed = if rect.contains_point(matrix.apply(first)) {
        AreaHit::Inside
    } else {
        AreaHit::Outside
    };

    let half_width = match &style.stroke {
        Some(stroke) if stroke.width > THIN_STROKE_MAX_WIDTH => stroke.width / 2.0,
        _ => 0.0,
    };

    let atoms = list.atoms();
    let mut buf = FlatBuffer::new();
    let mut i = 0;
    while i < atoms.len() {
        buf.clear();
        let shape = flatten_subpath(atoms, i, &matrix, &mut buf);
        i = shape.next;
        if shape.vertex_count == 0 {
            continue;
        }
        let verts: &[PathPoint] = &buf;

        let mut class = polyline_area_class(verts, half_width, rect);
        if class == AreaHit::Outside && (shape.closed || style.fill.is_some()) {
            // Enclosure check via the closed-polygon containment test.
            if polygon_contains(verts, rect.center()) {
                class = AreaHit::Overlapping;
            }
        }
        if class != seed {
            trace!("area query: subpath disagrees with seed");
            return AreaHit::Overlapping;
        }
    }
    trace!(result = seed.value(), "area query");
    seed
}

/// Minimum distance from `p` to the polyline's zero-width outline.
fn polyline_distance(verts: &[PathPoint], p: PathPoint) -> f64 {
    match verts.len() {
        0 => f64::INFINITY,
        1 => p.distance_to(verts[0]),
        _ => verts
            .windows(2)
            .map(|w| segment_distance(p, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Distance from `p` to the segment `a..b`.
fn segment_distance(p: PathPoint, a: PathPoint, b: PathPoint) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);
    p.distance_to(PathPoint::new(a.x + t * dx, a.y + t * dy))
}

/// Rightward ray crossing of the edge `a..b`, counted with the half-open
/// interval convention so a ray through a shared vertex is not counted for
/// both incident edges.
fn accumulate_crossings(
    p: PathPoint,
    a: PathPoint,
    b: PathPoint,
    crossings: &mut u64,
    winding: &mut i64,
) {
    if (a.y > p.y) != (b.y > p.y) {
        let t = (p.y - a.y) / (b.y - a.y);
        let x = a.x + t * (b.x - a.x);
        if x > p.x {
            *crossings += 1;
            *winding += if b.y > a.y { 1 } else { -1 };
        }
    }
}

/// Even-odd containment of a point in the (implicitly closed) polygon.
fn polygon_contains(verts: &[PathPoint], p: PathPoint) -> bool {
    let mut crossings = 0u64;
    let mut winding = 0i64;
    for s in 0..verts.len() {
        let a = verts[s];
        let b = verts[(s + 1) % verts.len()];
        accumulate_crossings(p, a, b, &mut crossings, &mut winding);
    }
    crossings % 2 == 1
}

/// Classifies a (possibly width-inflated) polyline against the rectangle,
/// ignoring enclosure.
fn polyline_area_class(verts: &[PathPoint], half_width: f64, rect: &PathRect) -> AreaHit {
    let inner = rect.expanded(-half_width);
    if !inner.is_empty() && verts.iter().all(|v| inner.contains_point(*v)) {
        return AreaHit::Inside;
    }
    let outer = rect.expanded(half_width);
    let touches = verts.iter().any(|v| outer.contains_point(*v))
        || verts
            .windows(2)
            .any(|w| segment_intersects_rect(w[0], w[1], &outer));
    if touches {
        AreaHit::Overlapping
    } else {
        AreaHit::Outside
    }
}

fn segment_intersects_rect(a: PathPoint, b: PathPoint, rect: &PathRect) -> bool {
    if rect.contains_point(a) || rect.contains_point(b) {
        return true;
    }
    let corners = [
        PathPoint::new(rect.x1, rect.y1),
        PathPoint::new(rect.x2, rect.y1),
        PathPoint::new(rect.x2, rect.y2),
        PathPoint::new(rect.x1, rect.y2),
    ];
    for s in 0..4 {
        if segments_intersect(a, b, corners[s], corners[(s + 1) % 4]) {
            return true;
        }
    }
    false
}

fn segments_intersect(a: PathPoint, b: PathPoint, c: PathPoint, d: PathPoint) -> bool {
    let o1 = orient(a, b, c);
    let o2 = orient(a, b, d);
    let o3 = orient(c, d, a);
    let o4 = orient(c, d, b);
    if ((o1 > 0.0) != (o2 > 0.0) || o1 == 0.0 || o2 == 0.0)
        && ((o3 > 0.0) != (o4 > 0.0) || o3 == 0.0 || o4 == 0.0)
    {
        // Collinear cases need the projection overlap check.
        if o1 == 0.0 && o2 == 0.0 && o3 == 0.0 && o4 == 0.0 {
            let (alo, ahi) = minmax(a.x, b.x);
            let (clo, chi) = minmax(c.x, d.x);
            let (aylo, ayhi) = minmax(a.y, b.y);
            let (cylo, cyhi) = minmax(c.y, d.y);
            return alo <= chi && clo <= ahi && aylo <= cyhi && cylo <= ayhi;
        }
        return true;
    }
    false
}

fn orient(a: PathPoint, b: PathPoint, c: PathPoint) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn minmax(a: f64, b: f64) -> (f64, f64) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Exact distance to a thick stroked polyline: per-segment rectangles with
/// butt/round/projecting end caps and miter/round/bevel join geometry.
/// Returns 0.0 inside the stroked region.
fn thick_stroke_distance(
    verts: &[PathPoint],
    closed: bool,
    stroke: &Stroke,
    p: PathPoint,
) -> f64 {
    let h = stroke.width / 2.0;
    // A closed subpath's buffer repeats the start vertex; drop the duplicate
    // so the wrap-around segment and the join at the start corner are real.
    let verts = if closed && verts.len() > 1 && verts[0] == verts[verts.len() - 1] {
        &verts[..verts.len() - 1]
    } else {
        verts
    };
    let n = verts.len();
    if n == 0 {
        return f64::INFINITY;
    }
    if n == 1 {
        return (p.distance_to(verts[0]) - h).max(0.0);
    }

    let seg_count = if closed { n } else { n - 1 };
    let mut best = f64::INFINITY;

    for s in 0..seg_count {
        let a = verts[s];
        let b = verts[(s + 1) % n];
        let start_cap = !closed && s == 0;
        let end_cap = !closed && s == seg_count - 1;
        let ext_a = if start_cap && stroke.cap == CapStyle::Projecting {
            h
        } else {
            0.0
        };
        let ext_b = if end_cap && stroke.cap == CapStyle::Projecting {
            h
        } else {
            0.0
        };
        best = best.min(stroked_segment_distance(p, a, b, h, ext_a, ext_b));
    }

    if !closed && stroke.cap == CapStyle::Round {
        best = best.min((p.distance_to(verts[0]) - h).max(0.0));
        best = best.min((p.distance_to(verts[n - 1]) - h).max(0.0));
    }

    // Joins: every interior vertex, plus every vertex when closed.
    let join_range: Vec<usize> = if closed {
        (0..n).collect()
    } else {
        (1..n - 1).collect()
    };
    for v_idx in join_range {
        let prev = verts[(v_idx + n - 1) % n];
        let v = verts[v_idx];
        let next = verts[(v_idx + 1) % n];
        best = best.min(join_distance(p, prev, v, next, h, stroke));
        if best == 0.0 {
            break;
        }
    }
    best
}

/// Distance to the rectangle swept by a segment of half-width `h`,
/// optionally extended past either end (projecting caps).
fn stroked_segment_distance(
    p: PathPoint,
    a: PathPoint,
    b: PathPoint,
    h: f64,
    ext_a: f64,
    ext_b: f64,
) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return (p.distance_to(a) - h).max(0.0);
    }
    let ux = dx / len;
    let uy = dy / len;
    let rx = p.x - a.x;
    let ry = p.y - a.y;
    let along = rx * ux + ry * uy;
    let across = (rx * uy - ry * ux).abs();
    let d_along = (-ext_a - along).max(along - (len + ext_b)).max(0.0);
    let d_across = (across - h).max(0.0);
    (d_along * d_along + d_across * d_across).sqrt()
}

/// Distance to the join wedge at vertex `v` between segments `prev..v` and
/// `v..next`.
fn join_distance(
    p: PathPoint,
    prev: PathPoint,
    v: PathPoint,
    next: PathPoint,
    h: f64,
    stroke: &Stroke,
) -> f64 {
    if stroke.join == JoinStyle::Round {
        return (p.distance_to(v) - h).max(0.0);
    }

    let d1 = unit(prev, v);
    let d2 = unit(v, next);
    let (Some(d1), Some(d2)) = (d1, d2) else {
        return f64::INFINITY;
    };
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross == 0.0 {
        // Collinear segments leave no wedge.
        return f64::INFINITY;
    }
    // Outward normals on the turn's outer side.
    let (n1, n2) = if cross > 0.0 {
        (
            PathPoint::new(d1.y, -d1.x),
            PathPoint::new(d2.y, -d2.x),
        )
    } else {
        (
            PathPoint::new(-d1.y, d1.x),
            PathPoint::new(-d2.y, d2.x),
        )
    };
    let c1 = PathPoint::new(v.x + n1.x * h, v.y + n1.y * h);
    let c2 = PathPoint::new(v.x + n2.x * h, v.y + n2.y * h);

    if stroke.join == JoinStyle::Miter {
        let mx = n1.x + n2.x;
        let my = n1.y + n2.y;
        let mlen = (mx * mx + my * my).sqrt();
        if mlen > 1e-12 {
            let bx = mx / mlen;
            let by = my / mlen;
            let cos_half = bx * n1.x + by * n1.y;
            if cos_half > 1e-12 && 1.0 / cos_half <= stroke.miter_limit {
                let tip = PathPoint::new(v.x + bx * h / cos_half, v.y + by * h / cos_half);
                return triangle_distance(p, v, c1, tip).min(triangle_distance(p, v, tip, c2));
            }
        }
        // Over the miter limit (or a hairpin): fall through to bevel.
    }
    triangle_distance(p, v, c1, c2)
}

fn unit(a: PathPoint, b: PathPoint) -> Option<PathPoint> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        None
    } else {
        Some(PathPoint::new(dx / len, dy / len))
    }
}

/// Distance to a filled triangle; 0.0 inside.
fn triangle_distance(p: PathPoint, a: PathPoint, b: PathPoint, c: PathPoint) -> f64 {
    let s1 = orient(a, b, p) < 0.0;
    let s2 = orient(b, c, p) < 0.0;
    let s3 = orient(c, a, p) < 0.0;
    if s1 == s2 && s2 == s3 {
        return 0.0;
    }
    segment_distance(p, a, b)
        .min(segment_distance(p, b, c))
        .min(segment_distance(p, c, a))
}
