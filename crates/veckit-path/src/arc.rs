//! Endpoint/center elliptical-arc parameter conversion.
//!
//! Implements the conversion between the endpoint parameterization stored in
//! the atom model and the center parameterization needed for flattening and
//! bounding boxes, following the SVG specification's implementation notes
//! (sections F.6.5 and F.6.6). The center form is always transient: it is
//! derived, consumed, and discarded within a single call.

use std::f64::consts::PI;

use crate::geom::PathPoint;

/// Center parameterization of one elliptical arc segment.
///
/// `theta1` is the start angle and `dtheta` the signed angular extent, both
/// in radians, measured in the ellipse's local (rotated by `phi`) frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralArcPars {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
    pub theta1: f64,
    pub dtheta: f64,
    /// X-axis rotation in radians.
    pub phi: f64,
}

impl CentralArcPars {
    /// The point on the arc at local angle `theta`.
    pub fn point_at(&self, theta: f64) -> PathPoint {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_t, cos_t) = theta.sin_cos();
        PathPoint::new(
            self.cx + self.rx * cos_t * cos_phi - self.ry * sin_t * sin_phi,
            self.cy + self.rx * cos_t * sin_phi + self.ry * sin_t * cos_phi,
        )
    }
}

/// Outcome of converting an endpoint-form arc to center form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcForm {
    /// A well-formed arc with its derived center parameterization.
    Central(CentralArcPars),
    /// A zero radius collapses the arc to a straight segment.
    StraightLine,
    /// Identical endpoints: the arc contributes nothing.
    Skip,
}

/// Endpoint form of an arc, as reproduced by [`central_to_endpoint`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointArcPars {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub rx: f64,
    pub ry: f64,
    /// X-axis rotation in degrees.
    pub angle: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// Converts an endpoint-parameterized arc to center parameterization.
///
/// Degenerate inputs are ordinary outcomes, not errors: identical endpoints
/// yield [`ArcForm::Skip`] and a zero radius yields [`ArcForm::StraightLine`].
/// Radii too small for the chord are scaled up uniformly by the minimal
/// factor that admits a solution. The returned extent satisfies
/// `|dtheta| <= 2*PI`, with `dtheta > 0` exactly when `sweep` is set.
#[allow(clippy::too_many_arguments)]
pub fn endpoint_to_central(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    rx: f64,
    ry: f64,
    angle_deg: f64,
    large_arc: bool,
    sweep: bool,
) -> ArcForm {
    if x1 == x2 && y1 == y2 {
        return ArcForm::Skip;
    }
    if rx == 0.0 || ry == 0.0 {
        return ArcForm::StraightLine;
    }

    let mut rx = rx.abs();
    let mut ry = ry.abs();
    let phi = angle_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Step 1: half-chord vector rotated into the ellipse's local frame.
    let dx2 = (x1 - x2) / 2.0;
    let dy2 = (y1 - y2) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    // Step 2: scale radii up if the chord cannot fit the requested ellipse.
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    // Step 3: center in the local frame.
    let rx_sq = rx * rx;
    let ry_sq = ry * ry;
    let x1p_sq = x1p * x1p;
    let y1p_sq = y1p * y1p;
    let num = rx_sq * ry_sq - rx_sq * y1p_sq - ry_sq * x1p_sq;
    let den = rx_sq * y1p_sq + ry_sq * x1p_sq;
    // Rounding can push the radicand a hair negative after the scale-up.
    let radicand = (num / den).max(0.0);
    let coef = if large_arc != sweep {
        radicand.sqrt()
    } else {
        -radicand.sqrt()
    };
    let cxp = coef * (rx * y1p / ry);
    let cyp = coef * -(ry * x1p / rx);

    // Step 4: center back in user space.
    let cx = cos_phi * cxp - sin_phi * cyp + (x1 + x2) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (y1 + y2) / 2.0;

    // Step 5: start angle and signed extent.
    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;

    let theta1 = uy.atan2(ux);
    let mut dtheta = vy.atan2(vx) - theta1;
    if !sweep && dtheta > 0.0 {
        dtheta -= 2.0 * PI;
    } else if sweep && dtheta < 0.0 {
        dtheta += 2.0 * PI;
    }

    ArcForm::Central(CentralArcPars {
        cx,
        cy,
        rx,
        ry,
        theta1,
        dtheta,
        phi,
    })
}

/// Reproduces the endpoint parameterization from a center parameterization.
///
/// Exact algebraic inverse of [`endpoint_to_central`], used for consistency
/// checks rather than on the rendering path. The derived `large_arc` flag is
/// `|dtheta| > PI` and `sweep` is `dtheta > 0`.
pub fn central_to_endpoint(pars: &CentralArcPars) -> EndpointArcPars {
    let start = pars.point_at(pars.theta1);
    let end = pars.point_at(pars.theta1 + pars.dtheta);
    EndpointArcPars {
        x1: start.x,
        y1: start.y,
        x2: end.x,
        y2: end.y,
        rx: pars.rx,
        ry: pars.ry,
        angle: pars.phi.to_degrees(),
        large_arc: pars.dtheta.abs() > PI,
        sweep: pars.dtheta > 0.0,
    }
}
