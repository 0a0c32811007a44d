//! # VecKit Path
//!
//! Toolkit-agnostic geometry kernel for SVG-style vector paths. This crate
//! turns a textual path description into a structured atom list and answers
//! the geometric questions a 2D canvas needs for picking and layout:
//!
//! - **Parser**: the path mini-language (`M m L l H h V v C c S s Q q T t
//!   A a Z z`) to an [`AtomList`], with implicit command repetition,
//!   smooth-curve control reflection, and greedy H/V folding.
//! - **Arc converter**: endpoint to center ellipse-arc parameterization per
//!   the SVG specification's implementation notes, degenerate cases handled
//!   as ordinary control flow.
//! - **Transforms**: in-place translate and scale over an atom list.
//! - **Flattener**: polyline approximations of curves and arcs, plus a
//!   sizing pass for buffer reuse.
//! - **Bounding boxes**: bare, stroke-expanded total, and matrix-transformed
//!   rectangles.
//! - **Hit testing**: point-distance and area-classification queries that
//!   respect fill rules and stroke geometry.
//!
//! The kernel never touches a window, a graphics context, or an event loop.
//! Rendering backends walk the same atom list through [`AtomVisitor`] and
//! issue their own drawing calls; styles arrive read-only from the host's
//! configuration layer. Every operation here is synchronous, deterministic,
//! and allocation-light: the flattener's scratch buffer is per-call, so the
//! whole crate is trivially usable from multiple threads.

pub mod arc;
pub mod atom;
pub mod bbox;
pub mod error;
pub mod flatten;
pub mod geom;
pub mod hittest;
pub mod parser;
pub mod style;
mod transform;

pub use arc::{central_to_endpoint, endpoint_to_central, ArcForm, CentralArcPars, EndpointArcPars};
pub use atom::{Atom, AtomList, AtomVisitor};
pub use bbox::{bare_bbox, total_bbox, transformed_bbox};
pub use error::{ParseError, Result};
pub use flatten::{
    flatten_subpath, max_segments_for_path, FlatBuffer, SubpathShape, CUBIC_FLATTEN_STEPS,
    QUAD_FLATTEN_STEPS,
};
pub use geom::{PathPoint, PathRect, TMatrix};
pub use hittest::{area_query, point_query, AreaHit, THIN_STROKE_MAX_WIDTH, TINY_SHAPE_RADIUS};
pub use parser::{normalize, parse, parse_tokens, tokenize, ParsedPath};
pub use style::{CapStyle, Color, Fill, FillRule, JoinStyle, Stroke, Style};
