//! Parser for the SVG-style path mini-language.
//!
//! The grammar is the stable wire contract: instruction letters
//! `M m L l H h V v C c S s Q q T t A a Z z` with whitespace/comma separated
//! real-number arguments, and arc arguments in the exact order
//! `rx ry x-axis-rotation large-arc-flag sweep-flag x y`.
//!
//! The parser runs a single left-to-right pass over the token stream with a
//! small state machine (current point, subpath start point, last control
//! point, last instruction). Lowercase instructions are relative to the
//! current point. A bare number repeats the previous instruction, except
//! that a repeated moveto becomes a lineto. Either a complete atom list is
//! produced or a [`ParseError`] is returned with nothing retained.

use tracing::{debug, trace};

use crate::atom::{Atom, AtomList};
use crate::error::{ParseError, Result};
use crate::geom::PathPoint;

/// A successfully parsed path.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPath {
    pub atoms: AtomList,
    /// Number of coordinate pairs stored in the produced atoms, used by
    /// callers to size hit-test scratch buffers up front.
    pub coordinate_count: usize,
}

/// Splits a path description into instruction and number tokens.
///
/// Separators are ASCII whitespace and commas; empty tokens are dropped.
pub fn tokenize(input: &str) -> Vec<&str> {
    input
        .split(|c: char| c.is_ascii_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parses a textual path description.
pub fn parse(input: &str) -> Result<ParsedPath> {
    let tokens = tokenize(input);
    parse_tokens(&tokens)
}

fn is_instruction(token: &str) -> bool {
    token.len() == 1 && token.as_bytes()[0].is_ascii_alphabetic()
}

const KNOWN_INSTRUCTIONS: &str = "MmLlHhVvCcSsQqTtAaZz";

/// Reads one required numeric argument for `cmd`.
fn number(tokens: &[&str], i: &mut usize, cmd: char, expected: usize, seen: usize) -> Result<f64> {
    if *i >= tokens.len() || is_instruction(tokens[*i]) {
        return Err(ParseError::MissingArgument {
            command: cmd,
            expected,
            found: seen,
        });
    }
    let token = tokens[*i];
    *i += 1;
    token.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
    })
}

/// Reads one required 0/1 flag argument for `cmd`.
fn flag(tokens: &[&str], i: &mut usize, cmd: char, expected: usize, seen: usize) -> Result<bool> {
    if *i >= tokens.len() || is_instruction(tokens[*i]) {
        return Err(ParseError::MissingArgument {
            command: cmd,
            expected,
            found: seen,
        });
    }
    let token = tokens[*i];
    *i += 1;
    match token {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(ParseError::InvalidFlag {
            token: token.to_string(),
        }),
    }
}

/// Parses a pre-split token stream into an atom list.
pub fn parse_tokens(tokens: &[&str]) -> Result<ParsedPath> {
    let result = parse_inner(tokens);
    match &result {
        Ok(parsed) => trace!(
            atoms = parsed.atoms.len(),
            points = parsed.coordinate_count,
            "parsed path description"
        ),
        Err(err) => debug!(%err, "path description rejected"),
    }
    result
}

fn parse_inner(tokens: &[&str]) -> Result<ParsedPath> {
    if tokens.len() < 3 {
        return Err(ParseError::TooShort);
    }
    if !matches!(tokens[0], "M" | "m") {
        return Err(ParseError::MustStartWithMove {
            found: tokens[0].to_string(),
        });
    }

    let mut atoms = AtomList::new();
    let mut points = 0usize;
    let mut cur = PathPoint::default();
    let mut start = PathPoint::default();
    let mut last_ctrl = PathPoint::default();
    let mut last_cmd = ' ';
    let mut i = 0usize;

    while i < tokens.len() {
        let cmd = if is_instruction(tokens[i]) {
            let letter = tokens[i].chars().next().unwrap();
            if !KNOWN_INSTRUCTIONS.contains(letter) {
                return Err(ParseError::UnknownCommand { letter });
            }
            i += 1;
            letter
        } else {
            // Implicit command repetition; a repeated moveto acts as lineto.
            match last_cmd {
                'M' => 'L',
                'm' => 'l',
                'Z' | 'z' | ' ' => {
                    return Err(ParseError::UnexpectedToken {
                        token: tokens[i].to_string(),
                    })
                }
                c => c,
            }
        };
        let relative = cmd.is_ascii_lowercase();

        match cmd.to_ascii_uppercase() {
            'M' => {
                let x = number(tokens, &mut i, cmd, 2, 0)?;
                let y = number(tokens, &mut i, cmd, 2, 1)?;
                cur = offset(relative, cur, x, y);
                start = cur;
                atoms.push(Atom::Move { x: cur.x, y: cur.y });
                points += 1;
            }
            'L' => {
                let x = number(tokens, &mut i, cmd, 2, 0)?;
                let y = number(tokens, &mut i, cmd, 2, 1)?;
                cur = offset(relative, cur, x, y);
                atoms.push(Atom::Line { x: cur.x, y: cur.y });
                points += 1;
            }
            'H' => {
                // Fold every consecutive bare number into one lineto that
                // keeps only the final coordinate.
                let mut x = number(tokens, &mut i, cmd, 1, 0)?;
                if relative {
                    x += cur.x;
                }
                while i < tokens.len() && !is_instruction(tokens[i]) {
                    let n = number(tokens, &mut i, cmd, 1, 0)?;
                    x = if relative { x + n } else { n };
                }
                cur.x = x;
                atoms.push(Atom::Line { x: cur.x, y: cur.y });
                points += 1;
            }
            'V' => {
                let mut y = number(tokens, &mut i, cmd, 1, 0)?;
                if relative {
                    y += cur.y;
                }
                while i < tokens.len() && !is_instruction(tokens[i]) {
                    let n = number(tokens, &mut i, cmd, 1, 0)?;
                    y = if relative { y + n } else { n };
                }
                cur.y = y;
                atoms.push(Atom::Line { x: cur.x, y: cur.y });
                points += 1;
            }
            'C' => {
                let c1x = number(tokens, &mut i, cmd, 6, 0)?;
                let c1y = number(tokens, &mut i, cmd, 6, 1)?;
                let c2x = number(tokens, &mut i, cmd, 6, 2)?;
                let c2y = number(tokens, &mut i, cmd, 6, 3)?;
                let x = number(tokens, &mut i, cmd, 6, 4)?;
                let y = number(tokens, &mut i, cmd, 6, 5)?;
                let c1 = offset(relative, cur, c1x, c1y);
                let c2 = offset(relative, cur, c2x, c2y);
                cur = offset(relative, cur, x, y);
                atoms.push(Atom::CubicCurve {
                    c1x: c1.x,
                    c1y: c1.y,
                    c2x: c2.x,
                    c2y: c2.y,
                    x: cur.x,
                    y: cur.y,
                });
                last_ctrl = c2;
                points += 3;
            }
            'S' => {
                let c2x = number(tokens, &mut i, cmd, 4, 0)?;
                let c2y = number(tokens, &mut i, cmd, 4, 1)?;
                let x = number(tokens, &mut i, cmd, 4, 2)?;
                let y = number(tokens, &mut i, cmd, 4, 3)?;
                let c1 = reflect_control(last_cmd, "CcSs", cur, last_ctrl);
                let c2 = offset(relative, cur, c2x, c2y);
                cur = offset(relative, cur, x, y);
                atoms.push(Atom::CubicCurve {
                    c1x: c1.x,
                    c1y: c1.y,
                    c2x: c2.x,
                    c2y: c2.y,
                    x: cur.x,
                    y: cur.y,
                });
                last_ctrl = c2;
                points += 3;
            }
            'Q' => {
                let cx = number(tokens, &mut i, cmd, 4, 0)?;
                let cy = number(tokens, &mut i, cmd, 4, 1)?;
                let x = number(tokens, &mut i, cmd, 4, 2)?;
                let y = number(tokens, &mut i, cmd, 4, 3)?;
                let ctrl = offset(relative, cur, cx, cy);
                cur = offset(relative, cur, x, y);
                atoms.push(Atom::QuadCurve {
                    cx: ctrl.x,
                    cy: ctrl.y,
                    x: cur.x,
                    y: cur.y,
                });
                last_ctrl = ctrl;
                points += 2;
            }
            'T' => {
                let x = number(tokens, &mut i, cmd, 2, 0)?;
                let y = number(tokens, &mut i, cmd, 2, 1)?;
                let ctrl = reflect_control(last_cmd, "QqTt", cur, last_ctrl);
                cur = offset(relative, cur, x, y);
                atoms.push(Atom::QuadCurve {
                    cx: ctrl.x,
                    cy: ctrl.y,
                    x: cur.x,
                    y: cur.y,
                });
                last_ctrl = ctrl;
                points += 2;
            }
            'A' => {
                let rx = number(tokens, &mut i, cmd, 7, 0)?;
                let ry = number(tokens, &mut i, cmd, 7, 1)?;
                let angle = number(tokens, &mut i, cmd, 7, 2)?;
                let large_arc = flag(tokens, &mut i, cmd, 7, 3)?;
                let sweep = flag(tokens, &mut i, cmd, 7, 4)?;
                let x = number(tokens, &mut i, cmd, 7, 5)?;
                let y = number(tokens, &mut i, cmd, 7, 6)?;
                cur = offset(relative, cur, x, y);
                atoms.push(Atom::Arc {
                    rx,
                    ry,
                    angle,
                    large_arc,
                    sweep,
                    x: cur.x,
                    y: cur.y,
                });
                points += 1;
            }
            'Z' => {
                atoms.push(Atom::Close {
                    x: start.x,
                    y: start.y,
                });
                cur = start;
                points += 1;
            }
            _ => unreachable!("instruction set is closed"),
        }
        last_cmd = cmd;
    }

    Ok(ParsedPath {
        atoms,
        coordinate_count: points,
    })
}

fn offset(relative: bool, cur: PathPoint, x: f64, y: f64) -> PathPoint {
    if relative {
        PathPoint::new(cur.x + x, cur.y + y)
    } else {
        PathPoint::new(x, y)
    }
}

/// First control point for a smooth (S/T) curve: the reflection of the prior
/// control point about the current point, but only when the previous
/// instruction was of the matching curve kind; otherwise the current point.
fn reflect_control(last_cmd: char, matching: &str, cur: PathPoint, last_ctrl: PathPoint) -> PathPoint {
    if matching.contains(last_cmd) {
        PathPoint::new(2.0 * cur.x - last_ctrl.x, 2.0 * cur.y - last_ctrl.y)
    } else {
        cur
    }
}

/// Renders an atom list back into a canonical absolute path description.
///
/// Parsing the result reproduces the list atom for atom; normalization is
/// idempotent. The synthetic primitive atoms render as their command-form
/// equivalents.
pub fn normalize(list: &AtomList) -> String {
    let mut out = String::new();
    for atom in list {
        if !out.is_empty() {
            out.push(' ');
        }
        match *atom {
            Atom::Move { x, y } => push_cmd(&mut out, "M", &[x, y]),
            Atom::Line { x, y } => push_cmd(&mut out, "L", &[x, y]),
            Atom::QuadCurve { cx, cy, x, y } => push_cmd(&mut out, "Q", &[cx, cy, x, y]),
            Atom::CubicCurve {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => push_cmd(&mut out, "C", &[c1x, c1y, c2x, c2y, x, y]),
            Atom::Arc {
                rx,
                ry,
                angle,
                large_arc,
                sweep,
                x,
                y,
            } => {
                push_cmd(&mut out, "A", &[rx, ry, angle]);
                out.push_str(if large_arc { " 1" } else { " 0" });
                out.push_str(if sweep { " 1" } else { " 0" });
                push_numbers(&mut out, &[x, y]);
            }
            Atom::Close { .. } => out.push('Z'),
            Atom::Rect { x, y, w, h } => {
                push_cmd(&mut out, "M", &[x, y]);
                out.push(' ');
                push_cmd(&mut out, "L", &[x + w, y]);
                out.push(' ');
                push_cmd(&mut out, "L", &[x + w, y + h]);
                out.push(' ');
                push_cmd(&mut out, "L", &[x, y + h]);
                out.push_str(" Z");
            }
            Atom::Ellipse { cx, cy, rx, ry } => {
                push_cmd(&mut out, "M", &[cx + rx, cy]);
                out.push(' ');
                push_cmd(&mut out, "A", &[rx, ry, 0.0]);
                out.push_str(" 0 1");
                push_numbers(&mut out, &[cx - rx, cy]);
                out.push(' ');
                push_cmd(&mut out, "A", &[rx, ry, 0.0]);
                out.push_str(" 0 1");
                push_numbers(&mut out, &[cx + rx, cy]);
                out.push_str(" Z");
            }
        }
    }
    out
}

fn push_cmd(out: &mut String, cmd: &str, numbers: &[f64]) {
    out.push_str(cmd);
    push_numbers(out, numbers);
}

fn push_numbers(out: &mut String, numbers: &[f64]) {
    use std::fmt::Write;
    for n in numbers {
        // Display of f64 round-trips exactly through parse.
        let _ = write!(out, " {}", n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms_of(input: &str) -> Vec<Atom> {
        parse(input).expect("valid path").atoms.atoms().to_vec()
    }

    #[test]
    fn test_simple_absolute_path() {
        let atoms = atoms_of("M 0 0 L 10 0 L 10 10 Z");
        assert_eq!(
            atoms,
            vec![
                Atom::Move { x: 0.0, y: 0.0 },
                Atom::Line { x: 10.0, y: 0.0 },
                Atom::Line { x: 10.0, y: 10.0 },
                Atom::Close { x: 0.0, y: 0.0 },
            ]
        );
    }

    #[test]
    fn test_relative_instructions_accumulate() {
        let atoms = atoms_of("m 1 2 l 3 0 l 0 4");
        assert_eq!(
            atoms,
            vec![
                Atom::Move { x: 1.0, y: 2.0 },
                Atom::Line { x: 4.0, y: 2.0 },
                Atom::Line { x: 4.0, y: 6.0 },
            ]
        );
    }

    #[test]
    fn test_implicit_repetition_of_moveto_is_lineto() {
        let atoms = atoms_of("M 0 0 10 0 10 10");
        assert_eq!(
            atoms,
            vec![
                Atom::Move { x: 0.0, y: 0.0 },
                Atom::Line { x: 10.0, y: 0.0 },
                Atom::Line { x: 10.0, y: 10.0 },
            ]
        );
    }

    #[test]
    fn test_horizontal_folds_consecutive_numbers() {
        let atoms = atoms_of("M 0 5 H 10 20 30");
        assert_eq!(
            atoms,
            vec![
                Atom::Move { x: 0.0, y: 5.0 },
                Atom::Line { x: 30.0, y: 5.0 },
            ]
        );
    }

    #[test]
    fn test_relative_vertical_folds_by_summing() {
        let atoms = atoms_of("M 2 0 v 1 2 3");
        assert_eq!(
            atoms,
            vec![
                Atom::Move { x: 2.0, y: 0.0 },
                Atom::Line { x: 2.0, y: 6.0 },
            ]
        );
    }

    #[test]
    fn test_smooth_cubic_reflects_previous_control() {
        let atoms = atoms_of("M 0 0 C 0 10 10 10 10 0 S 20 -10 20 0");
        match atoms[2] {
            Atom::CubicCurve { c1x, c1y, .. } => {
                // Reflection of (10, 10) about (10, 0).
                assert_eq!((c1x, c1y), (10.0, -10.0));
            }
            ref other => panic!("expected a cubic, got {:?}", other),
        }
    }

    #[test]
    fn test_smooth_cubic_without_prior_curve_uses_current_point() {
        let atoms = atoms_of("M 3 4 S 20 10 20 0");
        match atoms[1] {
            Atom::CubicCurve { c1x, c1y, .. } => {
                assert_eq!((c1x, c1y), (3.0, 4.0));
            }
            ref other => panic!("expected a cubic, got {:?}", other),
        }
    }

    #[test]
    fn test_smooth_quad_reflects_only_after_quad() {
        let atoms = atoms_of("M 0 0 Q 5 10 10 0 T 20 0");
        match atoms[2] {
            Atom::QuadCurve { cx, cy, .. } => {
                assert_eq!((cx, cy), (15.0, -10.0));
            }
            ref other => panic!("expected a quad, got {:?}", other),
        }
    }

    #[test]
    fn test_close_resets_current_point() {
        let atoms = atoms_of("M 1 1 L 5 1 Z L 2 2");
        assert_eq!(atoms[2], Atom::Close { x: 1.0, y: 1.0 });
        assert_eq!(atoms[3], Atom::Line { x: 2.0, y: 2.0 });
    }

    #[test]
    fn test_arc_arguments_in_wire_order() {
        let atoms = atoms_of("M 0 0 A 25 15 30 1 0 50 0");
        assert_eq!(
            atoms[1],
            Atom::Arc {
                rx: 25.0,
                ry: 15.0,
                angle: 30.0,
                large_arc: true,
                sweep: false,
                x: 50.0,
                y: 0.0,
            }
        );
    }

    #[test]
    fn test_coordinate_count() {
        let parsed = parse("M 0 0 C 1 1 2 2 3 3 Q 4 4 5 5 Z").unwrap();
        // Move 1 + cubic 3 + quad 2 + close 1.
        assert_eq!(parsed.coordinate_count, 7);
    }

    #[test]
    fn test_too_short() {
        assert_eq!(parse("M 0"), Err(ParseError::TooShort));
    }

    #[test]
    fn test_must_start_with_moveto() {
        assert_eq!(
            parse("L 0 0 L 1 1"),
            Err(ParseError::MustStartWithMove {
                found: "L".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_instruction() {
        assert_eq!(
            parse("M 0 0 X 1 1"),
            Err(ParseError::UnknownCommand { letter: 'X' })
        );
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(
            parse("M 0 0 C 1 1 2 2"),
            Err(ParseError::MissingArgument {
                command: 'C',
                expected: 6,
                found: 4
            })
        );
    }

    #[test]
    fn test_malformed_number() {
        assert_eq!(
            parse("M 0 0 L 1 abc"),
            Err(ParseError::InvalidNumber {
                token: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_arc_flag_must_be_binary() {
        assert_eq!(
            parse("M 0 0 A 5 5 0 2 1 10 0"),
            Err(ParseError::InvalidFlag {
                token: "2".to_string()
            })
        );
    }

    #[test]
    fn test_number_after_close_rejected() {
        assert_eq!(
            parse("M 0 0 L 1 1 Z 5 5"),
            Err(ParseError::UnexpectedToken {
                token: "5".to_string()
            })
        );
    }

    #[test]
    fn test_commas_as_separators() {
        let atoms = atoms_of("M 0,0 L 10,0 10,10");
        assert_eq!(atoms.len(), 3);
    }

    #[test]
    fn test_normalize_round_trips() {
        let source = "m 1 2 l 3 0 q 1 1 2 0 t 4 0 c 1 -1 2 -1 3 0 s 2 1 3 0 a 5 4 10 1 0 -3 -3 z";
        let first = parse(source).unwrap().atoms;
        let canonical = normalize(&first);
        let second = parse(&canonical).unwrap().atoms;
        assert_eq!(first, second);
        // Normalization is idempotent.
        assert_eq!(canonical, normalize(&second));
    }
}
