//! End-to-end picking scenarios over parsed paths.

use veckit_path::{
    area_query, endpoint_to_central, flatten_subpath, parse, point_query, ArcForm, AreaHit,
    FillRule, FlatBuffer, PathPoint, PathRect, Style, TMatrix,
};

#[test]
fn scenario_filled_rectangle_picking() {
    let list = parse("M 0,0 L 10,0 L 10,10 L 0,10 Z").unwrap().atoms;
    let style = Style::filled(FillRule::NonZero);

    assert_eq!(point_query(&list, &style, PathPoint::new(5.0, 5.0)), 0.0);
    assert!(point_query(&list, &style, PathPoint::new(-1.0, -1.0)) > 0.0);

    let enclosing = PathRect::new(-5.0, -5.0, 20.0, 20.0);
    assert_eq!(area_query(&list, &style, &enclosing), AreaHit::Inside);
}

#[test]
fn scenario_zero_radius_arc_degrades_to_line() {
    let form = endpoint_to_central(0.0, 0.0, 10.0, 0.0, 0.0, 5.0, 0.0, false, true);
    assert_eq!(form, ArcForm::StraightLine);

    let list = parse("M 0,0 A 0,5 0 0 1 10,0").unwrap().atoms;
    let mut buf = FlatBuffer::new();
    let shape = flatten_subpath(list.atoms(), 0, &TMatrix::IDENTITY, &mut buf);
    // One moveto vertex plus exactly two from the degenerate arc.
    assert_eq!(shape.vertex_count, 3);
}

#[test]
fn scenario_identical_endpoints_skip_the_arc() {
    let form = endpoint_to_central(5.0, 5.0, 5.0, 5.0, 3.0, 4.0, 0.0, true, true);
    assert_eq!(form, ArcForm::Skip);

    let list = parse("M 5,5 A 3,3 0 0 1 5,5").unwrap().atoms;
    let mut buf = FlatBuffer::new();
    let shape = flatten_subpath(list.atoms(), 0, &TMatrix::IDENTITY, &mut buf);
    assert_eq!(shape.vertex_count, 1);
}

#[test]
fn scenario_semicircle_center_parameters() {
    let form = endpoint_to_central(0.0, 0.0, 10.0, 0.0, 5.0, 5.0, 0.0, false, true);
    let pars = match form {
        ArcForm::Central(p) => p,
        other => panic!("expected a central form, got {:?}", other),
    };
    assert!((pars.cx - 5.0).abs() < 1e-6);
    assert!(pars.cy.abs() < 1e-6);
    assert!((pars.rx - 5.0).abs() < 1e-6);
    assert!((pars.ry - 5.0).abs() < 1e-6);
    assert!(pars.dtheta > 0.0);
    assert!((pars.dtheta - std::f64::consts::PI).abs() < 1e-6);
}
