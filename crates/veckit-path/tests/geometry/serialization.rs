//! Persistence round-trips for the atom model and style types.

use veckit_path::{parse, AtomList, CapStyle, FillRule, JoinStyle, Stroke, Style, TMatrix};

#[test]
fn atom_list_round_trips_through_json() {
    let list = parse("M 0 0 L 10 0 Q 15 5 20 0 C 25 -5 30 5 35 0 A 5 4 20 1 0 45 0 Z")
        .unwrap()
        .atoms;
    let json = serde_json::to_string(&list).unwrap();
    let back: AtomList = serde_json::from_str(&json).unwrap();
    assert_eq!(list, back);
}

#[test]
fn style_round_trips_through_json() {
    let style = Style {
        stroke: Some(Stroke {
            width: 6.5,
            cap: CapStyle::Projecting,
            join: JoinStyle::Bevel,
            miter_limit: 10.0,
            dash: Some(vec![4.0, 2.0]),
            ..Stroke::default()
        }),
        fill: Some(veckit_path::Fill {
            rule: FillRule::EvenOdd,
            ..Default::default()
        }),
        matrix: Some(TMatrix::rotation(30.0)),
    };
    let json = serde_json::to_string(&style).unwrap();
    let back: Style = serde_json::from_str(&json).unwrap();
    assert_eq!(style, back);
}
