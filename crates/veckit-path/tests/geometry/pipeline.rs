//! Full-pipeline tests: parse, transform, measure, flatten, walk, pick —
//! the call sequence a host scene graph drives for one path item.

use veckit_path::{
    bare_bbox, flatten_subpath, max_segments_for_path, normalize, parse, point_query, total_bbox,
    transformed_bbox, AtomList, AtomVisitor, FillRule, FlatBuffer, PathPoint, Style, TMatrix,
};

#[test]
fn item_move_then_pick() {
    let mut list = parse("M 0 0 C 0 10 10 10 10 0 Z").unwrap().atoms;
    let style = Style::filled(FillRule::NonZero);

    // The item is dragged; its cached boxes would now be recomputed.
    list.translate(50.0, 50.0);
    let bbox = bare_bbox(&list);
    assert!(bbox.x1 >= 50.0 && bbox.y1 >= 50.0);

    assert_eq!(point_query(&list, &style, PathPoint::new(55.0, 53.0)), 0.0);
    assert!(point_query(&list, &style, PathPoint::new(5.0, 3.0)) > 0.0);
}

#[test]
fn item_scale_then_measure() {
    let mut list = parse("M 0 0 L 10 0 L 10 10 L 0 10 Z").unwrap().atoms;
    list.scale(0.0, 0.0, 3.0, 2.0);
    assert_eq!(
        bare_bbox(&list),
        veckit_path::PathRect::new(0.0, 0.0, 30.0, 20.0)
    );
}

#[test]
fn total_and_transformed_boxes_stack() {
    let list = parse("M 0 0 L 10 0 L 10 10 L 0 10 Z").unwrap().atoms;
    let style = Style::stroked(6.0);
    let bare = bare_bbox(&list);
    let total = total_bbox(&bare, &style, false);
    // Stroke 6 plus the 1-unit fudge on every side.
    assert_eq!(total, veckit_path::PathRect::new(-7.0, -7.0, 17.0, 17.0));

    let shifted = transformed_bbox(&total, &TMatrix::translation(100.0, 0.0));
    assert_eq!(shifted, veckit_path::PathRect::new(93.0, -7.0, 117.0, 17.0));
}

#[test]
fn sizing_pass_bounds_every_flatten() {
    let d = "M 0 0 C 0 10 10 10 10 0 Q 15 5 20 0 A 5 5 0 0 1 30 0 Z M 40 0 H 50 60 V 10";
    let list = parse(d).unwrap().atoms;
    let budget = max_segments_for_path(&list);

    let mut buf = FlatBuffer::new();
    let mut i = 0;
    while i < list.len() {
        let shape = flatten_subpath(list.atoms(), i, &TMatrix::IDENTITY, &mut buf);
        i = shape.next;
    }
    assert_eq!(buf.len(), budget);
}

#[test]
fn renderer_walk_sees_every_atom_in_order() {
    struct Emitter {
        calls: Vec<String>,
    }
    impl AtomVisitor for Emitter {
        fn move_to(&mut self, x: f64, y: f64) {
            self.calls.push(format!("move {} {}", x, y));
        }
        fn line_to(&mut self, x: f64, y: f64) {
            self.calls.push(format!("line {} {}", x, y));
        }
        fn quad_to(&mut self, _cx: f64, _cy: f64, x: f64, y: f64) {
            self.calls.push(format!("quad {} {}", x, y));
        }
        fn cubic_to(&mut self, _a: f64, _b: f64, _c: f64, _d: f64, x: f64, y: f64) {
            self.calls.push(format!("cubic {} {}", x, y));
        }
        fn arc_to(&mut self, _rx: f64, _ry: f64, _r: f64, _l: bool, _s: bool, x: f64, y: f64) {
            self.calls.push(format!("arc {} {}", x, y));
        }
        fn close(&mut self, _x: f64, _y: f64) {
            self.calls.push("close".to_string());
        }
    }

    let list = parse("M 0 0 L 5 0 A 5 5 0 0 1 15 0 Z").unwrap().atoms;
    let mut emitter = Emitter { calls: Vec::new() };
    list.walk(&mut emitter);
    assert_eq!(
        emitter.calls,
        vec!["move 0 0", "line 5 0", "arc 15 0", "close"]
    );
}

#[test]
fn primitive_constructors_produce_pickable_items() {
    let style = Style::filled(FillRule::NonZero);

    let rect = AtomList::rect(0.0, 0.0, 20.0, 10.0);
    assert_eq!(point_query(&rect, &style, PathPoint::new(10.0, 5.0)), 0.0);
    assert!(point_query(&rect, &style, PathPoint::new(30.0, 5.0)) > 0.0);

    let ellipse = AtomList::ellipse(0.0, 0.0, 20.0, 10.0);
    assert_eq!(point_query(&ellipse, &style, PathPoint::new(0.0, 0.0)), 0.0);
    assert!(point_query(&ellipse, &style, PathPoint::new(19.0, 9.0)) > 0.0);

    let polygon = AtomList::polygon(&[
        PathPoint::new(0.0, 0.0),
        PathPoint::new(10.0, 0.0),
        PathPoint::new(5.0, 10.0),
    ]);
    assert_eq!(point_query(&polygon, &style, PathPoint::new(5.0, 2.0)), 0.0);
}

#[test]
fn normalization_is_stable_under_reparse() {
    let source = "m 10 10 h 5 5 v 3 q 2 2 4 0 z";
    let first = parse(source).unwrap().atoms;
    let canonical = normalize(&first);
    let second = parse(&canonical).unwrap().atoms;
    assert_eq!(first, second);
    assert_eq!(canonical, normalize(&second));
}
