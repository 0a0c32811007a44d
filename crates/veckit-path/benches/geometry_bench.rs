use criterion::{black_box, criterion_group, criterion_main, Criterion};

use veckit_path::{
    bare_bbox, flatten_subpath, parse, point_query, FillRule, FlatBuffer, PathPoint, Style,
    TMatrix,
};

fn sample_path() -> String {
    let mut d = String::from("M 0 0");
    for i in 0..50 {
        let x = (i * 13 % 97) as f64;
        let y = (i * 29 % 89) as f64;
        match i % 4 {
            0 => d.push_str(&format!(" L {} {}", x, y)),
            1 => d.push_str(&format!(" Q {} {} {} {}", x + 5.0, y + 5.0, x, y)),
            2 => d.push_str(&format!(" C {} {} {} {} {} {}", x, y + 10.0, x + 10.0, y, x, y)),
            _ => d.push_str(&format!(" A 20 15 30 0 1 {} {}", x, y)),
        }
    }
    d.push_str(" Z");
    d
}

fn bench_parse(c: &mut Criterion) {
    let d = sample_path();
    c.bench_function("parse_path", |b| {
        b.iter(|| parse(black_box(&d)).unwrap());
    });
}

fn bench_flatten(c: &mut Criterion) {
    let list = parse(&sample_path()).unwrap().atoms;
    c.bench_function("flatten_path", |b| {
        b.iter(|| {
            let mut buf = FlatBuffer::new();
            let mut i = 0;
            while i < list.len() {
                let shape = flatten_subpath(black_box(list.atoms()), i, &TMatrix::IDENTITY, &mut buf);
                i = shape.next;
            }
            buf.len()
        });
    });
}

fn bench_bbox(c: &mut Criterion) {
    let list = parse(&sample_path()).unwrap().atoms;
    c.bench_function("bare_bbox", |b| {
        b.iter(|| bare_bbox(black_box(&list)));
    });
}

fn bench_point_query(c: &mut Criterion) {
    let list = parse(&sample_path()).unwrap().atoms;
    let style = Style::filled(FillRule::NonZero);
    c.bench_function("point_query", |b| {
        b.iter(|| point_query(black_box(&list), &style, PathPoint::new(40.0, 40.0)));
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_flatten,
    bench_bbox,
    bench_point_query
);
criterion_main!(benches);
