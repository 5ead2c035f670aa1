use criterion::{black_box, criterion_group, criterion_main, Criterion};
use esparse::Parser;

static SNIPPET: &str = r#"
'use strict';
class Point {
    constructor(x, y) {
        this.x = x;
        this.y = y;
    }
    get length() {
        return Math.sqrt(this.x * this.x + this.y * this.y);
    }
    static origin() {
        return new Point(0, 0);
    }
}
function* pairs(items) {
    for (let [i, item] of items.entries()) {
        yield [i, item];
    }
}
var flip = ([a, b]) => [b, a];
for (var i = 0; i < 10; i++) {
    flip([i, i + 1]);
}
"#;

fn parse_snippet(c: &mut Criterion) {
    c.bench_function("parse_snippet", |b| {
        b.iter(|| {
            let mut parser = Parser::new(black_box(SNIPPET)).unwrap();
            let program = parser.parse().unwrap();
            black_box(program)
        })
    });
}

criterion_group!(benches, parse_snippet);
criterion_main!(benches);
