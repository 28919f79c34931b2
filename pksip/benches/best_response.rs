use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pksip::message::StatusCode;
use pksip::proxy::response::is_better;

const CANDIDATES: &[StatusCode] = &[
    StatusCode::NotFound,
    StatusCode::BusyHere,
    StatusCode::RequestTimeout,
    StatusCode::TemporarilyUnavailable,
    StatusCode::ServiceUnavailable,
    StatusCode::Forbidden,
    StatusCode::RequestTerminated,
];

fn elect_best(responses: &[StatusCode]) -> StatusCode {
    let mut best = responses[0];
    for &r in &responses[1..] {
        if is_better(r, best) {
            best = r;
        }
    }
    best
}

fn bench_election(c: &mut Criterion) {
    c.bench_function("elect_best_of_7_forks", |b| {
        b.iter(|| elect_best(black_box(CANDIDATES)));
    });
}

criterion_group!(benches, bench_election);
criterion_main!(benches);
