use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use showcase_texture::{synthesize, RingTextureSpec};

fn bench_ring_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_synthesis");
    for size in [256u32, 1024, 2048] {
        let spec = RingTextureSpec {
            size,
            ..RingTextureSpec::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(size), &spec, |b, spec| {
            b.iter(|| synthesize(black_box(spec)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ring_synthesis);
criterion_main!(benches);
