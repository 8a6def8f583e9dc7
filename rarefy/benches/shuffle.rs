use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rarefy::{full_shuffle, rarefy_seeded, ChunkShuffler, RarefyParams};

fn bench_shuffle(c: &mut Criterion) {
    let mut group = c.benchmark_group("shuffle");
    let mut rng = Xoshiro256StarStar::seed_from_u64(42);

    for n in [1_000usize, 10_000, 100_000, 1_000_000] {
        let mut items: Vec<u32> = (0..n as u32).collect();
        group.bench_with_input(BenchmarkId::new("full", n), &n, |b, _| {
            b.iter(|| full_shuffle(black_box(&mut items), &mut rng))
        });

        let mut shuffler = ChunkShuffler::new();
        group.bench_with_input(BenchmarkId::new("chunk", n), &n, |b, _| {
            b.iter(|| shuffler.shuffle(black_box(&mut items), &mut rng))
        });
    }

    group.finish();
}

fn bench_rarefy(c: &mut Criterion) {
    let mut group = c.benchmark_group("rarefy");

    // 2000 species with a long tail of rare ones.
    let counts: Vec<(usize, i64)> = (0..2000).map(|i| (i, 20_000 / (i as i64 + 1))).collect();
    for trials in [1, 10] {
        let params = RarefyParams::new(1000, trials);
        group.bench_with_input(BenchmarkId::new("trials", trials), &params, |b, params| {
            b.iter(|| rarefy_seeded(black_box(counts.iter().copied()), params))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_shuffle, bench_rarefy);
criterion_main!(benches);
