use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rank_tree::{Item, RankTree};

const N: usize = 10_000;

#[derive(Clone)]
struct Score(i64);

impl Item for Score {
    fn key(&self) -> String {
        self.0.to_string()
    }

    fn less(&self, than: &Self) -> bool {
        self.0 < than.0
    }
}

// ─── Helper functions to generate score sequences ───────────────────────────

fn ordered_scores(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_scores(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut scores = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        scores.push((x >> 33) as i64);
    }
    scores
}

fn board_of(scores: &[i64]) -> RankTree<Score> {
    let mut board = RankTree::with_pool_capacity(scores.len());
    for &s in scores {
        board.upsert(&s.to_string(), Score(s));
    }
    board
}

// ─── Upsert Benchmarks ──────────────────────────────────────────────────────

fn bench_upsert_ordered(c: &mut Criterion) {
    let scores = ordered_scores(N);
    let mut group = c.benchmark_group("upsert_ordered");

    group.bench_function(BenchmarkId::new("RankTree", N), |b| {
        b.iter(|| board_of(&scores));
    });

    group.finish();
}

fn bench_upsert_random(c: &mut Criterion) {
    let scores = random_scores(N);
    let mut group = c.benchmark_group("upsert_random");

    group.bench_function(BenchmarkId::new("RankTree", N), |b| {
        b.iter(|| board_of(&scores));
    });

    group.finish();
}

fn bench_upsert_rescoring(c: &mut Criterion) {
    // Every upsert hits an existing key with a new random score.
    let scores = ordered_scores(N);
    let rescores = random_scores(N);
    let mut group = c.benchmark_group("upsert_rescoring");

    group.bench_function(BenchmarkId::new("RankTree", N), |b| {
        b.iter_batched(
            || board_of(&scores),
            |mut board| {
                for (i, &s) in rescores.iter().enumerate() {
                    board.upsert(&(i as i64).to_string(), Score(s));
                }
                board
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Query Benchmarks ───────────────────────────────────────────────────────

fn bench_rank_random(c: &mut Criterion) {
    let scores = random_scores(N);
    let board = board_of(&scores);
    let keys: Vec<String> = scores.iter().map(|s| s.to_string()).collect();

    let mut group = c.benchmark_group("rank_random");

    group.bench_function(BenchmarkId::new("RankTree", N), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for k in &keys {
                if let Some(r) = board.rank(k, false) {
                    sum = sum.wrapping_add(r);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_get_random(c: &mut Criterion) {
    let scores = random_scores(N);
    let board = board_of(&scores);
    let keys: Vec<String> = scores.iter().map(|s| s.to_string()).collect();

    let mut group = c.benchmark_group("get_random");

    group.bench_function(BenchmarkId::new("RankTree", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for k in &keys {
                if let Some(item) = board.get(k) {
                    sum = sum.wrapping_add(item.0);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_range_pages(c: &mut Criterion) {
    // Walks the board a 100-entry page at a time, as a leaderboard UI would.
    let scores = random_scores(N);
    let board = board_of(&scores);
    let pages = board.len() / 100;

    let mut group = c.benchmark_group("range_pages");

    group.bench_function(BenchmarkId::new("RankTree", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for page in 0..pages {
                let start = (page * 100) as isize;
                board.range(start, start + 99, false, |_, item, _| {
                    sum = sum.wrapping_add(item.0);
                    true
                });
            }
            sum
        });
    });

    group.finish();
}

// ─── Remove Benchmarks ──────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let scores = random_scores(N);
    let keys: Vec<String> = scores.iter().map(|s| s.to_string()).collect();

    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("RankTree", N), |b| {
        b.iter_batched(
            || board_of(&scores),
            |mut board| {
                for k in &keys {
                    board.remove(k);
                }
                board
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(upsert_benches, bench_upsert_ordered, bench_upsert_random, bench_upsert_rescoring,);

criterion_group!(query_benches, bench_rank_random, bench_get_random, bench_range_pages,);

criterion_group!(remove_benches, bench_remove_random);

criterion_main!(upsert_benches, query_benches, remove_benches);
