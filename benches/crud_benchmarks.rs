use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use ordtree::BTree;
use std::collections::BTreeSet;
use std::hint::black_box;

const N: usize = 10_000;

/// Orders compared against `BTreeSet`: a narrow even order, a mid order, and the default.
const ORDERS: [usize; 3] = [4, 16, 128];

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn build_tree(order: usize, keys: &[i64]) -> BTree<i64> {
    let mut tree = BTree::new(order).expect("benchmark orders are valid");
    tree.extend(keys.iter());
    tree
}

// ─── Shared benchmark bodies ────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);

    for order in ORDERS {
        group.bench_function(BenchmarkId::new("BTree", order), |b| {
            b.iter(|| build_tree(order, keys));
        });
    }

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| keys.iter().copied().collect::<BTreeSet<_>>());
    });

    group.finish();
}

fn bench_contains(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);

    for order in ORDERS {
        let tree = build_tree(order, keys);
        group.bench_function(BenchmarkId::new("BTree", order), |b| {
            b.iter(|| keys.iter().filter(|key| tree.contains(black_box(key))).count());
        });
    }

    let set: BTreeSet<i64> = keys.iter().copied().collect();
    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| keys.iter().filter(|key| set.contains(black_box(key))).count());
    });

    group.finish();
}

fn bench_remove(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);

    for order in ORDERS {
        group.bench_function(BenchmarkId::new("BTree", order), |b| {
            b.iter_batched(
                || build_tree(order, keys),
                |mut tree| {
                    for key in keys {
                        tree.remove(key);
                    }
                    tree
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<BTreeSet<_>>(),
            |mut set| {
                for key in keys {
                    set.remove(key);
                }
                set
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ─── Tree Benchmarks ────────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    bench_insert(c, "insert_ordered", &ordered_keys(N));
}

fn bench_insert_reverse(c: &mut Criterion) {
    bench_insert(c, "insert_reverse", &reverse_ordered_keys(N));
}

fn bench_insert_random(c: &mut Criterion) {
    bench_insert(c, "insert_random", &random_keys(N));
}

fn bench_contains_ordered(c: &mut Criterion) {
    bench_contains(c, "contains_ordered", &ordered_keys(N));
}

fn bench_contains_random(c: &mut Criterion) {
    bench_contains(c, "contains_random", &random_keys(N));
}

fn bench_remove_ordered(c: &mut Criterion) {
    bench_remove(c, "remove_ordered", &ordered_keys(N));
}

fn bench_remove_reverse(c: &mut Criterion) {
    bench_remove(c, "remove_reverse", &reverse_ordered_keys(N));
}

fn bench_remove_random(c: &mut Criterion) {
    bench_remove(c, "remove_random", &random_keys(N));
}

fn bench_traverse(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("traverse");

    for order in ORDERS {
        let tree = build_tree(order, &keys);
        group.bench_function(BenchmarkId::new("BTree", order), |b| {
            b.iter(|| tree.traverse().fold(0i64, |acc, &key| acc.wrapping_add(key)));
        });
    }

    let set: BTreeSet<i64> = keys.iter().copied().collect();
    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| set.iter().fold(0i64, |acc, &key| acc.wrapping_add(key)));
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(insert_benches, bench_insert_ordered, bench_insert_reverse, bench_insert_random,);

criterion_group!(contains_benches, bench_contains_ordered, bench_contains_random,);

criterion_group!(remove_benches, bench_remove_ordered, bench_remove_reverse, bench_remove_random,);

criterion_group!(traverse_benches, bench_traverse,);

criterion_main!(insert_benches, contains_benches, remove_benches, traverse_benches,);
