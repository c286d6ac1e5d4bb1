// In sift-core/benches/compaction_bench.rs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sift::{apply_boolean_mask_with_config, drop_nulls_with_config, Column, CompactionConfig};

// --- Data Generation ---

/// Generates `len` random f64 values where roughly `null_ratio` of rows are null.
fn generate_source(rng: &mut StdRng, len: usize, null_ratio: f64) -> Column {
    let values: Vec<f64> = (0..len).map(|_| rng.random::<f64>()).collect();
    let validity: Vec<bool> = (0..len).map(|_| !rng.random_bool(null_ratio)).collect();
    Column::from_values(values, Some(validity))
}

/// Generates a mask that keeps roughly `selectivity` of rows.
fn generate_mask(rng: &mut StdRng, len: usize, selectivity: f64) -> Column {
    let values: Vec<bool> = (0..len).map(|_| rng.random_bool(selectivity)).collect();
    Column::from_bools(values, None)
}

// --- Benchmark Suite ---

const BENCH_ROWS: usize = 1 << 20;

fn bench_apply_boolean_mask(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let source = generate_source(&mut rng, BENCH_ROWS, 0.1);

    let sequential = CompactionConfig {
        parallel_threshold_rows: usize::MAX,
        ..CompactionConfig::default()
    };
    let parallel = CompactionConfig::default();

    let mut group = c.benchmark_group("apply_boolean_mask");
    group.throughput(Throughput::Elements(BENCH_ROWS as u64));

    for selectivity in [0.01, 0.5, 0.99] {
        let mask = generate_mask(&mut rng, BENCH_ROWS, selectivity);
        group.bench_with_input(BenchmarkId::new("sequential", selectivity), &mask, |b, mask| {
            b.iter(|| black_box(apply_boolean_mask_with_config(&source, mask, &sequential)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", selectivity), &mask, |b, mask| {
            b.iter(|| black_box(apply_boolean_mask_with_config(&source, mask, &parallel)))
        });
    }
    group.finish();
}

fn bench_drop_nulls(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let config = CompactionConfig::default();

    let mut group = c.benchmark_group("drop_nulls");
    group.throughput(Throughput::Elements(BENCH_ROWS as u64));

    for null_ratio in [0.0, 0.1, 0.9] {
        let source = generate_source(&mut rng, BENCH_ROWS, null_ratio);
        group.bench_with_input(BenchmarkId::from_parameter(null_ratio), &source, |b, source| {
            b.iter(|| black_box(drop_nulls_with_config(source, &config)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_apply_boolean_mask, bench_drop_nulls);
criterion_main!(benches);
