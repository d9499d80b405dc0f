//! Benchmarks for this crate's [`SkipList`].

use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration, black_box};
use rand::{Rng, SeedableRng, rngs::StdRng};
use stowage::SkipList;

/// Benchmarking sizes.
const SIZES: [usize; 6] = [1, 10, 100, 1000, 10_000, 100_000];

/// Benchmarking insertion.
#[inline]
pub fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipList Insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut sl: SkipList<u64> =
                std::iter::repeat_with(|| rng.random()).take(size).collect();

            b.iter(|| {
                sl.insert(rng.random());
            });
        });
    }
}

/// Benchmarking search.
#[inline]
pub fn search(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipList Search");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let sl: SkipList<u64> = std::iter::repeat_with(|| rng.random_range(0..1_000_000))
                .take(size)
                .collect();
            let needles: Vec<u64> = std::iter::repeat_with(|| rng.random_range(0..1_000_000))
                .take(10)
                .collect();

            b.iter(|| {
                for needle in &needles {
                    black_box(sl.search(needle));
                }
            });
        });
    }
}

/// Benchmarking an insert followed by deleting the same value.
#[inline]
pub fn insert_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipList Insert Delete");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut sl: SkipList<u64> =
                std::iter::repeat_with(|| rng.random()).take(size).collect();

            b.iter(|| {
                let value = rng.random();
                sl.insert(value);
                black_box(sl.delete(&value));
            });
        });
    }
}

/// Benchmarking iteration.
#[inline]
pub fn iter(c: &mut Criterion) {
    c.bench_function("SkipList Iter", |b| {
        let mut rng = StdRng::seed_from_u64(0x1234_abcd);
        let sl: SkipList<u64> = std::iter::repeat_with(|| rng.random())
            .take(100_000)
            .collect();

        b.iter(|| {
            for el in &sl {
                black_box(el);
            }
        });
    });
}

/// Benchmarks.
#[inline]
pub fn benchmark(c: &mut Criterion) {
    insert(c);
    search(c);
    insert_delete(c);
    iter(c);
}
