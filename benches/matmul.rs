use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use matmul_bench::{BLOCK_SIZE, LEAF_SIZE, matmul_blocked, matmul_naive, strassen};

const INPUT_SIZES: &[(&str, usize)] = &[("n64", 64), ("n128", 128), ("n256", 256)];

fn make_matrix(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed | 1;
    (0..n * n)
        .map(|_| (next_u64(&mut state) >> 11) as f64 / (1u64 << 53) as f64 - 0.5)
        .collect()
}

#[inline]
fn next_u64(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x >> 12;
    x ^= x << 25;
    x ^= x >> 27;
    *state = x;
    x.wrapping_mul(0x2545_F491_4F6C_DD1D)
}

fn bench_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");
    for &(label, n) in INPUT_SIZES {
        group.throughput(Throughput::Elements((n as u64).pow(3)));

        let a = make_matrix(n, 0xC0FF_EE42_1234_5678u64 ^ n as u64);
        let b = make_matrix(n, 0xBADC_0FFE_EE11_D00Du64 ^ (n as u64).rotate_left(17));
        let mut out = vec![0.0f64; n * n];
        let sample = (n / 2) * n + (n / 2);

        group.bench_function(BenchmarkId::new("naive", label), |bench| {
            bench.iter(|| {
                matmul_naive(black_box(&a), black_box(&b), black_box(&mut out), n);
                black_box(out[sample]);
            });
        });

        group.bench_function(BenchmarkId::new("blocked", label), |bench| {
            bench.iter(|| {
                out.fill(0.0);
                matmul_blocked(black_box(&a), black_box(&b), black_box(&mut out), n, BLOCK_SIZE);
                black_box(out[sample]);
            });
        });

        group.bench_function(BenchmarkId::new("strassen", label), |bench| {
            bench.iter(|| {
                let c = strassen(black_box(&a), black_box(&b), n, LEAF_SIZE);
                black_box(c[sample]);
            });
        });
    }
    group.finish();
}

fn bench_strassen_leaf(c: &mut Criterion) {
    let n = 256;
    let a = make_matrix(n, 1);
    let b = make_matrix(n, 2);

    let mut group = c.benchmark_group("strassen_leaf");
    group.throughput(Throughput::Elements((n as u64).pow(3)));
    for leaf in [16usize, 32, 64, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(leaf), &leaf, |bench, &leaf| {
            bench.iter(|| black_box(strassen(black_box(&a), black_box(&b), n, leaf)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_matmul, bench_strassen_leaf);
criterion_main!(benches);
