//! Non-foldable arithmetic throughput, grounded on the teacher's
//! `benches/arithmetic_non_foldable.rs`: each benchmark reruns a small
//! variable-driven computation through the public operator functions so the
//! measured time reflects the numeric ladder's dispatch cost, not a constant
//! folded away at compile time.

use criterion::{Bencher, Criterion, black_box, criterion_group, criterion_main};
use jexl_eval::arithmetic;
use jexl_eval::options::Options;
use jexl_eval::value::Value;

fn run_long_lane_sum(bench: &mut Bencher) {
    let options = Options::new();
    bench.iter(|| {
        let mut acc = Value::I32(0);
        for i in 0..1000 {
            acc = arithmetic::add(&acc, &Value::I32(black_box(i)), &options).unwrap();
        }
        black_box(acc)
    });
}

fn run_overflow_promotion(bench: &mut Bencher) {
    let options = Options::new();
    bench.iter(|| {
        let mut acc = Value::I32(i32::MAX - 1000);
        for i in 0..2000 {
            acc = arithmetic::add(&acc, &Value::I32(black_box(i)), &options).unwrap();
        }
        black_box(acc)
    });
}

fn run_bigdec_division(bench: &mut Bencher) {
    use jexl_eval::types::BigDec;
    let options = Options::new();
    let one = BigDec::from_i64(1);
    bench.iter(|| {
        let mut acc = Value::from(one.clone());
        for i in 1..200 {
            let divisor = Value::from(BigDec::from_i64(black_box(i)));
            acc = arithmetic::div(&Value::from(one.clone()), &divisor, &options).unwrap_or(acc);
        }
        black_box(acc)
    });
}

fn arithmetic_benchmarks(c: &mut Criterion) {
    c.bench_function("long_lane_sum", |b| run_long_lane_sum(b));
    c.bench_function("overflow_promotion_to_bigint", |b| run_overflow_promotion(b));
    c.bench_function("bigdec_division", |b| run_bigdec_division(b));
}

criterion_group!(benches, arithmetic_benchmarks);
criterion_main!(benches);
