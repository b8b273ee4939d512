//! Dispatch benchmarks using criterion.
//!
//! Run with: cargo bench --bench dispatch_bench

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use pmd::{Context, Specializer, TypeId, Value};

/// A linear hierarchy `Object <- L0 <- ... <- L(depth-1)`; returns the deepest.
fn deep_type(ctx: &Context, depth: usize) -> TypeId {
    let mut ty = TypeId::OBJECT;
    for i in 0..depth {
        ty = ctx.define_type(format!("L{}", i), ty).unwrap();
    }
    ty
}

fn bench_single_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_dispatch");

    let ctx = Context::new();
    let p = ctx.procedure::<i64>("kind");
    p.method([TypeId::NUMBER], |_| 1).unwrap();
    p.method([TypeId::STRING], |_| 2).unwrap();
    p.method([Specializer::Any], |_| 0).unwrap();

    group.bench_function("primitive", |b| {
        let args = [Value::from(42)];
        b.iter(|| black_box(p.invoke(black_box(&args)).unwrap()));
    });

    p.method([Value::from("hot")], |_| 3).unwrap();
    group.bench_function("value_specializer", |b| {
        let args = [Value::from("hot")];
        b.iter(|| black_box(p.invoke(black_box(&args)).unwrap()));
    });

    group.finish();
}

fn bench_hierarchy_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy_depth");

    for depth in [1usize, 4, 16, 64] {
        let ctx = Context::new();
        let leaf = deep_type(&ctx, depth);
        let p = ctx.procedure::<i64>("root_only");
        p.method([Specializer::Any], |_| 0).unwrap();
        let obj = ctx.object(leaf).unwrap().build();

        group.bench_with_input(BenchmarkId::from_parameter(depth), &obj, |b, obj| {
            let args = [obj.clone()];
            b.iter(|| black_box(p.invoke(black_box(&args)).unwrap()));
        });
    }

    group.finish();
}

fn bench_multi_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_dispatch");

    for arity in [2usize, 4, 8] {
        let ctx = Context::new();
        let p = ctx.procedure::<usize>("combine");
        p.method(vec![Specializer::Any; arity], |_| 0).unwrap();
        p.method(vec![Specializer::Type(TypeId::NUMBER); arity], |_| 1).unwrap();
        p.method(vec![Specializer::Type(TypeId::OBJECT); arity], |_| 2).unwrap();
        let args: Vec<Value> = (0..arity as i64).map(Value::from).collect();

        group.bench_with_input(BenchmarkId::from_parameter(arity), &args, |b, args| {
            b.iter(|| black_box(p.invoke(black_box(args)).unwrap()));
        });
    }

    group.finish();
}

fn bench_registration(c: &mut Criterion) {
    c.bench_function("register_method", |b| {
        b.iter_batched(
            || Context::new().procedure::<()>("sink"),
            |p| black_box(p.method([TypeId::NUMBER, TypeId::STRING], |_| ()).unwrap()),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_single_dispatch,
    bench_hierarchy_depth,
    bench_multi_dispatch,
    bench_registration,
);
criterion_main!(benches);
