//! Benchmarks for propwatch-generator.
//!
//! Measures one full pass over a single request `x.Child...Child.Value` at
//! several chain depths, on a public host and on a private nested host.
//!
//! Run with: cargo bench -p propwatch-generator

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use propwatch_core::{
    Expr, ExpressionArgument, Invocation, SymbolTable, TypeDecl, Visibility,
};
use propwatch_generator::Generator;

const DEPTHS: [usize; 4] = [1, 2, 10, 20];

fn build(host_visibility: Visibility, depth: usize) -> (SymbolTable, Vec<Invocation>) {
    let mut symbols = SymbolTable::new();
    let int = symbols.add_type(TypeDecl::new("int")).unwrap();
    let outer = symbols
        .add_type(TypeDecl::new("Outer").namespace("Bench"))
        .unwrap();
    let host = symbols
        .add_type(
            TypeDecl::new("Host")
                .nested_in(outer)
                .visibility(host_visibility),
        )
        .unwrap();
    let child = symbols
        .add_member(host, "Child", host, Visibility::Public)
        .unwrap();
    let value = symbols
        .add_member(host, "Value", int, Visibility::Public)
        .unwrap();
    let x = symbols.add_param("x", host).unwrap();

    let body = (1..depth)
        .fold(Expr::param(x), |body, _| body.member(child))
        .member(value);
    let argument = ExpressionArgument::inline(symbols.expr_text(&body), x, body);
    let invocations = vec![Invocation::single(
        "NotifyPropertyChangedExtensions",
        host,
        argument,
    )];
    (symbols, invocations)
}

fn bench_host(c: &mut Criterion, name: &str, visibility: Visibility) {
    let mut group = c.benchmark_group(name);
    let generator = Generator::new();

    for depth in DEPTHS {
        let (symbols, invocations) = build(visibility, depth);
        group.bench_with_input(
            BenchmarkId::from_parameter(depth),
            &invocations,
            |b, invocations| {
                b.iter(|| generator.run(&symbols, black_box(invocations)).unwrap())
            },
        );
    }

    group.finish();
}

fn bench_public_host(c: &mut Criterion) {
    bench_host(c, "public_host", Visibility::Public);
}

fn bench_private_host(c: &mut Criterion) {
    bench_host(c, "private_host", Visibility::Private);
}

criterion_group!(benches, bench_public_host, bench_private_host);
criterion_main!(benches);
