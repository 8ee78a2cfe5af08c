//! Benchmarks for signature parsing and test rendering.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kt_testgen::signature;
use kt_testgen::{ClassMetadata, FunctionMetadata, GeneratorConfig, MockerKind, TestSourceRenderer};

fn bench_parse_simple(c: &mut Criterion) {
    c.bench_function("parse_simple", |bench| {
        bench.iter(|| black_box(signature::parse(black_box("String?")).unwrap()))
    });
}

fn bench_parse_nested(c: &mut Criterion) {
    let text = "Map<String, List<Pair<Int?, (Value?, Error) -> Result<Unit>>>>?";
    c.bench_function("parse_nested", |bench| {
        bench.iter(|| black_box(signature::parse(black_box(text)).unwrap()))
    });
}

fn bench_render_class(c: &mut Criterion) {
    let ty = |text: &str| signature::parse(text).unwrap();
    let mut class = ClassMetadata::new("com.example", "Service")
        .with_import("Repo", "com.example.data.Repo")
        .with_constructor_parameter("repo", ty("Repo"))
        .with_constructor_parameter("limit", ty("Int"));
    for i in 0..20 {
        class = class.with_function(
            FunctionMetadata::new(format!("op{i}"), ty("List<User>?"))
                .with_parameter("id", ty("Long"))
                .with_parameter("filter", ty("Filter?"))
                .with_parameter("callback", ty("(User) -> Unit")),
        );
    }

    for kind in MockerKind::all() {
        let mut renderer = TestSourceRenderer::new(GeneratorConfig::with_mocker(kind));
        c.bench_function(&format!("render_class_20_{kind}"), |bench| {
            bench.iter(|| black_box(renderer.render_class(&class)))
        });
    }
}

criterion_group!(benches, bench_parse_simple, bench_parse_nested, bench_render_class);
criterion_main!(benches);
