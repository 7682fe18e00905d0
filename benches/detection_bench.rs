use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::path::Path;
use test_dispatch::detection::detect_test_runner;
use test_dispatch::dispatch::Dispatcher;
use test_dispatch::models::{Detection, InvocationRequest, Manifest, PackageManager, TestCategory};

/// A monorepo-sized manifest whose only runner evidence is a scoped jest package.
fn large_manifest() -> Manifest {
    let mut manifest = Manifest::default();
    for i in 0..200 {
        manifest
            .scripts
            .insert(format!("build:{i}"), format!("tsc -p packages/pkg-{i}"));
        manifest
            .dependencies
            .insert(format!("dep-{i}"), "^1.0.0".to_string());
        manifest
            .dev_dependencies
            .insert(format!("dev-dep-{i}"), "^2.0.0".to_string());
    }
    manifest
        .dev_dependencies
        .insert("@jest/globals".to_string(), "^29.0.0".to_string());
    manifest
}

fn bench_detection(c: &mut Criterion) {
    let manifest = large_manifest();

    c.bench_function("detect_test_runner_dependency_tier", |b| {
        b.iter(|| detect_test_runner(black_box(&manifest)));
    });

    let detection = Detection {
        package_manager: PackageManager::Pnpm,
        test_runner: detect_test_runner(&manifest),
    };
    let request = InvocationRequest::category(TestCategory::Unit).with_pattern("parser");
    let dispatcher = Dispatcher::default();

    c.bench_function("compose_category_command", |b| {
        b.iter(|| {
            dispatcher.compose(
                black_box(&request),
                &manifest,
                &detection,
                Path::new("/work/app"),
            )
        });
    });
}

criterion_group!(benches, bench_detection);
criterion_main!(benches);
