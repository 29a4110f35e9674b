use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use package_config::{Package, PackageConfig};
use serde_json::Map;
use url::Url;

const PACKAGE_COUNTS: &[usize] = &[10, 100, 1000];

// A flat cache of packages plus one workspace package per ten, each nesting
// a tool package outside its lib/ directory.
fn packages(count: usize) -> Vec<Package> {
    let mut packages = Vec::with_capacity(count);
    for index in 0..count {
        let (name, root) = if index % 10 == 0 {
            (
                format!("tool_{index}"),
                format!("file:///work/app_{}/tool/t{index}/", index / 10),
            )
        } else {
            (format!("pkg_{index}"), format!("file:///cache/pkg_{index}-1.0.0/"))
        };
        let root = Url::parse(&root).unwrap();
        packages.push(
            Package::builder(name, root.clone())
                .package_uri_root(root.join("lib/").unwrap())
                .build()
                .unwrap(),
        );
    }
    for app in 0..count.div_ceil(10) {
        let root = Url::parse(&format!("file:///work/app_{app}/")).unwrap();
        packages.push(
            Package::builder(format!("app_{app}"), root.clone())
                .package_uri_root(root.join("lib/").unwrap())
                .build()
                .unwrap(),
        );
    }
    packages
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for &count in PACKAGE_COUNTS {
        let input = packages(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| PackageConfig::new(2, black_box(input.clone()), Map::new()));
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    for &count in PACKAGE_COUNTS {
        let config = PackageConfig::new(2, packages(count), Map::new()).unwrap();
        let nested = Url::parse("file:///work/app_0/tool/t0/bin/main.dart").unwrap();
        let cached = Url::parse(&format!("file:///cache/pkg_{}-1.0.0/lib/src/a.dart", count - 1)).unwrap();
        let missing = Url::parse("file:///elsewhere/a.dart").unwrap();
        let reference = Url::parse("package:app_0/src/deep/file.dart").unwrap();

        group.bench_with_input(BenchmarkId::new("package_of_nested", count), &nested, |b, uri| {
            b.iter(|| config.package_of(black_box(uri)));
        });
        group.bench_with_input(BenchmarkId::new("package_of_missing", count), &missing, |b, uri| {
            b.iter(|| config.package_of(black_box(uri)));
        });
        group.bench_with_input(BenchmarkId::new("to_package_uri", count), &cached, |b, uri| {
            b.iter(|| config.to_package_uri(black_box(uri)));
        });
        group.bench_with_input(BenchmarkId::new("resolve", count), &reference, |b, uri| {
            b.iter(|| config.resolve(black_box(uri)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_construction, bench_queries);
criterion_main!(benches);
