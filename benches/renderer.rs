use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use treemap_rs_renderer::color::ColorScale;
use treemap_rs_renderer::config::{Config, Tiling, TreemapConfig};
use treemap_rs_renderer::dataset::DatasetCatalog;
use treemap_rs_renderer::hierarchy::build;
use treemap_rs_renderer::ir::DataNode;
use treemap_rs_renderer::layout::compute_layout;
use treemap_rs_renderer::render::Stage;
use treemap_rs_renderer::session::Session;

fn synthetic_dataset(categories: usize, leaves: usize) -> DataNode {
    let children = (0..categories)
        .map(|c| {
            let category = format!("Category {c}");
            let items = (0..leaves)
                .map(|l| {
                    let value = ((c * 31 + l * 17) % 97 + 1) as f64;
                    DataNode::leaf(format!("Item {c} {l}"), category.clone(), value)
                })
                .collect();
            DataNode::branch(category, items)
        })
        .collect();
    DataNode::branch("root", children)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for (categories, leaves) in [(5, 20), (20, 50), (50, 100)] {
        let data = synthetic_dataset(categories, leaves);
        group.bench_with_input(
            BenchmarkId::from_parameter(categories * leaves),
            &data,
            |b, data| b.iter(|| build(black_box(data)).expect("build failed")),
        );
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let data = synthetic_dataset(20, 50);
    let tree = build(&data).expect("build failed");
    for tiling in [Tiling::Squarify, Tiling::Binary, Tiling::SliceDice] {
        let config = TreemapConfig {
            tiling,
            ..TreemapConfig::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{tiling:?}")),
            &config,
            |b, config| b.iter(|| compute_layout(black_box(&tree), black_box(config))),
        );
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let config = Config::default();
    let catalog = DatasetCatalog::bundled().expect("bundled datasets");
    let mut group = c.benchmark_group("render");
    for dataset in catalog.iter() {
        let tree = build(&dataset.root).expect("build failed");
        let layout = compute_layout(&tree, &config.treemap);
        group.bench_function(BenchmarkId::from_parameter(&dataset.key), |b| {
            b.iter(|| {
                let mut stage = Stage::from_config(&config).expect("stage");
                let mut colors = ColorScale::new(config.theme.palette.clone());
                let mount = stage.render(black_box(&tree), black_box(&layout), &mut colors);
                let svg = stage.treemap_svg();
                stage.dispose(mount);
                svg
            })
        });
    }
    group.finish();
}

fn bench_switch(c: &mut Criterion) {
    let mut session = Session::with_bundled(Config::default()).expect("session");
    c.bench_function("session_switch", |b| {
        b.iter(|| {
            session.select(black_box("videogames")).expect("select");
            session.select(black_box("movies")).expect("select");
        })
    });
}

criterion_group!(benches, bench_build, bench_layout, bench_render, bench_switch);
criterion_main!(benches);
