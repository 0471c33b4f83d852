use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hidline::colors;
use hidline::prelude::*;

fn cube_scene(config: &Config) -> Scene {
    let mut scene = Scene::new(config);
    scene.add_object(BoxBuilder::cube(config.box_size).build().expect("valid cube"));
    scene.rotate_around_axis(Axis::X, 0.5);
    scene.rotate_around_axis(Axis::Y, 0.6);
    scene
}

fn ring_scene(config: &Config, objects: usize) -> Scene {
    let mut scene = Scene::new(config);
    for _ in 0..objects {
        let object = BoxBuilder::cube(config.box_size)
            .with_hole(true)
            .build()
            .expect("valid box with hole");
        scene.add_object(object);
    }
    scene.rotate_around_axis(Axis::X, 0.4);
    scene
}

fn benchmark_single_cube(c: &mut Criterion) {
    let config = Config::default();
    let mut group = c.benchmark_group("single_cube");

    group.bench_function("render", |b| {
        let mut scene = cube_scene(&config);
        let mut renderer = Renderer::new(config.width, config.height);
        let mut drawer = WireframeDrawer::default();
        b.iter(|| {
            renderer.clear(colors::BACKGROUND);
            black_box(scene.render(&mut renderer, &mut drawer));
        });
    });

    group.bench_function("rotate_and_render", |b| {
        let mut scene = cube_scene(&config);
        let mut renderer = Renderer::new(config.width, config.height);
        let mut drawer = WireframeDrawer::default();
        b.iter(|| {
            scene.rotate_around_axis(Axis::Y, config.rotation_step);
            renderer.clear(colors::BACKGROUND);
            black_box(scene.render(&mut renderer, &mut drawer));
        });
    });

    group.finish();
}

fn benchmark_ring_of_holed_boxes(c: &mut Criterion) {
    let config = Config {
        layout: Layout::ring(),
        ..Config::default()
    };
    let mut group = c.benchmark_group("ring_of_holed_boxes");

    for objects in [2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(objects), &objects, |b, &objects| {
            let mut scene = ring_scene(&config, objects);
            let mut renderer = Renderer::new(config.width, config.height);
            let mut drawer = WireframeDrawer::default();
            b.iter(|| {
                renderer.clear(colors::BACKGROUND);
                black_box(scene.render(&mut renderer, &mut drawer));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_cube, benchmark_ring_of_holed_boxes);
criterion_main!(benches);
