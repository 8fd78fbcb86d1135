use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;

use fixturekit_core::{init_standard_presets, FootprintSize, Position3D, WorkspaceGeometry};
use fixturekit_placement::{
    compute_footprint, PlacementController, PointerId, Ray, SafeZoneValidator,
};

fn bench_footprint(c: &mut Criterion) {
    let size = FootprintSize::new(120.0, 60.0, 40.0);
    c.bench_function("compute_footprint", |b| {
        b.iter(|| compute_footprint(black_box(&size), black_box(4.0)))
    });
}

fn bench_validation(c: &mut Criterion) {
    let validator = SafeZoneValidator::new(&WorkspaceGeometry::default());
    let size = FootprintSize::new(120.0, 60.0, 40.0);
    let mut group = c.benchmark_group("safe_zone");

    for &x in &[600.0, 1150.0, 2000.0] {
        let p = Position3D::new(x, 20.0, 300.0);
        group.bench_with_input(BenchmarkId::new("contains", x), &p, |b, p| {
            b.iter(|| validator.is_within_safe_zone(black_box(p), &size, 0.0))
        });
        group.bench_with_input(BenchmarkId::new("clamp", x), &p, |b, p| {
            b.iter(|| validator.clamp_to_safe_zone(black_box(p), &size, 0.0))
        });
    }
    group.finish();
}

fn bench_drag_moves(c: &mut Criterion) {
    let preset = init_standard_presets()
        .get("box-default")
        .cloned()
        .expect("standard preset");
    let mut session =
        PlacementController::new(WorkspaceGeometry::default(), preset).expect("session");
    let pointer = PointerId(1);
    session.pointer_down(pointer, &Ray::new(DVec3::new(600.0, 500.0, 300.0), DVec3::NEG_Y));

    let rays: Vec<Ray> = (0..100)
        .map(|i| {
            let x = 100.0 + i as f64 * 12.0;
            Ray::new(DVec3::new(x, 500.0, 300.0), DVec3::NEG_Y)
        })
        .collect();

    c.bench_function("drag_100_moves", |b| {
        b.iter(|| {
            for ray in &rays {
                session.pointer_move(pointer, black_box(ray));
            }
            session.frame_tick()
        })
    });
}

criterion_group!(benches, bench_footprint, bench_validation, bench_drag_moves);
criterion_main!(benches);
