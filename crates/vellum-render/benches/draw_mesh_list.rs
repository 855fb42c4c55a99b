//! Benchmarks for the per-frame draw submission hot path

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use vellum_core::math::{Mat4, PackedVec2, Vec4};
use vellum_render::{
    ErrorCheckMode, RenderModifiers, Renderer, RendererDescriptor, TextureHandle, TriMeshData,
};
use vellum_test_utils::MockBackend;

fn renderer() -> Renderer<MockBackend> {
    let descriptor = RendererDescriptor {
        error_checks: ErrorCheckMode::Ignore,
        ..Default::default()
    };
    Renderer::with_descriptor(MockBackend::new(), descriptor).expect("mock has every entry point")
}

/// A scene where every fourth mesh is translucent and textures come in runs
/// of eight, roughly what a level with a shared tileset looks like.
fn scene(size: usize) -> Vec<TriMeshData> {
    (0..size)
        .map(|i| {
            let texture = TextureHandle::new(1 + (i / 8) as u32).expect("non-zero");
            let mesh = TriMeshData::quad().with_texture(texture, vec![PackedVec2::default(); 4]);
            if i % 4 == 0 {
                mesh.with_diffuse_color(Vec4::new(1.0, 1.0, 1.0, 0.5))
            } else {
                mesh
            }
        })
        .collect()
}

fn bench_draw_mesh_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_mesh_list");

    for size in [10, 100, 1000] {
        let meshes = scene(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &meshes, |b, meshes| {
            let mut renderer = renderer();
            b.iter(|| {
                renderer.backend().clear_calls();
                renderer.draw_mesh_list(
                    black_box(meshes),
                    Some(&Mat4::IDENTITY),
                    Some(&RenderModifiers::DEFAULT),
                );
                renderer.take_stats()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_draw_mesh_list);
criterion_main!(benches);
