//! Mock Frame - State Cache Statistics
//!
//! Submits a few frames of a small scene to the recording mock backend and
//! logs what the state cache saved each frame:
//! - Opaque and translucent meshes mixed in one draw list
//! - Runs of meshes sharing a texture
//! - A reflection-mapped, unlit pass with back faces kept
//!
//! Run with:
//!   cargo run -p vellum-render --example mock_frame
//!
//! Set `RUST_LOG=vellum_render=trace` to see every state command.

use vellum_core::config::{BenchmarkMode, Config};
use vellum_core::math::{Mat4, PackedVec2, Quat, Vec3, Vec4};
use vellum_core::profiling::{new_frame, profile_scope};
use vellum_render::{
    ErrorCheckMode, RenderModifiers, Renderer, RendererDescriptor, StatusBits, TextureHandle,
    TriMeshData,
};
use vellum_test_utils::MockBackend;

const FRAMES: u32 = 3;

fn main() {
    vellum_core::init(&Config {
        benchmark: BenchmarkMode::On,
        ..Default::default()
    });

    let mut renderer = match Renderer::with_descriptor(
        MockBackend::new(),
        RendererDescriptor {
            error_checks: ErrorCheckMode::Log,
            ..Default::default()
        },
    ) {
        Ok(renderer) => renderer,
        Err(err) => {
            tracing::error!("{}", err);
            std::process::exit(1);
        }
    };

    let tiles = TextureHandle::new(1).expect("non-zero");
    let chrome = TextureHandle::new(2).expect("non-zero");
    let terrain: Vec<TriMeshData> = (0..16)
        .map(|_| TriMeshData::quad().with_texture(tiles, vec![PackedVec2::new(0.0, 1.0); 4]))
        .collect();
    let water = TriMeshData::quad().with_diffuse_color(Vec4::new(0.2, 0.4, 1.0, 0.6));
    let ship = TriMeshData::quad().with_texture(chrome, vec![PackedVec2::default(); 4]);

    let reflective = RenderModifiers::default()
        .with_status_bits(StatusBits::REFLECTION_MAP | StatusBits::NULL_SHADER | StatusBits::KEEP_BACK_FACES);

    for frame in 0..FRAMES {
        {
            profile_scope!("frame");
            let angle = frame as f32 * 0.5;
            let ship_transform = Mat4::from_rotation_translation(
                Quat::from_rotation_y(angle),
                Vec3::new(0.0, 1.0, -4.0),
            );

            renderer.draw_mesh_list(&terrain, None, None);
            renderer.draw_mesh_list([&water], None, None);
            renderer.draw_mesh_list([&ship], Some(&ship_transform), Some(&reflective));
        }

        let stats = renderer.take_stats();
        tracing::info!("frame {}: {}", frame, stats);
        tracing::info!(
            "frame {}: {} backend commands recorded",
            frame,
            renderer.backend().call_count()
        );
        renderer.backend().clear_calls();
        new_frame();
    }
}
