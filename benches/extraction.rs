use criterion::{criterion_group, criterion_main, Criterion, black_box};

use glam::{IVec3, Vec2};

use terravox::mesh::MarchingCubes;
use terravox::voxel::ChunkCoord;
use terravox::{TerrainConfig, TerrainGenerator};

fn bench_config(width: i32) -> TerrainConfig {
    TerrainConfig {
        width,
        height: 32,
        chunk_size: IVec3::new(16, 32, 16),
        noise_scale: 0.05,
        noise_offset: Vec2::new(0.5, 0.5),
        ..Default::default()
    }
}

fn bench_generate_terrain(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_terrain");
    group.sample_size(20);
    for width in [2, 8] {
        group.bench_function(format!("{width}x{width}_chunks"), |b| {
            b.iter(|| {
                let mut terrain = TerrainGenerator::new(bench_config(black_box(width)))
                    .expect("valid config");
                terrain.generate_terrain()
            });
        });
    }
    group.finish();
}

fn bench_extract_chunk(c: &mut Criterion) {
    let mut terrain = TerrainGenerator::new(bench_config(4)).expect("valid config");
    terrain.generate_terrain();
    let mesher = MarchingCubes::new(terrain.config().voxel_size);

    c.bench_function("extract_chunk_16x32x16", |b| {
        b.iter(|| {
            mesher
                .extract_chunk(terrain.world(), black_box(ChunkCoord::new(1, 2)))
                .expect("chunk in partition")
        });
    });
}

fn bench_edit_round_trip(c: &mut Criterion) {
    let mut terrain = TerrainGenerator::new(bench_config(4)).expect("valid config");
    terrain.generate_terrain();
    let pos = IVec3::new(16, 31, 16);

    c.bench_function("add_destroy_block_chunk_corner", |b| {
        b.iter(|| {
            terrain.add_block(black_box(pos)).expect("in bounds");
            terrain.destroy_block(black_box(pos)).expect("in bounds")
        });
    });
}

criterion_group!(
    benches,
    bench_generate_terrain,
    bench_extract_chunk,
    bench_edit_round_trip,
);
criterion_main!(benches);
