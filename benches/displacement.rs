use criterion::{black_box, criterion_group, criterion_main, Criterion};
use torus_morph::config::{morph_params, ShadingSettings};
use torus_morph::mesh::generate_torus;
use torus_morph::morph::displace_mesh;
use cgmath::Vector3;

fn bench_displace_mesh(c: &mut Criterion) {
    let mesh = generate_torus(1.0, 0.25, 120, 120).expect("valid torus");
    let params = morph_params(&ShadingSettings::default(), Vector3::new(-1.0, 0.4, 0.4));

    c.bench_function("displace_mesh 120x120", |b| {
        b.iter(|| displace_mesh(black_box(&mesh), black_box(&params)))
    });
}

fn bench_displace_mesh_far(c: &mut Criterion) {
    let mesh = generate_torus(1.0, 0.25, 120, 120).expect("valid torus");
    // Morph point far from the surface: every vertex stays put
    let params = morph_params(&ShadingSettings::default(), Vector3::new(0.0, 0.0, 50.0));

    c.bench_function("displace_mesh 120x120 far", |b| {
        b.iter(|| displace_mesh(black_box(&mesh), black_box(&params)))
    });
}

criterion_group!(benches, bench_displace_mesh, bench_displace_mesh_far);
criterion_main!(benches);
