use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use mesh_ugrid::algs::connectivity::{pad_connectivity, to_zero_based};
use mesh_ugrid::convert::{ConvertOptions, mesh_to_ugrid};
use mesh_ugrid::io::RawMesh;
use mesh_ugrid::topology::entity_type::EntityType;
use mesh_ugrid::topology::handle::EntityHandle;
use mesh_ugrid::ugrid::conventions::INT_FILL_VALUE;

/// Lat/lon quad grid on the unit sphere, with triangle fans at the poles.
fn uv_sphere(n_lat: usize, n_lon: usize) -> RawMesh {
    let mut coords = Vec::new();
    for i in 1..n_lat {
        let theta = std::f64::consts::PI * i as f64 / n_lat as f64;
        for j in 0..n_lon {
            let phi = 2.0 * std::f64::consts::PI * j as f64 / n_lon as f64;
            coords.extend([theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos()]);
        }
    }
    let ring = |i: usize, j: usize| (i * n_lon + (j % n_lon) + 1) as u64;
    let north = (coords.len() / 3 + 1) as u64;
    coords.extend([0.0, 0.0, 1.0]);
    let south = north + 1;
    coords.extend([0.0, 0.0, -1.0]);

    let mut connectivity = Vec::new();
    for j in 0..n_lon {
        connectivity.push(vec![north, ring(0, j), ring(0, j + 1)]);
        connectivity.push(vec![south, ring(n_lat - 2, j + 1), ring(n_lat - 2, j)]);
    }
    for i in 0..n_lat - 2 {
        for j in 0..n_lon {
            connectivity.push(vec![ring(i, j), ring(i + 1, j), ring(i + 1, j + 1), ring(i, j + 1)]);
        }
    }
    let elements = (1..=connectivity.len() as u64)
        .map(|id| EntityHandle::new(EntityType::Polygon, id).expect("element handle"))
        .collect();
    RawMesh {
        coords,
        elements,
        connectivity,
    }
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let options = ConvertOptions::default();

    for &n in &[32usize, 128usize] {
        let mesh = uv_sphere(n, 2 * n);

        group.bench_with_input(BenchmarkId::new("pad_connectivity", n), &n, |b, _| {
            b.iter(|| {
                let rows = to_zero_based(&mesh.connectivity).expect("zero-based");
                black_box(pad_connectivity(&rows, INT_FILL_VALUE).expect("pad"));
            });
        });

        group.bench_with_input(BenchmarkId::new("mesh_to_ugrid", n), &n, |b, _| {
            b.iter(|| {
                black_box(mesh_to_ugrid(&mesh, &options).expect("convert"));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
