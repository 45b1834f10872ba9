use pointclouds_core::PointCloud;
use pointclouds_triangulation::{compute_triangulation, TriangulationStrategy};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    // Two terrain patches separated by a 20 m gap
    let mut pts = Vec::new();
    for offset in [0.0f32, 40.0] {
        for i in 0..30 {
            for j in 0..30 {
                let x = offset + i as f32 * 0.7 + ((i * 7 + j * 3) % 5) as f32 * 0.03;
                let y = j as f32 * 0.7 + ((i * 3 + j * 11) % 7) as f32 * 0.03;
                pts.push([x, y, (x * 0.2).sin() + (y * 0.1).cos()]);
            }
        }
    }
    let cloud = PointCloud::from_points(&pts);
    println!("Terrain: {} points", cloud.len());

    for strategy in [
        TriangulationStrategy::Generic {
            max_edge_length: 0.0,
        },
        TriangulationStrategy::Generic {
            max_edge_length: 2.0,
        },
        TriangulationStrategy::BestFitPlane {
            max_edge_length: 2.0,
        },
        TriangulationStrategy::EmptyPassthrough,
    ] {
        match compute_triangulation(&cloud, strategy) {
            Ok(Some(mesh)) => println!("{strategy:?}: {} triangles", mesh.len()),
            Ok(None) => println!("{strategy:?}: every triangle was too long"),
            Err(err) => println!("{strategy:?}: failed ({err})"),
        }
    }
}
