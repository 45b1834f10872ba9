use pointclouds_core::{PointCloud, TracingProgress};
use pointclouds_projection::{develop_on_cylinder, CylinderParams, RollAxis};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    // A tank wall of radius 4 around the X axis, centered at (0, 10, 10),
    // with a dent of 5 cm between two welds.
    let mut pts = Vec::new();
    for i in 0..360 {
        let angle = (i as f32).to_radians();
        for k in 0..50 {
            let along = k as f32 * 0.2;
            let dent = if (90..120).contains(&i) && (20..30).contains(&k) {
                -0.05
            } else {
                0.0
            };
            let r = 4.0 + dent;
            pts.push([along, 10.0 + r * angle.cos(), 10.0 + r * angle.sin()]);
        }
    }
    let cloud = PointCloud::from_points(&pts);
    println!("Tank scan: {} points", cloud.len());

    let params = CylinderParams {
        radius: 4.0,
        axis: RollAxis::X,
        center: Some([0.0, 10.0, 10.0]),
    };
    let mut progress = TracingProgress::new();
    let sheet = match develop_on_cylinder(&cloud, &params, Some(&mut progress)) {
        Ok(sheet) => sheet,
        Err(err) => {
            eprintln!("unrolling failed: {err}");
            std::process::exit(1);
        }
    };

    let aabb = sheet.aabb();
    println!("Unrolled sheet: min={:?}, max={:?}", aabb.min, aabb.max);

    let dented = sheet.z.iter().filter(|&&d| d < -0.01).count();
    println!("Points more than 1 cm inside the nominal wall: {dented}");
}
