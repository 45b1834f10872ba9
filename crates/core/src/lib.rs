#![forbid(unsafe_code)]

pub mod bbox;
pub mod cloud;
pub mod cloud_view;
pub mod progress;
pub mod traits;

pub use bbox::Aabb;
pub use cloud::{Colors, Normals, PointCloud};
pub use cloud_view::CloudView;
pub use progress::{ProgressReporter, ProgressSession, TracingProgress};
pub use traits::{CloudSource, Points};
