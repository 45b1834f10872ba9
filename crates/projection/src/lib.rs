#![forbid(unsafe_code)]

pub mod axis;
pub mod cone;
pub mod cylinder;
pub mod error;
pub mod transform;

pub use axis::{Cylindrical, RollAxis};
pub use cone::{develop_on_cone, ConeParams, ConeProjection};
pub use cylinder::{develop_on_cylinder, CylinderParams};
pub use error::ProjectionError;
pub use transform::{apply_transformation, TransformKind, Transformation};
