use std::collections::TryReserveError;

#[derive(Debug, thiserror::Error)]
pub enum TriangulationError {
    #[error("not enough memory to stage {count} points for triangulation")]
    Allocation {
        count: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("triangulation needs at least 3 points, got {count}")]
    NotEnoughPoints { count: usize },
    #[error("projected points are collinear or coincident, no triangle can be built")]
    Degenerate,
    #[error("point {index} has a non-finite projected coordinate")]
    NonFinite { index: usize },
    #[error("could not fit a plane through {count} points")]
    PlaneFit { count: usize },
}
